use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use tracing::{debug, error, warn};

use gbrowse::cli::{self, BrowseArgs};
use gbrowse::config::{self, EnvConfig};
use gbrowse::logging;
use gbrowse::process::CancelToken;

#[derive(clap::Parser, Debug)]
#[command(
    name = "gbrowse",
    about = "Open the repo in the browser",
    long_about = "Open the repo in the browser.\n\n\
        The target is PATH or FILE:LINUM.\n  \
        gbrowse PATH opens the PATH of the repo.\n  \
        gbrowse FILE:LINUM opens the line LINUM of the FILE of the repo.\n  \
        gbrowse opens the current directory of the repo.",
    after_help = "Environment variables:\n  \
        GBROWSE_GIT     git command, default is git\n  \
        GBROWSE_DEBUG   enable debug log if set\n  \
        GBROWSE_CONFIG  config JSON or path to a config file\n  \
        GBROWSE_LOG     log filter directive, overrides GBROWSE_DEBUG"
)]
struct Args {
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Only print the generated url"
    )]
    print: bool,

    #[arg(short, long, help = "Config JSON or path to a config file (JSON or .toml)")]
    config: Option<String>,

    #[arg(long, help = "Comma-separated phases, e.g. branch,tag")]
    phase: Option<String>,

    #[arg(help = "PATH or FILE:LINUM")]
    target: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse_from(cli::normalize_flag_args(std::env::args_os()));
    let env = EnvConfig::from_env();
    logging::init_logging(env.debug);

    debug!(?env, "env");
    debug!(?args, "flags");

    let cancel = CancelToken::new();
    if let Err(e) = cancel.install_interrupt_handler() {
        warn!(error = %e, "interrupts will not stop running commands");
    }

    let browse_args = BrowseArgs {
        target: args.target,
        config: args.config,
        phase: args.phase,
        print: args.print,
        default_config: config::default_config_path(),
    };

    match cli::run_browse(&browse_args, &env, &cancel, &mut std::io::stdout()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
