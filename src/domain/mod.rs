//! Domain logic - pure values and transforms independent of git processes

pub mod phase;
pub mod repo_url;
pub mod target;

pub use phase::{parse_phase_list, Builtin, Phase};
pub use target::Target;
