//! CLI command handlers, one file per command.

mod config;
mod escape;
mod hash;
mod map;
mod resolve;
mod shorten;

pub use config::run_config;
pub use escape::{run_escape, run_unescape};
pub use hash::run_hash;
pub use map::run_map;
pub use resolve::run_resolve;
pub use shorten::run_shorten;
