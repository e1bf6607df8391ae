pub mod config;
pub mod error;
pub mod logging;
pub mod path_map;

pub use error::MapError;
pub use path_map::PathMapper;
