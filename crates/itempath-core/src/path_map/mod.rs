//! Logical item path to filesystem directory mapping.
//!
//! Escapes characters that cannot appear in file names as `%XX` and keeps
//! the physical path within a length budget by replacing an over-long
//! prefix with an 8-hex-character directory. Each such directory carries a
//! `link` file naming the prefix it replaces.

mod hash;
mod link;
mod mapper;
mod reverse;
mod shorten;
mod symbols;

pub use hash::{is_short_name, reduce, SHORT_NAME_LEN};
pub use link::{ensure_link, link_path, read_link, LinkOutcome, LINK_FILE_NAME};
pub use mapper::PathMapper;
pub use reverse::logical_path;
pub use shorten::shorten;
pub use symbols::{encode_char, host_reserved_chars, IllegalSymbolTable};
