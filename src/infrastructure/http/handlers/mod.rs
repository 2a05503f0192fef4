//! HTTP Handlers

mod engine_info;
mod file;
mod generate;
mod log;
mod ping;

pub use engine_info::*;
pub use file::*;
pub use generate::*;
pub use log::*;
pub use ping::*;
