//! Application Commands
//!
//! 命令及处理器

mod generate_speech;

pub use generate_speech::{GenerateSpeechCommand, GenerateSpeechHandler, GenerateSpeechResponse};
