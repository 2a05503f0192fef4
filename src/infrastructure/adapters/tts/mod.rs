//! TTS 引擎适配器

mod fake_engine_client;
mod http_engine_client;

pub use fake_engine_client::{FakeEngineClient, FakeEngineConfig};
pub use http_engine_client::{HttpEngineClient, HttpEngineClientConfig};
