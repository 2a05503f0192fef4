//! Application Queries
//!
//! 查询及处理器

mod engine_queries;

pub use engine_queries::{
    EngineStatus, EngineStatusHandler, ListVoicesHandler, ModelConfigHandler, ModelConfigView,
    ModelSettings,
};
