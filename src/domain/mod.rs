//! Domain Layer - 领域层
//!
//! 纯逻辑，无 IO:
//! - text: 文本规范化（NFC）与不支持字符剔除
//! - speed: 语速规划（引擎原生范围 / 外部后处理分流）

pub mod speed;
pub mod text;
