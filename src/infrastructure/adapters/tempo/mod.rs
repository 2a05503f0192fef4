//! 变速后处理适配器

mod ffmpeg_adjuster;

pub use ffmpeg_adjuster::FfmpegTempoAdjuster;
