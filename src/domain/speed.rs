//! 语速规划
//!
//! 引擎原生只支持 0.7 ~ 2.0 的语速。超出该范围时，
//! 以 1.0 语速合成，再交给外部编码器做变速不变调后处理（atempo）。
//! ffmpeg 的 atempo 滤镜单次只接受 0.5 ~ 2.0，更极端的倍率
//! 需要拆成多级串联。

/// 引擎原生语速下限
pub const NATIVE_SPEED_MIN: f32 = 0.7;
/// 引擎原生语速上限
pub const NATIVE_SPEED_MAX: f32 = 2.0;

/// atempo 滤镜单次通过的倍率范围
const ATEMPO_PASS_MIN: f32 = 0.5;
const ATEMPO_PASS_MAX: f32 = 2.0;

/// 语速执行计划
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedPlan {
    /// 传给引擎的语速
    pub engine_speed: f32,
    /// 后处理倍率，None 表示不需要后处理
    pub post_tempo: Option<f32>,
}

/// 无效语速
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Invalid speed: {0}")]
pub struct InvalidSpeed(pub f32);

/// 规划语速的执行方式
///
/// 原生范围内的语速直接交给引擎；
/// 范围外的语速按 1.0 合成并记录后处理倍率
pub fn plan_speed(requested: f32) -> Result<SpeedPlan, InvalidSpeed> {
    if !requested.is_finite() || requested <= 0.0 {
        return Err(InvalidSpeed(requested));
    }

    if (NATIVE_SPEED_MIN..=NATIVE_SPEED_MAX).contains(&requested) {
        Ok(SpeedPlan {
            engine_speed: requested,
            post_tempo: None,
        })
    } else {
        Ok(SpeedPlan {
            engine_speed: 1.0,
            post_tempo: Some(requested),
        })
    }
}

/// 将总倍率拆成 atempo 可接受的多级倍率
///
/// 每一级都落在 0.5 ~ 2.0 内，各级乘积等于总倍率
pub fn atempo_passes(factor: f32) -> Vec<f32> {
    let mut passes = Vec::new();
    let mut remaining = factor;

    while remaining > ATEMPO_PASS_MAX {
        passes.push(ATEMPO_PASS_MAX);
        remaining /= ATEMPO_PASS_MAX;
    }
    while remaining < ATEMPO_PASS_MIN {
        passes.push(ATEMPO_PASS_MIN);
        remaining /= ATEMPO_PASS_MIN;
    }
    passes.push(remaining);
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_range_passes_through() {
        let plan = plan_speed(1.3).unwrap();
        assert_eq!(plan.engine_speed, 1.3);
        assert_eq!(plan.post_tempo, None);

        // 边界值属于原生范围
        assert_eq!(plan_speed(0.7).unwrap().post_tempo, None);
        assert_eq!(plan_speed(2.0).unwrap().post_tempo, None);
    }

    #[test]
    fn test_below_native_range_uses_post_processing() {
        let plan = plan_speed(0.5).unwrap();
        assert_eq!(plan.engine_speed, 1.0);
        assert_eq!(plan.post_tempo, Some(0.5));
    }

    #[test]
    fn test_above_native_range_uses_post_processing() {
        let plan = plan_speed(2.5).unwrap();
        assert_eq!(plan.engine_speed, 1.0);
        assert_eq!(plan.post_tempo, Some(2.5));
    }

    #[test]
    fn test_invalid_speed_rejected() {
        assert!(plan_speed(0.0).is_err());
        assert!(plan_speed(-1.0).is_err());
        assert!(plan_speed(f32::NAN).is_err());
        assert!(plan_speed(f32::INFINITY).is_err());
    }

    #[test]
    fn test_atempo_single_pass() {
        assert_eq!(atempo_passes(0.5), vec![0.5]);
        assert_eq!(atempo_passes(2.0), vec![2.0]);
        assert_eq!(atempo_passes(1.5), vec![1.5]);
    }

    #[test]
    fn test_atempo_chained_for_fast() {
        let passes = atempo_passes(3.0);
        assert_eq!(passes.len(), 2);
        let product: f32 = passes.iter().product();
        assert!((product - 3.0).abs() < 1e-5);
        assert!(passes.iter().all(|p| (0.5..=2.0).contains(p)));
    }

    #[test]
    fn test_atempo_chained_for_slow() {
        let passes = atempo_passes(0.2);
        let product: f32 = passes.iter().product();
        assert!((product - 0.2).abs() < 1e-5);
        assert!(passes.iter().all(|p| (0.5..=2.0).contains(p)));
    }
}
