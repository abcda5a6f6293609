//! 仿真时间类型
//!
//! 定义仿真时间及其单位转换。

/// 每个仿真时间单位对应的 tick 数。
pub const TICKS_PER_UNIT: u64 = 1_000;

/// 仿真时间（tick，1 个时间单位 = [`TICKS_PER_UNIT`] tick）。
///
/// 整数表示避免浮点时间在事件堆中比较时的歧义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 由浮点时间单位构造；负数和 NaN 视为 0，溢出饱和。
    pub fn from_units(units: f64) -> SimTime {
        if !(units > 0.0) {
            return SimTime::ZERO;
        }
        let ticks = (units * TICKS_PER_UNIT as f64).round();
        if ticks >= u64::MAX as f64 {
            SimTime(u64::MAX)
        } else {
            SimTime(ticks as u64)
        }
    }

    pub fn as_units(self) -> f64 {
        self.0 as f64 / TICKS_PER_UNIT as f64
    }

    pub fn saturating_add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}
