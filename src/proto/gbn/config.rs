//! 协议配置
//!
//! 常量集中到一个只构造一次、构造时校验的配置对象里。

use crate::error::ConfigError;
use crate::sim::SimTime;

use super::seq::SeqSpace;

/// 默认超时（往返时间），单位：仿真时间单位
pub const DEFAULT_RTT_UNITS: f64 = 16.0;
/// 默认窗口大小（最多未确认包数）
pub const DEFAULT_WINDOW_SIZE: usize = 6;
/// 默认序号空间，必须至少为 窗口大小 + 1
pub const DEFAULT_SEQ_SPACE: usize = 7;

/// Go-Back-N 协议参数（运行期间不可变）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbnConfig {
    rtt: SimTime,
    window_size: usize,
    seq_space: usize,
}

impl GbnConfig {
    /// 校验并构造配置：`seq_space >= window_size + 1`，`window_size >= 1`，`rtt > 0`。
    pub fn new(rtt_units: f64, window_size: usize, seq_space: usize) -> Result<Self, ConfigError> {
        if !(rtt_units > 0.0) {
            return Err(ConfigError::NonPositiveRtt(rtt_units));
        }
        if window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if seq_space < window_size.saturating_add(1) {
            return Err(ConfigError::SeqSpaceTooSmall {
                seq_space,
                window_size,
            });
        }
        let rtt = SimTime::from_units(rtt_units);
        if rtt == SimTime::ZERO {
            return Err(ConfigError::NonPositiveRtt(rtt_units));
        }
        Ok(Self {
            rtt,
            window_size,
            seq_space,
        })
    }

    pub fn rtt(&self) -> SimTime {
        self.rtt
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn seq_space(&self) -> SeqSpace {
        SeqSpace::new(self.seq_space)
    }
}

impl Default for GbnConfig {
    fn default() -> Self {
        Self {
            rtt: SimTime::from_units(DEFAULT_RTT_UNITS),
            window_size: DEFAULT_WINDOW_SIZE,
            seq_space: DEFAULT_SEQ_SPACE,
        }
    }
}
