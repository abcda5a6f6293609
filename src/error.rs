//! 错误类型
//!
//! 协议层自身从不向应用层报告错误；这里只有两类：
//! - [`ConfigError`]：仿真启动前的配置校验失败
//! - [`TimerError`]：定时器使用违规（由时钟协作方报告，致命）

use thiserror::Error;

use crate::net::EntityId;

/// 配置校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    ZeroWindow,

    #[error("sequence space {seq_space} too small for window size {window_size} (need at least {})", window_size + 1)]
    SeqSpaceTooSmall { seq_space: usize, window_size: usize },

    #[error("round-trip timeout must be positive, got {0}")]
    NonPositiveRtt(f64),

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("mean message interval must be positive, got {0}")]
    NonPositiveInterval(f64),
}

/// 定时器契约违规：重复启动或停止未运行的定时器
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("entity {entity}: start_timer while a timer is already running")]
    AlreadyRunning { entity: EntityId },

    #[error("entity {entity}: stop_timer while no timer is running")]
    NotRunning { entity: EntityId },
}
