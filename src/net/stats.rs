//! 统计信息
//!
//! 信道计数器与一次仿真运行的汇总。

use serde::Serialize;

use crate::proto::gbn::{ReceiverStats, SenderStats};

/// 信道统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    /// 交给信道的包数（两个方向合计）
    pub to_layer3: u64,
    pub lost: u64,
    pub corrupted: u64,
    /// 交付给应用层的载荷数
    pub to_layer5: u64,
}

/// 一次运行的汇总（`--stats-json` 输出）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// 结束时的仿真时间（时间单位）
    pub final_time: f64,
    /// 应用层产生的消息数
    pub messages_generated: u64,
    pub sender: SenderStats,
    pub receiver: ReceiverStats,
    pub channel: ChannelStats,
    /// 是否因定时器违规而中止
    pub aborted: bool,
}
