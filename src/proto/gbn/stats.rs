//! 协议计数器
//!
//! 只用于观测，不影响协议行为。

use serde::Serialize;

/// 发送端计数器
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SenderStats {
    /// 应用层交来的消息总数（含被丢弃的）
    pub messages_offered: u64,
    /// 窗口已满而丢弃的消息数
    pub window_full: u64,
    /// 收到的未损坏 ACK 总数
    pub total_acks_received: u64,
    /// 首次确认某个序号的 ACK 数
    pub new_acks: u64,
    /// 重复（或已滑出窗口）的 ACK 数
    pub duplicate_acks: u64,
    /// 校验失败的 ACK 数
    pub corrupted_acks: u64,
    /// 超时重传的数据包数
    pub packets_resent: u64,
}

/// 接收端计数器
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiverStats {
    /// 按序交付给应用层的数据包数
    pub packets_received: u64,
    /// 校验失败的数据包数
    pub corrupted_packets: u64,
    /// 已在缓冲区中、未重复缓存的数据包数
    pub duplicate_packets: u64,
    /// 落在接收窗口之外（已交付过）的数据包数
    pub stale_packets: u64,
    /// 发出的 ACK 数
    pub acks_sent: u64,
}
