//! 校验和
//!
//! 发送端与接收端共用的纯函数：`seq + ack + Σ payload`。
//! 加法校验和无法发现所有损坏组合（例如字节互换），这是协议接受的局限。

use crate::net::Packet;

/// 计算数据包的校验和（不读取 `checksum` 字段本身）
pub fn compute_checksum(pkt: &Packet) -> i32 {
    pkt.payload
        .iter()
        .fold(pkt.seq_num.wrapping_add(pkt.ack_num), |acc, &b| {
            acc.wrapping_add(i32::from(b))
        })
}

/// 校验和不匹配即视为损坏
pub fn is_corrupted(pkt: &Packet) -> bool {
    pkt.checksum != compute_checksum(pkt)
}
