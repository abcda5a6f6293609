use serde::{Deserialize, Serialize};

use crate::net::{EntityId, Packet};

/// 可视化事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 实体把包交给信道
    ToLayer3(VizPacket),
    /// 信道丢弃了该包
    Lost(VizPacket),
    /// 信道损坏了该包（记录损坏后的首部）
    Corrupted {
        field: CorruptField,
        pkt: VizPacket,
    },
    /// 包到达对端实体
    Arrive(VizPacket),
    /// 载荷交付给应用层
    ToLayer5 { payload: String },
    /// 定时器启动
    TimerStart { increment: f64 },
    /// 定时器被取消
    TimerStop,
    /// 定时器到期
    TimerExpire,
}

/// 信道损坏的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptField {
    Payload,
    SeqNum,
    AckNum,
}

/// 与数据包首部有关的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizPacket {
    pub seq_num: i32,
    pub ack_num: i32,
    pub checksum: i32,
}

impl From<&Packet> for VizPacket {
    fn from(pkt: &Packet) -> Self {
        Self {
            seq_num: pkt.seq_num,
            ack_num: pkt.ack_num,
            checksum: pkt.checksum,
        }
    }
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（时间单位，和 `SimTime::as_units` 同口径）
    pub t: f64,
    /// 事件发生所在的实体
    pub entity: EntityId,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
