//! 数据包类型
//!
//! 定义信道上传输的数据包与应用层消息。两者载荷均为定长 20 字节。

/// 载荷长度（字节）
pub const PAYLOAD_LEN: usize = 20;

/// 首部中未使用字段的填充值
pub const NOT_IN_USE: i32 = -1;

/// 定长载荷
pub type Payload = [u8; PAYLOAD_LEN];

/// 应用层（layer 5）交给发送端的消息，本身没有序号。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub data: Payload,
}

impl Message {
    /// 用同一个字节填满整个载荷
    pub fn filled(byte: u8) -> Self {
        Self {
            data: [byte; PAYLOAD_LEN],
        }
    }
}

/// 网络数据包（layer 3 单元）
///
/// 字段用 `i32`：`ack_num` 可能是 [`NOT_IN_USE`]，信道损坏时也可能写入任意值。
/// 交给信道后由信道持有副本，发送端窗口里的原件不会被修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub seq_num: i32,
    pub ack_num: i32,
    pub checksum: i32,
    pub payload: Payload,
}

impl Packet {
    /// 载荷首字节，作为日志里的可读标签
    pub fn tag(&self) -> char {
        self.payload[0] as char
    }
}
