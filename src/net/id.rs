//! 实体标识符
//!
//! 单向传输中只有两个实体：发送端 A 与接收端 B。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 协议实体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityId {
    A,
    B,
}

impl EntityId {
    /// 对端实体（数据包的目的地）
    pub fn peer(self) -> EntityId {
        match self {
            EntityId::A => EntityId::B,
            EntityId::B => EntityId::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EntityId::A => 0,
            EntityId::B => 1,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::A => f.write_str("A"),
            EntityId::B => f.write_str("B"),
        }
    }
}
