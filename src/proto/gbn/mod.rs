//! Go-Back-N 风格 ARQ 协议
//!
//! - [`GbnSender`]：窗口发送、按包确认、超时重传
//! - [`GbnReceiver`]：乱序缓存、按序交付、逐包确认
//! - [`checksum`]：双方共用的加法校验和
//!
//! 两个实体各自拥有全部状态，只通过 [`crate::net::NetApi`] 与信道/时钟交互。

pub mod checksum;
mod config;
mod receiver;
mod sender;
mod seq;
mod stats;

pub use checksum::{compute_checksum, is_corrupted};
pub use config::{DEFAULT_RTT_UNITS, DEFAULT_SEQ_SPACE, DEFAULT_WINDOW_SIZE, GbnConfig};
pub use receiver::GbnReceiver;
pub use sender::GbnSender;
pub use seq::SeqSpace;
pub use stats::{ReceiverStats, SenderStats};
