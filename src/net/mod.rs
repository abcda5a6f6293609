//! 网络（信道/时钟协作方）模块
//!
//! 协议实体之外的一切：数据包模型、信道故障模型、定时器、应用层消息源，
//! 以及把它们装配在一起的仿真世界。

mod api;
mod app;
mod channel;
mod channel_viz;
mod deliver_packet;
mod id;
mod net_world;
mod packet;
mod stats;
mod timer;

pub use api::NetApi;
pub use app::{AppConfig, AppSource, FromLayer5};
pub use channel::{Channel, ChannelConfig};
pub use deliver_packet::DeliverPacket;
pub use id::EntityId;
pub use net_world::NetWorld;
pub use packet::{Message, NOT_IN_USE, PAYLOAD_LEN, Packet, Payload};
pub use stats::{ChannelStats, RunSummary};
pub use timer::TimerExpired;
