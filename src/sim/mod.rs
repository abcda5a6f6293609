//! 仿真核心模块
//!
//! 事件驱动仿真的时钟与调度器：仿真时间、事件、世界和仿真器。
//! 协议实体（发送端 A、接收端 B）只通过 [`Event`] 被驱动，不直接持有时钟。

mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::{SimTime, TICKS_PER_UNIT};
pub use world::World;
