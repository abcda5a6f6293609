//! 事件 trait
//!
//! 定义仿真事件接口：数据包到达、定时器到期、应用层产生消息都实现它。

use super::simulator::Simulator;
use super::world::World;

/// 事件：可被调度执行，执行时一次性运行完毕（不会被其他事件抢占）。
///
/// 使用 `self: Box<Self>` 以便事件把携带的数据包 move 给协议实体。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}
