//! 数据包交付事件
//!
//! 信道调度的"到达"事件：把包交给目的实体的 input 处理函数。

use super::id::EntityId;
use super::net_world::NetWorld;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};
use tracing::trace;

/// 事件：把一个 packet 交给某个实体处理。
#[derive(Debug)]
pub struct DeliverPacket {
    pub to: EntityId,
    pub pkt: Packet,
}

impl Event for DeliverPacket {
    #[tracing::instrument(skip(self, sim, world), fields(to = %self.to, seq = self.pkt.seq_num, ack = self.pkt.ack_num))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverPacket { to, pkt } = *self;

        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.deliver(to, pkt, sim);

        trace!("DeliverPacket::execute 完成");
    }
}
