//! 定时器到期事件
//!
//! 每次 `start_timer` 产生一个带代号的事件；`stop_timer` 只清空槽位，
//! 已排队的事件在执行时发现代号不匹配即作废。

use super::id::EntityId;
use super::net_world::NetWorld;
use crate::sim::{Event, Simulator, World};

#[derive(Debug)]
pub struct TimerExpired {
    pub entity: EntityId,
    pub generation: u64,
}

impl Event for TimerExpired {
    #[tracing::instrument(skip(self, sim, world), fields(entity = %self.entity, generation = self.generation))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TimerExpired { entity, generation } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        if w.net.expire_timer(entity, generation, sim.now()) {
            w.timer_interrupt(entity, sim);
        }
    }
}
