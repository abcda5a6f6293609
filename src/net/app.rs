//! 应用层消息源（layer 5）
//!
//! 按平均间隔随机产生消息交给发送端；第 n 条消息的 20 个字节都是
//! `'a' + n mod 26`，便于在接收端核对交付顺序。

use tracing::debug;

use super::id::EntityId;
use super::net_world::NetWorld;
use super::packet::Message;
use crate::error::ConfigError;
use crate::sim::{Event, SimTime, Simulator, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    /// 总共产生的消息数
    pub max_messages: u64,
    /// 相邻两条消息的平均间隔（时间单位）
    pub mean_interval: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_messages: 10,
            mean_interval: 10.0,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mean_interval > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositiveInterval(self.mean_interval))
        }
    }
}

/// 应用层消息源状态
#[derive(Debug, Clone, Default)]
pub struct AppSource {
    pub cfg: AppConfig,
    generated: u64,
}

impl AppSource {
    pub fn new(cfg: AppConfig) -> Self {
        Self { cfg, generated: 0 }
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn exhausted(&self) -> bool {
        self.generated >= self.cfg.max_messages
    }

    /// 第 `n` 条消息的内容
    pub fn message(n: u64) -> Message {
        Message::filled(b'a' + (n % 26) as u8)
    }

    pub(crate) fn next_message(&mut self) -> Message {
        let msg = Self::message(self.generated);
        self.generated += 1;
        msg
    }

    /// 下一条消息到来的间隔：`[0, 2·mean)` 均匀分布
    pub(crate) fn interval(&self, uniform: f64) -> SimTime {
        SimTime::from_units(self.cfg.mean_interval * 2.0 * uniform)
    }
}

/// 事件：应用层在实体 `at` 产生一条新消息。
#[derive(Debug)]
pub struct FromLayer5 {
    pub at: EntityId,
}

impl Event for FromLayer5 {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let FromLayer5 { at } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        if w.app.exhausted() {
            return;
        }
        let msg = w.app.next_message();
        debug!(now = ?sim.now(), n = w.app.generated(), tag = %(msg.data[0] as char), "应用层产生消息");
        w.app_output(at, msg, sim);

        if !w.app.exhausted() {
            let gap = w.app.interval(w.net.uniform());
            sim.schedule_in(gap, FromLayer5 { at });
        }
    }
}
