//! 网络世界实现
//!
//! 持有发送端 A、接收端 B、信道与应用层消息源，把事件分发给对应实体。
//! 实体处理函数返回的定时器错误在这里被记录为致命错误，仿真随即停止。

use std::any::Any;

use tracing::{error, info};

use super::app::{AppConfig, AppSource, FromLayer5};
use super::channel::{Channel, ChannelConfig};
use super::id::EntityId;
use super::packet::{Message, Packet};
use super::stats::RunSummary;
use crate::error::{ConfigError, TimerError};
use crate::proto::gbn::{GbnConfig, GbnReceiver, GbnSender};
use crate::sim::{SimTime, Simulator, World};

/// 单向 Go-Back-N 仿真世界
#[derive(Debug)]
pub struct NetWorld {
    pub net: Channel,
    pub a: GbnSender,
    pub b: GbnReceiver,
    pub app: AppSource,
}

impl Default for NetWorld {
    fn default() -> Self {
        let cfg = GbnConfig::default();
        Self {
            net: Channel::default(),
            a: GbnSender::new(cfg),
            b: GbnReceiver::new(cfg),
            app: AppSource::default(),
        }
    }
}

impl NetWorld {
    /// 校验信道与应用配置并初始化两个实体（A_init / B_init）。
    pub fn new(cfg: GbnConfig, chan: ChannelConfig, app: AppConfig) -> Result<Self, ConfigError> {
        app.validate()?;
        Ok(Self {
            net: Channel::new(chan)?,
            a: GbnSender::new(cfg),
            b: GbnReceiver::new(cfg),
            app: AppSource::new(app),
        })
    }

    /// 调度第一条应用层消息（到达时间与后续间隔同分布）。
    pub fn start(&mut self, sim: &mut Simulator) {
        if self.app.exhausted() {
            return;
        }
        let first = self.app.interval(self.net.uniform());
        info!(at = ?first, messages = self.app.cfg.max_messages, "调度第一条应用层消息");
        sim.schedule_in(first, FromLayer5 { at: EntityId::A });
    }

    fn settle(&mut self, res: Result<(), TimerError>, sim: &Simulator) {
        if let Err(e) = res {
            error!(now = ?sim.now(), error = %e, "定时器使用违规，仿真中止");
            self.net.record_fatal(e);
        }
    }

    /// 包到达实体 `to`
    pub fn deliver(&mut self, to: EntityId, pkt: Packet, sim: &mut Simulator) {
        self.net.viz_arrive(sim.now(), to, &pkt);
        let res = match to {
            EntityId::A => self.a.on_input(pkt, sim, &mut self.net),
            EntityId::B => self.b.on_input(pkt, sim, &mut self.net),
        };
        self.settle(res, sim);
    }

    /// 实体 `entity` 的定时器到期
    pub fn timer_interrupt(&mut self, entity: EntityId, sim: &mut Simulator) {
        let res = match entity {
            EntityId::A => self.a.on_timer_interrupt(sim, &mut self.net),
            EntityId::B => self.b.on_timer_interrupt(sim, &mut self.net),
        };
        self.settle(res, sim);
    }

    /// 应用层在实体 `at` 交来一条消息
    pub fn app_output(&mut self, at: EntityId, msg: Message, sim: &mut Simulator) {
        let res = match at {
            EntityId::A => self.a.on_output(msg, sim, &mut self.net),
            EntityId::B => self.b.on_output(msg, sim, &mut self.net),
        };
        self.settle(res, sim);
    }

    pub fn summary(&self, now: SimTime) -> RunSummary {
        RunSummary {
            final_time: now.as_units(),
            messages_generated: self.app.generated(),
            sender: *self.a.stats(),
            receiver: *self.b.stats(),
            channel: self.net.stats,
            aborted: self.net.fatal().is_some(),
        }
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn halted(&self) -> bool {
        self.net.fatal().is_some()
    }
}
