//! 信道与时钟协作方
//!
//! 单向数据流的仿真信道：按概率丢包、损坏，按随机时延投递，
//! 同一方向上未丢失的包保持发送顺序。同时管理每个实体的单次定时器。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::api::NetApi;
use super::deliver_packet::DeliverPacket;
use super::id::EntityId;
use super::packet::{Packet, Payload};
use super::stats::ChannelStats;
use super::timer::TimerExpired;
use crate::error::{ConfigError, TimerError};
use crate::sim::{SimTime, Simulator};
use crate::viz::{CorruptField, VizLogger};

/// 损坏首部时写入的值
const GARBAGE_FIELD: i32 = 999_999;
/// 单程时延下限（时间单位）
const MIN_DELAY_UNITS: f64 = 1.0;
/// 单程随机时延幅度（时间单位）
const DELAY_SPREAD_UNITS: f64 = 9.0;

/// 信道故障模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    /// 丢包概率
    pub loss_prob: f64,
    /// 损坏概率（对未丢失的包）
    pub corrupt_prob: f64,
    /// 随机数种子，相同种子得到相同的仿真
    pub seed: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        // 默认透明信道：不丢包、不损坏。
        Self {
            loss_prob: 0.0,
            corrupt_prob: 0.0,
            seed: 0,
        }
    }
}

impl ChannelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("loss_prob", self.loss_prob)?;
        check_probability("corrupt_prob", self.corrupt_prob)
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

/// 仿真信道
#[derive(Debug)]
pub struct Channel {
    cfg: ChannelConfig,
    rng: StdRng,
    /// 每个发送方向上最后一个在途包的到达时间（按发送实体下标）
    last_arrival: [SimTime; 2],
    /// 正在运行的定时器代号；`None` 表示未运行
    timers: [Option<u64>; 2],
    next_timer_gen: u64,
    delivered: [Vec<Payload>; 2],
    fatal: Option<TimerError>,
    pub stats: ChannelStats,
    pub viz: Option<VizLogger>,
}

impl Default for Channel {
    fn default() -> Self {
        Self::with_config(ChannelConfig::default())
    }
}

impl Channel {
    pub fn new(cfg: ChannelConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::with_config(cfg))
    }

    fn with_config(cfg: ChannelConfig) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(cfg.seed),
            last_arrival: [SimTime::ZERO; 2],
            timers: [None; 2],
            next_timer_gen: 0,
            delivered: [Vec::new(), Vec::new()],
            fatal: None,
            stats: ChannelStats::default(),
            viz: None,
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.cfg
    }

    /// 均匀分布 `[0, 1)` 随机数（与信道共用一个种子流）
    pub(crate) fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// 交付给 `at` 的应用层的全部载荷（按交付顺序）
    pub fn delivered(&self, at: EntityId) -> &[Payload] {
        &self.delivered[at.index()]
    }

    pub fn timer_running(&self, entity: EntityId) -> bool {
        self.timers[entity.index()].is_some()
    }

    /// 已记录的致命错误（定时器违规）
    pub fn fatal(&self) -> Option<TimerError> {
        self.fatal
    }

    pub(crate) fn record_fatal(&mut self, err: TimerError) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
    }

    /// 定时器事件到期：仅当代号仍是当前运行的定时器时返回 true。
    pub(crate) fn expire_timer(&mut self, entity: EntityId, generation: u64, now: SimTime) -> bool {
        let slot = &mut self.timers[entity.index()];
        if *slot != Some(generation) {
            trace!(%entity, generation, "过期的定时器事件（已被取消），忽略");
            return false;
        }
        *slot = None;
        self.viz_timer_expire(now, entity);
        true
    }

    /// 以 `corrupt_prob` 的概率损坏包，返回被改动的字段
    fn maybe_corrupt(&mut self, pkt: &mut Packet) -> Option<CorruptField> {
        if !self.rng.gen_bool(self.cfg.corrupt_prob) {
            return None;
        }
        let x = self.uniform();
        let field = if x < 0.75 {
            pkt.payload[0] = b'Z';
            CorruptField::Payload
        } else if x < 0.875 {
            pkt.seq_num = GARBAGE_FIELD;
            CorruptField::SeqNum
        } else {
            pkt.ack_num = GARBAGE_FIELD;
            CorruptField::AckNum
        };
        Some(field)
    }
}

impl NetApi for Channel {
    #[tracing::instrument(skip(self, pkt, sim), fields(seq = pkt.seq_num, ack = pkt.ack_num))]
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator) {
        let now = sim.now();
        self.stats.to_layer3 += 1;
        self.viz_to_layer3(now, from, &pkt);

        if self.rng.gen_bool(self.cfg.loss_prob) {
            self.stats.lost += 1;
            debug!(now = ?now, "信道丢包");
            self.viz_lost(now, from, &pkt);
            return;
        }

        // 信道持有副本，发送端缓存的原件保持不变。
        let mut copy = pkt;
        if let Some(field) = self.maybe_corrupt(&mut copy) {
            self.stats.corrupted += 1;
            debug!(now = ?now, ?field, "信道损坏数据包");
            self.viz_corrupted(now, from, field, &copy);
        }

        // 同一方向 FIFO：到达时间不早于上一个在途包。
        let lane = from.index();
        let base = now.max(self.last_arrival[lane]);
        let delay = MIN_DELAY_UNITS + DELAY_SPREAD_UNITS * self.uniform();
        let arrive = base.saturating_add(SimTime::from_units(delay));
        self.last_arrival[lane] = arrive;

        trace!(now = ?now, base = ?base, arrive = ?arrive, "调度数据包到达事件");
        sim.schedule(
            arrive,
            DeliverPacket {
                to: from.peer(),
                pkt: copy,
            },
        );
    }

    fn to_layer5(&mut self, at: EntityId, payload: Payload, sim: &mut Simulator) {
        self.stats.to_layer5 += 1;
        self.viz_to_layer5(sim.now(), at, &payload);
        self.delivered[at.index()].push(payload);
    }

    fn start_timer(
        &mut self,
        entity: EntityId,
        increment: SimTime,
        sim: &mut Simulator,
    ) -> Result<(), TimerError> {
        let slot = &mut self.timers[entity.index()];
        if slot.is_some() {
            return Err(TimerError::AlreadyRunning { entity });
        }
        let generation = self.next_timer_gen;
        self.next_timer_gen = self.next_timer_gen.wrapping_add(1);
        *slot = Some(generation);

        trace!(%entity, generation, increment = ?increment, "启动定时器");
        self.viz_timer_start(sim.now(), entity, increment);
        sim.schedule_in(increment, TimerExpired { entity, generation });
        Ok(())
    }

    fn stop_timer(&mut self, entity: EntityId, sim: &mut Simulator) -> Result<(), TimerError> {
        match self.timers[entity.index()].take() {
            Some(generation) => {
                trace!(%entity, generation, "停止定时器");
                self.viz_timer_stop(sim.now(), entity);
                Ok(())
            }
            None => Err(TimerError::NotRunning { entity }),
        }
    }
}
