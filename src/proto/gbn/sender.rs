//! 发送端（实体 A）
//!
//! 环形窗口缓存已发送未确认的数据包；按序号记录确认标志；
//! 单个定时器在窗口非空时运行，超时后重传窗口内所有未确认包。
//!
//! 确认按包（而不是累计）记录，窗口只越过从首包开始的连续已确认前缀，
//! 遇到第一个未确认的"空洞"即停止。

use tracing::{debug, trace};

use crate::error::TimerError;
use crate::net::{EntityId, Message, NOT_IN_USE, NetApi, Packet};
use crate::sim::Simulator;

use super::checksum::{compute_checksum, is_corrupted};
use super::config::GbnConfig;
use super::seq::SeqSpace;
use super::stats::SenderStats;

/// 窗口中的一个槽位
#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: usize,
    pkt: Packet,
}

#[derive(Debug, Clone)]
pub struct GbnSender {
    id: EntityId,
    cfg: GbnConfig,
    space: SeqSpace,
    next_seq: usize,
    window: Vec<Option<InFlight>>,
    first: usize,
    count: usize,
    acked: Vec<bool>,
    stats: SenderStats,
}

impl GbnSender {
    /// A_init：序号从 0 开始，窗口为空，所有确认标志清零。
    pub fn new(cfg: GbnConfig) -> Self {
        let space = cfg.seq_space();
        Self {
            id: EntityId::A,
            cfg,
            space,
            next_seq: 0,
            window: vec![None; cfg.window_size()],
            first: 0,
            count: 0,
            acked: vec![false; space.size()],
            stats: SenderStats::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn config(&self) -> &GbnConfig {
        &self.cfg
    }

    pub fn next_seq(&self) -> usize {
        self.next_seq
    }

    /// 窗口中的包数（已发送且尚未滑出）
    pub fn window_count(&self) -> usize {
        self.count
    }

    /// 窗口首包在环形缓冲中的下标
    pub fn window_first(&self) -> usize {
        self.first
    }

    pub fn is_window_full(&self) -> bool {
        self.count == self.cfg.window_size()
    }

    pub fn is_acked(&self, seq: usize) -> bool {
        self.acked.get(seq).copied().unwrap_or(false)
    }

    pub fn stats(&self) -> &SenderStats {
        &self.stats
    }

    /// 按发送顺序遍历窗口中的包
    pub fn in_flight(&self) -> impl Iterator<Item = &Packet> + '_ {
        (0..self.count).filter_map(move |i| {
            self.window[self.slot(i)].as_ref().map(|f| &f.pkt)
        })
    }

    /// 窗口首包的序号；窗口为空时等于 `next_seq`。
    fn base_seq(&self) -> usize {
        let size = self.space.size();
        (self.next_seq + size - self.count) % size
    }

    fn slot(&self, i: usize) -> usize {
        (self.first + i) % self.cfg.window_size()
    }

    fn window_contains(&self, seq: usize) -> bool {
        self.count > 0 && self.space.distance(self.base_seq(), seq) < self.count
    }

    /// A_output：应用层有新消息要发送。
    ///
    /// 窗口已满时消息被丢弃（计入 `window_full`），不排队也不重试。
    #[tracing::instrument(skip(self, msg, sim, net), fields(next_seq = self.next_seq, count = self.count))]
    pub fn on_output(
        &mut self,
        msg: Message,
        sim: &mut Simulator,
        net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        self.stats.messages_offered += 1;

        if self.is_window_full() {
            self.stats.window_full += 1;
            debug!(now = ?sim.now(), "发送窗口已满，丢弃消息");
            return Ok(());
        }

        let seq = self.next_seq;
        let mut pkt = Packet {
            seq_num: seq as i32,
            ack_num: NOT_IN_USE,
            checksum: 0,
            payload: msg.data,
        };
        pkt.checksum = compute_checksum(&pkt);

        let slot = self.slot(self.count);
        self.window[slot] = Some(InFlight { seq, pkt });
        self.count += 1;
        self.acked[seq] = false;

        debug!(now = ?sim.now(), seq, tag = %pkt.tag(), "发送数据包");
        net.to_layer3(self.id, pkt, sim);

        if self.count == 1 {
            net.start_timer(self.id, self.cfg.rtt(), sim)?;
        }

        self.next_seq = self.space.next(self.next_seq);
        Ok(())
    }

    /// A_input：收到 ACK。
    ///
    /// 损坏或重复的 ACK 被忽略；新 ACK 置位确认标志并滑动窗口，
    /// 然后停止定时器，窗口仍非空时重新计时一个完整 RTT。
    #[tracing::instrument(skip(self, pkt, sim, net), fields(ack = pkt.ack_num, count = self.count))]
    pub fn on_input(
        &mut self,
        pkt: Packet,
        sim: &mut Simulator,
        net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        let ack = match self.space.index(pkt.ack_num) {
            Some(ack) if !is_corrupted(&pkt) => ack,
            _ => {
                self.stats.corrupted_acks += 1;
                debug!(now = ?sim.now(), "收到损坏的 ACK，忽略");
                return Ok(());
            }
        };
        self.stats.total_acks_received += 1;

        if self.acked[ack] || !self.window_contains(ack) {
            self.stats.duplicate_acks += 1;
            debug!(now = ?sim.now(), ack, "重复 ACK，忽略");
            return Ok(());
        }

        self.acked[ack] = true;
        self.stats.new_acks += 1;
        debug!(now = ?sim.now(), ack, "收到新 ACK");

        self.slide();

        net.stop_timer(self.id, sim)?;
        if self.count > 0 {
            net.start_timer(self.id, self.cfg.rtt(), sim)?;
        }
        Ok(())
    }

    /// 移除窗口首部连续的已确认包；腾出的槽位与确认标志立即清空。
    fn slide(&mut self) {
        while self.count > 0 {
            let Some(head) = self.window[self.first] else {
                break;
            };
            if !self.acked[head.seq] {
                break;
            }
            trace!(seq = head.seq, "窗口滑动，移除数据包");
            self.acked[head.seq] = false;
            self.window[self.first] = None;
            self.first = (self.first + 1) % self.cfg.window_size();
            self.count -= 1;
        }
    }

    /// A_timerinterrupt：重传窗口内所有未确认的包，并无条件重启定时器。
    #[tracing::instrument(skip(self, sim, net), fields(count = self.count))]
    pub fn on_timer_interrupt(
        &mut self,
        sim: &mut Simulator,
        net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        debug!(now = ?sim.now(), "定时器超时，重传未确认的包");

        for i in 0..self.count {
            let Some(f) = self.window[self.slot(i)] else {
                continue;
            };
            if self.acked[f.seq] {
                continue;
            }
            debug!(seq = f.seq, "重传数据包");
            net.to_layer3(self.id, f.pkt, sim);
            self.stats.packets_resent += 1;
        }

        net.start_timer(self.id, self.cfg.rtt(), sim)
    }
}
