//! 接收端（实体 B）
//!
//! 按序号缓存收到的包，只把从 `expected_seq` 开始连续的包交付给应用层。
//! 每收到一个包就回一个 ACK：未损坏时确认该包自己的序号（即使乱序），
//! 损坏时重复确认最后一个按序交付的序号。
//!
//! 只缓存接收窗口 `[expected_seq, expected_seq + WINDOWSIZE)` 内的包；
//! 窗口外的包是已交付过的旧包，照常确认但不缓存。

use tracing::debug;

use crate::error::TimerError;
use crate::net::{EntityId, Message, NetApi, PAYLOAD_LEN, Packet};
use crate::sim::Simulator;

use super::checksum::{compute_checksum, is_corrupted};
use super::config::GbnConfig;
use super::seq::SeqSpace;
use super::stats::ReceiverStats;

/// ACK 包的占位载荷
const ACK_FILLER: u8 = b'0';

#[derive(Debug, Clone)]
pub struct GbnReceiver {
    id: EntityId,
    space: SeqSpace,
    window_size: usize,
    expected_seq: usize,
    /// ACK 包自己的序号，在 0/1 之间交替，与数据序号空间无关
    ack_seq: i32,
    /// `Some` 即"已收到"标志，槽位总是存放同序号的包
    buffer: Vec<Option<Packet>>,
    stats: ReceiverStats,
}

impl GbnReceiver {
    /// B_init：期望序号 0，ACK 序号从 1 开始，缓冲区为空。
    pub fn new(cfg: GbnConfig) -> Self {
        let space = cfg.seq_space();
        Self {
            id: EntityId::B,
            space,
            window_size: cfg.window_size(),
            expected_seq: 0,
            ack_seq: 1,
            buffer: vec![None; space.size()],
            stats: ReceiverStats::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn expected_seq(&self) -> usize {
        self.expected_seq
    }

    pub fn ack_seq(&self) -> i32 {
        self.ack_seq
    }

    pub fn is_buffered(&self, seq: usize) -> bool {
        self.buffer.get(seq).is_some_and(Option::is_some)
    }

    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }

    /// B_input：收到数据包，必要时按序交付，并回一个 ACK。
    #[tracing::instrument(skip(self, pkt, sim, net), fields(seq = pkt.seq_num, expected = self.expected_seq))]
    pub fn on_input(
        &mut self,
        pkt: Packet,
        sim: &mut Simulator,
        net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        let ack_num = match self.space.index(pkt.seq_num) {
            Some(seq) if !is_corrupted(&pkt) => {
                self.accept(seq, pkt, sim, net);
                seq
            }
            _ => {
                self.stats.corrupted_packets += 1;
                debug!(now = ?sim.now(), "收到损坏的数据包，重复确认最后按序交付的序号");
                self.space.prev(self.expected_seq)
            }
        };

        self.send_ack(ack_num, sim, net);
        Ok(())
    }

    /// `seq` 是否落在以 `expected_seq` 起始、长度为窗口大小的接收窗口内
    fn in_receive_window(&self, seq: usize) -> bool {
        self.space.distance(self.expected_seq, seq) < self.window_size
    }

    fn accept(&mut self, seq: usize, pkt: Packet, sim: &mut Simulator, net: &mut dyn NetApi) {
        if !self.in_receive_window(seq) {
            // 已交付过的旧包（例如超时重传）：不缓存，否则序号回绕后会被当作新数据交付。
            self.stats.stale_packets += 1;
            debug!(now = ?sim.now(), seq, "旧数据包，只回 ACK");
            return;
        }
        if self.buffer[seq].is_some() {
            self.stats.duplicate_packets += 1;
            debug!(now = ?sim.now(), seq, "数据包已在缓冲区中");
        } else {
            self.buffer[seq] = Some(pkt);
        }

        while let Some(buffered) = self.buffer[self.expected_seq].take() {
            debug!(now = ?sim.now(), seq = self.expected_seq, tag = %buffered.tag(), "按序交付给应用层");
            net.to_layer5(self.id, buffered.payload, sim);
            self.expected_seq = self.space.next(self.expected_seq);
            self.stats.packets_received += 1;
        }
    }

    fn send_ack(&mut self, ack_num: usize, sim: &mut Simulator, net: &mut dyn NetApi) {
        let mut ack = Packet {
            seq_num: self.ack_seq,
            ack_num: ack_num as i32,
            checksum: 0,
            payload: [ACK_FILLER; PAYLOAD_LEN],
        };
        ack.checksum = compute_checksum(&ack);
        self.ack_seq = (self.ack_seq + 1) % 2;

        debug!(now = ?sim.now(), ack = ack_num, "发送 ACK");
        net.to_layer3(self.id, ack, sim);
        self.stats.acks_sent += 1;
    }

    /// B_output：单向传输中接收端不产生应用数据。
    pub fn on_output(
        &mut self,
        _msg: Message,
        _sim: &mut Simulator,
        _net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        Ok(())
    }

    /// B_timerinterrupt：接收端没有定时器。
    pub fn on_timer_interrupt(
        &mut self,
        _sim: &mut Simulator,
        _net: &mut dyn NetApi,
    ) -> Result<(), TimerError> {
        Ok(())
    }
}
