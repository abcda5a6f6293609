use crate::error::TimerError;
use crate::net::{
    AppConfig, ChannelConfig, EntityId, Message, NOT_IN_USE, NetApi, NetWorld, PAYLOAD_LEN, Packet,
    Payload,
};
use crate::proto::gbn::{GbnConfig, compute_checksum};
use crate::sim::{Event, SimTime, Simulator, World};
use crate::viz::{VizEvent, VizLogger};

/// 记录所有调用的 `NetApi`，定时器规则与真实信道一致。
#[derive(Debug, Default)]
pub(crate) struct RecordingNet {
    pub sent: Vec<(EntityId, Packet)>,
    pub delivered: Vec<(EntityId, Payload)>,
    pub starts: Vec<(EntityId, SimTime)>,
    pub stops: Vec<EntityId>,
    running: [bool; 2],
}

impl RecordingNet {
    pub fn take_sent(&mut self) -> Vec<Packet> {
        self.sent.drain(..).map(|(_, p)| p).collect()
    }

    pub fn timer_running(&self, entity: EntityId) -> bool {
        self.running[entity.index()]
    }

    /// 模拟定时器到期：到期后定时器不再运行。
    pub fn expire(&mut self, entity: EntityId) {
        assert!(self.running[entity.index()], "no timer running for {entity}");
        self.running[entity.index()] = false;
    }
}

impl NetApi for RecordingNet {
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, _sim: &mut Simulator) {
        self.sent.push((from, pkt));
    }

    fn to_layer5(&mut self, at: EntityId, payload: Payload, _sim: &mut Simulator) {
        self.delivered.push((at, payload));
    }

    fn start_timer(
        &mut self,
        entity: EntityId,
        increment: SimTime,
        _sim: &mut Simulator,
    ) -> Result<(), TimerError> {
        if self.running[entity.index()] {
            return Err(TimerError::AlreadyRunning { entity });
        }
        self.running[entity.index()] = true;
        self.starts.push((entity, increment));
        Ok(())
    }

    fn stop_timer(&mut self, entity: EntityId, _sim: &mut Simulator) -> Result<(), TimerError> {
        if !self.running[entity.index()] {
            return Err(TimerError::NotRunning { entity });
        }
        self.running[entity.index()] = false;
        self.stops.push(entity);
        Ok(())
    }
}

/// 构造一个校验和正确的数据包
pub(crate) fn data_packet(seq: i32, byte: u8) -> Packet {
    let mut pkt = Packet {
        seq_num: seq,
        ack_num: NOT_IN_USE,
        checksum: 0,
        payload: [byte; PAYLOAD_LEN],
    };
    pkt.checksum = compute_checksum(&pkt);
    pkt
}

/// 构造一个校验和正确的 ACK 包
pub(crate) fn ack_packet(ack: i32) -> Packet {
    let mut pkt = Packet {
        seq_num: 0,
        ack_num: ack,
        checksum: 0,
        payload: [b'0'; PAYLOAD_LEN],
    };
    pkt.checksum = compute_checksum(&pkt);
    pkt
}

/// 开启事件记录的仿真世界
pub(crate) fn traced_world(cfg: GbnConfig, chan: ChannelConfig, app: AppConfig) -> NetWorld {
    let mut w = NetWorld::new(cfg, chan, app).expect("valid config");
    w.net.viz = Some(VizLogger::default());
    w
}

pub(crate) fn viz_events(w: &NetWorld) -> &[VizEvent] {
    w.net.viz.as_ref().map(|v| v.events.as_slice()).unwrap_or_default()
}

/// 事件：在指定时刻让 A 的应用层交来一条内容为 `tag` 的消息
#[derive(Debug)]
pub(crate) struct Offer {
    pub tag: u8,
}

impl Event for Offer {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        w.app_output(EntityId::A, Message::filled(self.tag), sim);
    }
}

/// 交付给 B 的载荷首字节，按交付顺序
pub(crate) fn delivered_tags(w: &NetWorld) -> Vec<u8> {
    w.net.delivered(EntityId::B).iter().map(|p| p[0]).collect()
}
