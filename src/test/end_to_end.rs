//! 完整仿真：信道、定时器、应用层消息源与两个实体一起运行。

use super::support::{Offer, delivered_tags, traced_world};
use crate::net::{AppConfig, ChannelConfig, EntityId, NetApi, NetWorld};
use crate::proto::gbn::GbnConfig;
use crate::sim::{SimTime, Simulator};

fn patient() -> GbnConfig {
    GbnConfig::new(200.0, 6, 7).expect("valid config")
}

fn offers_at(sim: &mut Simulator, spacing: f64, tags: &[u8]) {
    for (i, &tag) in tags.iter().enumerate() {
        sim.schedule(SimTime::from_units(spacing * i as f64), Offer { tag });
    }
}

fn assert_idle(w: &NetWorld, sim: &Simulator) {
    assert_eq!(sim.pending(), 0);
    assert_eq!(w.a.window_count(), 0);
    assert!(!w.net.timer_running(EntityId::A));
    assert!(w.net.fatal().is_none());
}

#[test]
fn spaced_messages_are_delivered_exactly_once_in_order() {
    let mut w = traced_world(GbnConfig::default(), ChannelConfig::default(), AppConfig::default());
    let mut sim = Simulator::default();
    offers_at(&mut sim, 100.0, b"abcdefghijklmnop");
    sim.run(&mut w);

    assert_eq!(delivered_tags(&w), b"abcdefghijklmnop".to_vec());
    assert_eq!(w.b.stats().packets_received, 16);
    assert_eq!(w.net.stats.to_layer5, 16);
    assert_idle(&w, &sim);
}

#[test]
fn burst_beyond_window_drops_excess_messages() {
    let mut w = traced_world(patient(), ChannelConfig::default(), AppConfig::default());
    let mut sim = Simulator::default();
    offers_at(&mut sim, 0.0, b"abcdefghij");
    sim.run(&mut w);

    assert_eq!(delivered_tags(&w), b"abcdef".to_vec());
    assert_eq!(w.a.stats().messages_offered, 10);
    assert_eq!(w.a.stats().window_full, 4);
    assert_eq!(w.a.stats().packets_resent, 0);
    assert_idle(&w, &sim);
}

#[test]
fn generated_messages_arrive_in_generation_order_on_clean_channel() {
    let app = AppConfig {
        max_messages: 26,
        mean_interval: 10.0,
    };
    let mut w = NetWorld::new(patient(), ChannelConfig::default(), app).expect("valid config");
    let mut sim = Simulator::default();
    w.start(&mut sim);
    sim.run(&mut w);

    assert_eq!(w.app.generated(), 26);
    assert_eq!(w.a.stats().messages_offered, 26);

    // 窗口满时被丢弃的消息留下空缺，但剩下的顺序不变且不重复。
    let tags = delivered_tags(&w);
    assert!(tags.windows(2).all(|p| p[0] < p[1]), "{tags:?}");
    assert_eq!(tags.len() as u64 + w.a.stats().window_full, 26);
    assert_idle(&w, &sim);
}

#[test]
fn lossy_run_completes_with_consistent_counters() {
    let chan = ChannelConfig {
        loss_prob: 0.1,
        corrupt_prob: 0.1,
        seed: 3,
    };
    let app = AppConfig {
        max_messages: 50,
        mean_interval: 10.0,
    };
    let mut w = NetWorld::new(GbnConfig::default(), chan, app).expect("valid config");
    let mut sim = Simulator::default();
    w.start(&mut sim);
    sim.run(&mut w);

    assert_idle(&w, &sim);
    let s = w.summary(sim.now());
    assert!(!s.aborted);
    assert_eq!(s.messages_generated, 50);
    assert_eq!(s.final_time, sim.now().as_units());

    // 每个到达 B 的数据包恰好产生一个 ACK。
    let data_sent = s.sender.messages_offered - s.sender.window_full + s.sender.packets_resent;
    assert_eq!(s.channel.to_layer3, data_sent + s.receiver.acks_sent);

    // 所有未丢失的包都已到达，且每个损坏都被检测出来。
    let arrived = s.receiver.acks_sent + s.sender.total_acks_received + s.sender.corrupted_acks;
    assert_eq!(s.channel.to_layer3 - s.channel.lost, arrived);
    assert_eq!(
        s.channel.corrupted,
        s.receiver.corrupted_packets + s.sender.corrupted_acks
    );

    assert_eq!(s.channel.to_layer5, s.receiver.packets_received);
    assert_eq!(w.net.delivered(EntityId::B).len() as u64, s.receiver.packets_received);
    assert!(s.receiver.packets_received > 0);
    assert_eq!(s.sender.new_acks + s.sender.duplicate_acks, s.sender.total_acks_received);
}

#[test]
fn timer_violation_aborts_the_run() {
    let mut w = traced_world(patient(), ChannelConfig::default(), AppConfig::default());
    let mut sim = Simulator::default();

    // 外部抢先启动 A 的定时器，A 发第一个包时再次启动即违规。
    w.net
        .start_timer(EntityId::A, SimTime::from_units(1.0), &mut sim)
        .expect("start");
    offers_at(&mut sim, 0.0, b"ab");
    sim.run(&mut w);

    assert!(w.net.fatal().is_some());
    assert!(w.summary(sim.now()).aborted);
    assert_eq!(sim.executed(), 1);
    assert!(sim.pending() > 0);
    assert_eq!(w.a.stats().messages_offered, 1);
}
