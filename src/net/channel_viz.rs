//! Visualization hooks for the channel.

use crate::sim::SimTime;
use crate::viz::{CorruptField, VizEvent, VizEventKind, VizPacket};

use super::{Channel, EntityId, Packet, Payload};

impl Channel {
    fn viz_push(&mut self, now: SimTime, entity: EntityId, kind: VizEventKind) {
        if let Some(v) = &mut self.viz {
            v.push(VizEvent {
                t: now.as_units(),
                entity,
                kind,
            });
        }
    }

    pub(crate) fn viz_to_layer3(&mut self, now: SimTime, from: EntityId, pkt: &Packet) {
        self.viz_push(now, from, VizEventKind::ToLayer3(VizPacket::from(pkt)));
    }

    pub(crate) fn viz_lost(&mut self, now: SimTime, from: EntityId, pkt: &Packet) {
        self.viz_push(now, from, VizEventKind::Lost(VizPacket::from(pkt)));
    }

    pub(crate) fn viz_corrupted(&mut self, now: SimTime, from: EntityId, field: CorruptField, pkt: &Packet) {
        self.viz_push(
            now,
            from,
            VizEventKind::Corrupted {
                field,
                pkt: VizPacket::from(pkt),
            },
        );
    }

    pub(crate) fn viz_arrive(&mut self, now: SimTime, at: EntityId, pkt: &Packet) {
        self.viz_push(now, at, VizEventKind::Arrive(VizPacket::from(pkt)));
    }

    pub(crate) fn viz_to_layer5(&mut self, now: SimTime, at: EntityId, payload: &Payload) {
        if self.viz.is_none() {
            return;
        }
        let payload = String::from_utf8_lossy(payload).into_owned();
        self.viz_push(now, at, VizEventKind::ToLayer5 { payload });
    }

    pub(crate) fn viz_timer_start(&mut self, now: SimTime, entity: EntityId, increment: SimTime) {
        self.viz_push(
            now,
            entity,
            VizEventKind::TimerStart {
                increment: increment.as_units(),
            },
        );
    }

    pub(crate) fn viz_timer_stop(&mut self, now: SimTime, entity: EntityId) {
        self.viz_push(now, entity, VizEventKind::TimerStop);
    }

    pub(crate) fn viz_timer_expire(&mut self, now: SimTime, entity: EntityId) {
        self.viz_push(now, entity, VizEventKind::TimerExpire);
    }
}
