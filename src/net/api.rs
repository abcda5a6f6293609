//! Network-facing API used by protocol entities.
//!
//! The sender and receiver never touch the scheduler or the channel model
//! directly; everything goes through this trait so that tests can swap in a
//! recording implementation.

use crate::error::TimerError;
use crate::sim::{SimTime, Simulator};

use super::{EntityId, Packet, Payload};

/// Minimal layer-3 / layer-5 / timer API for protocol entities.
pub trait NetApi {
    /// Hand a packet to the (lossy, corrupting) channel towards the peer.
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator);

    /// Deliver an in-order payload to the application at `at`.
    fn to_layer5(&mut self, at: EntityId, payload: Payload, sim: &mut Simulator);

    /// Start the single-shot timer of `entity`; fails if one is already running.
    fn start_timer(
        &mut self,
        entity: EntityId,
        increment: SimTime,
        sim: &mut Simulator,
    ) -> Result<(), TimerError>;

    /// Cancel the running timer of `entity`; fails if none is running.
    fn stop_timer(&mut self, entity: EntityId, sim: &mut Simulator) -> Result<(), TimerError>;
}
