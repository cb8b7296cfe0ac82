//! EventStream: ordered push delivery of engine events
//!
//! One stream per room/tournament. Every published event gets the next
//! sequence number, is appended to the trace and fanned out to subscribers.

use crossbeam_channel::{Receiver, Sender};

use crate::event::{EventRecord, GameEvent};
use crate::trace::RoomTrace;

pub struct EventStream {
    next_seq: u64,
    subscribers: Vec<Sender<EventRecord>>,
    trace: RoomTrace,
}

impl EventStream {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            next_seq: 0,
            subscribers: Vec::new(),
            trace: RoomTrace::new(trace_id),
        }
    }

    /// New receiver for every event published from now on
    pub fn subscribe(&mut self) -> Receiver<EventRecord> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Stamp, record and deliver an event
    pub fn publish(&mut self, timestamp_ms: u64, round: u32, event: GameEvent) -> EventRecord {
        let record = EventRecord {
            seq: self.next_seq,
            timestamp_ms,
            round,
            event,
        };
        self.next_seq += 1;

        // Disconnected receivers are dropped
        self.subscribers.retain(|tx| tx.send(record.clone()).is_ok());
        self.trace.push(record.clone());
        record
    }

    pub fn trace(&self) -> &RoomTrace {
        &self.trace
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.trace.events.last()
    }
}
