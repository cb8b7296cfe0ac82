//! RoomTrace: the complete ordered event history of one room or tournament

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{EventRecord, GameEvent};
use crate::phase::RoomPhase;
use crate::taxonomy::RoundResult;

/// Ordered history of events for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTrace {
    /// Session identifier (room id or tournament id)
    pub trace_id: String,

    /// All records in publication order
    pub events: Vec<EventRecord>,

    /// When the trace was started
    pub recorded_at: DateTime<Utc>,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RoomTrace {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn push(&mut self, record: EventRecord) {
        self.events.push(record);
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records of one event type
    pub fn events_by_type(&self, type_name: &str) -> Vec<&EventRecord> {
        self.events
            .iter()
            .filter(|r| r.type_name() == type_name)
            .collect()
    }

    pub fn count(&self, type_name: &str) -> usize {
        self.events.iter().filter(|r| r.type_name() == type_name).count()
    }

    pub fn has_event(&self, type_name: &str) -> bool {
        self.events.iter().any(|r| r.type_name() == type_name)
    }

    pub fn find<F>(&self, predicate: F) -> Option<&EventRecord>
    where
        F: Fn(&EventRecord) -> bool,
    {
        self.events.iter().find(|r| predicate(r))
    }

    /// Sequence of room phases entered, in order
    pub fn phases(&self) -> Vec<RoomPhase> {
        self.events
            .iter()
            .filter_map(|r| match &r.event {
                GameEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    /// All round results, in order
    pub fn results(&self) -> Vec<&RoundResult> {
        self.events
            .iter()
            .filter_map(|r| match &r.event {
                GameEvent::RoundResolved { result } => Some(result),
                _ => None,
            })
            .collect()
    }

    /// Check ordering guarantees of the stream
    pub fn validate(&self) -> TraceValidation {
        let seq_strictly_increasing = self.events.windows(2).all(|w| w[0].seq < w[1].seq);
        let time_monotonic = self
            .events
            .windows(2)
            .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms);

        // Within a round, commit < spin start < resolution
        let mut commit_before_spin = true;
        let mut spin_before_result = true;
        let mut committed_rounds = Vec::new();
        let mut spun_rounds = Vec::new();
        for record in &self.events {
            match &record.event {
                GameEvent::OutcomeCommitted { .. } => committed_rounds.push(record.round),
                GameEvent::SpinStarted { .. } => {
                    if !committed_rounds.contains(&record.round) {
                        commit_before_spin = false;
                    }
                    spun_rounds.push(record.round);
                }
                GameEvent::RoundResolved { .. } => {
                    if !spun_rounds.contains(&record.round) {
                        spin_before_result = false;
                    }
                }
                _ => {}
            }
        }

        TraceValidation {
            seq_strictly_increasing,
            time_monotonic,
            commit_before_spin,
            spin_before_result,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Ordering checks over a trace
#[derive(Debug, Clone, Default)]
pub struct TraceValidation {
    pub seq_strictly_increasing: bool,
    pub time_monotonic: bool,
    pub commit_before_spin: bool,
    pub spin_before_result: bool,
}

impl TraceValidation {
    pub fn is_valid(&self) -> bool {
        self.seq_strictly_increasing
            && self.time_monotonic
            && self.commit_before_spin
            && self.spin_before_result
    }

    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.seq_strictly_increasing {
            warnings.push("Sequence numbers not strictly increasing");
        }
        if !self.time_monotonic {
            warnings.push("Timestamps go backwards");
        }
        if !self.commit_before_spin {
            warnings.push("Spin started without a committed outcome");
        }
        if !self.spin_before_result {
            warnings.push("Round resolved without a spin");
        }

        warnings
    }
}
