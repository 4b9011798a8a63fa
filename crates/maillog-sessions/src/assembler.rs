use std::collections::HashMap;

use tracing::{debug, trace};

use crate::duration::{compute_duration, DurationMode};
use crate::error::DurationError;
use crate::types::{FieldKind, LogLine, SessionRecord};

/// Accumulates partial session records keyed by session id.
///
/// Records are created on first sighting and never evicted; only
/// [`SessionAssembler::full_sessions`] discards the incomplete ones.
#[derive(Debug, Default)]
pub struct SessionAssembler {
    sessions: HashMap<String, SessionRecord>,
    mode: DurationMode,
}

impl SessionAssembler {
    pub fn new(mode: DurationMode) -> Self {
        Self {
            sessions: HashMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> DurationMode {
        self.mode
    }

    /// Fold one event fragment into the session it belongs to.
    ///
    /// Unrecognized keys are ignored. Repeated keys overwrite earlier values.
    /// A `status` field captures the end timestamp and recomputes the duration;
    /// if no `client` field has been seen yet the duration stays empty.
    pub fn ingest(
        &mut self,
        timestamp: &str,
        session_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), DurationError> {
        let mode = self.mode;
        let record = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "New session");
                SessionRecord::new(session_id)
            });

        match FieldKind::from_key(key) {
            FieldKind::Client => {
                record.time.start = timestamp.to_string();
                record.client = value.to_string();
            }
            FieldKind::MessageId => record.message_id = value.to_string(),
            FieldKind::From => record.address.from = value.to_string(),
            FieldKind::To => record.address.to = value.to_string(),
            FieldKind::Status => {
                record.status = value.to_string();
                record.time.end = timestamp.to_string();
                if let Some(duration) =
                    compute_duration(&record.time.start, &record.time.end, mode)?
                {
                    debug!(session_id, duration = %duration, "Computed session duration");
                    record.time.duration = duration;
                }
            }
            FieldKind::Unrecognized => {
                trace!(session_id, key, "Ignoring unrecognized field");
            }
        }

        Ok(())
    }

    pub fn ingest_line(&mut self, line: &LogLine) -> Result<(), DurationError> {
        self.ingest(&line.timestamp, &line.session_id, &line.key, &line.value)
    }

    /// Look up the in-progress record for a session.
    pub fn get(&self, session_id: &str) -> Option<&SessionRecord> {
        self.sessions.get(session_id)
    }

    /// Number of distinct sessions seen so far.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn full_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_full()).count()
    }

    /// Consume the assembler and keep only complete sessions, sorted by session id.
    pub fn full_sessions(self) -> Vec<SessionRecord> {
        let mut full: Vec<SessionRecord> = self
            .sessions
            .into_values()
            .filter(SessionRecord::is_full)
            .collect();
        full.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        full
    }
}
