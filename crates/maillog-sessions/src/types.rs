use serde::Serialize;

/// One decoded log line: `<timestamp> <session_id> <key>=<value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub session_id: String,
    pub key: String,
    pub value: String,
}

/// The closed set of field keys the assembler reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Client,
    MessageId,
    From,
    To,
    Status,
    /// Any other key. Accepted and ignored.
    Unrecognized,
}

impl FieldKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "client" => FieldKind::Client,
            "message-id" => FieldKind::MessageId,
            "from" => FieldKind::From,
            "to" => FieldKind::To,
            "status" => FieldKind::Status,
            _ => FieldKind::Unrecognized,
        }
    }
}

/// Start/end timestamps of a session plus the derived duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionTime {
    pub start: String,
    /// Captured from the `status` line, only used to derive `duration`.
    #[serde(skip)]
    pub end: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub from: String,
    pub to: String,
}

/// A session being assembled from scattered log lines.
///
/// Serializes to the output shape directly:
/// `{"time": {"start", "duration"}, "sessionid", "client", "messageid", "address": {"from", "to"}, "status"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub time: SessionTime,
    #[serde(rename = "sessionid")]
    pub session_id: String,
    pub client: String,
    #[serde(rename = "messageid")]
    pub message_id: String,
    pub address: Address,
    pub status: String,
}

impl SessionRecord {
    /// A fresh record with only the session id populated.
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            ..Default::default()
        }
    }

    /// True when every emitted field is non-empty.
    pub fn is_full(&self) -> bool {
        !(self.time.start.is_empty()
            || self.time.duration.is_empty()
            || self.client.is_empty()
            || self.message_id.is_empty()
            || self.session_id.is_empty()
            || self.status.is_empty()
            || self.address.from.is_empty()
            || self.address.to.is_empty())
    }
}
