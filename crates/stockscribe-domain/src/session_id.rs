//! Review session identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a review session, based on UUIDv7
///
/// UUIDv7 keeps ids sortable by creation time, which lets an embedding
/// layer list open sessions oldest-first without extra bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    ///
    /// # Examples
    ///
    /// ```
    /// use stockscribe_domain::SessionId;
    ///
    /// let id = SessionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SessionId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SessionId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use stockscribe_domain::SessionId;
    ///
    /// let id = SessionId::new();
    /// let parsed = SessionId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid session id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was generated
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are the Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SessionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_chronological() {
        let id1 = SessionId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = SessionId::new();

        assert!(id1 < id2, "Earlier session id should sort first");
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_session_id_display_and_parse() {
        let id = SessionId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(SessionId::from_string(&id_str).unwrap(), id);
    }

    #[test]
    fn test_session_id_invalid_string() {
        assert!(SessionId::from_string("session-1").is_err());
        assert!(SessionId::from_string("").is_err());
    }

    #[test]
    fn test_session_id_serializes_as_string() {
        let id = SessionId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
