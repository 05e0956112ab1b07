//! Decoding of authoritative team snapshots
//!
//! The store hands back a dynamically typed JSON subtree per team. Decode
//! it into a strongly typed mapping at the boundary; malformed entries are
//! logged and skipped, never propagated.

use serde_json::Value;
use std::collections::BTreeMap;

/// The winning submission record for one location
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub attempt_id: String,
    pub uploaded_at: String,
    /// Base64 photo content, when the snapshot includes it
    pub content: Option<String>,
    /// Session id of the client that wrote the record
    pub session: Option<String>,
}

/// Authoritative set of submitted locations for one team.
///
/// One record per location: when a location node holds several attempt
/// records (failed submits that actually landed, concurrent sessions),
/// the greatest ULID wins, which is the chronologically latest attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamSnapshot {
    entries: BTreeMap<u32, SubmissionRecord>,
}

impl TeamSnapshot {
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, SubmissionRecord)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Decodes the raw store subtree. `null` means the team has no
    /// submissions yet; anything else must be an object keyed by
    /// location id.
    pub fn from_value(value: &Value) -> Self {
        let mut entries = BTreeMap::new();

        let Some(locations) = value.as_object() else {
            if !value.is_null() {
                log::warn!("Snapshot root is not an object, ignoring: {}", value);
            }
            return Self { entries };
        };

        for (raw_id, attempts) in locations {
            let Ok(location_id) = raw_id.parse::<u32>() else {
                log::warn!("Skipping snapshot entry with non-numeric location key {:?}", raw_id);
                continue;
            };

            match winning_record(attempts) {
                Some(record) => {
                    entries.insert(location_id, record);
                }
                None => {
                    log::warn!(
                        "Skipping location {} snapshot entry with no decodable attempt",
                        location_id
                    );
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, location_id: u32) -> Option<&SubmissionRecord> {
        self.entries.get(&location_id)
    }

    pub fn contains(&self, location_id: u32) -> bool {
        self.entries.contains_key(&location_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &SubmissionRecord)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Picks the latest decodable attempt under one location node.
fn winning_record(attempts: &Value) -> Option<SubmissionRecord> {
    let attempts = attempts.as_object()?;

    let mut winner: Option<SubmissionRecord> = None;
    for (attempt_id, raw) in attempts {
        let Some(record) = decode_record(attempt_id, raw) else {
            log::debug!("Skipping malformed attempt record {:?}", attempt_id);
            continue;
        };
        match &winner {
            Some(current) if current.attempt_id >= record.attempt_id => {}
            _ => winner = Some(record),
        }
    }
    winner
}

fn decode_record(attempt_id: &str, raw: &Value) -> Option<SubmissionRecord> {
    let obj = raw.as_object()?;
    let uploaded_at = obj.get("uploaded_at")?.as_str()?.to_string();
    let content = obj.get("content").and_then(Value::as_str).map(str::to_string);
    let session = obj.get("session").and_then(Value::as_str).map(str::to_string);
    Some(SubmissionRecord {
        attempt_id: attempt_id.to_string(),
        uploaded_at,
        content,
        session,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_snapshot_is_empty() {
        let snapshot = TeamSnapshot::from_value(&Value::Null);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_decodes_typical_snapshot() {
        let value = json!({
            "5": {
                "01ARZ3NDEKTSV4RRFFQ69G5FAV": {
                    "content": "aGVsbG8=",
                    "uploaded_at": "2026-08-30T10:00:00Z",
                    "session": "s-1"
                }
            },
            "7": {
                "01BRZ3NDEKTSV4RRFFQ69G5FAV": {
                    "uploaded_at": "2026-08-30T11:00:00Z"
                }
            }
        });

        let snapshot = TeamSnapshot::from_value(&value);
        assert_eq!(snapshot.len(), 2);
        let five = snapshot.get(5).unwrap();
        assert_eq!(five.content.as_deref(), Some("aGVsbG8="));
        assert_eq!(five.session.as_deref(), Some("s-1"));
        assert!(snapshot.get(7).unwrap().content.is_none());
    }

    #[test]
    fn test_latest_attempt_wins() {
        let value = json!({
            "3": {
                "01AAAAAAAAAAAAAAAAAAAAAAAA": { "uploaded_at": "2026-08-30T09:00:00Z" },
                "01CCCCCCCCCCCCCCCCCCCCCCCC": { "uploaded_at": "2026-08-30T11:00:00Z" },
                "01BBBBBBBBBBBBBBBBBBBBBBBB": { "uploaded_at": "2026-08-30T10:00:00Z" }
            }
        });

        let snapshot = TeamSnapshot::from_value(&value);
        assert_eq!(
            snapshot.get(3).unwrap().attempt_id,
            "01CCCCCCCCCCCCCCCCCCCCCCCC"
        );
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let value = json!({
            "not-a-number": {
                "01AAAAAAAAAAAAAAAAAAAAAAAA": { "uploaded_at": "2026-08-30T09:00:00Z" }
            },
            "4": "not an object",
            "5": {
                "01AAAAAAAAAAAAAAAAAAAAAAAA": { "no_timestamp": true },
                "01BBBBBBBBBBBBBBBBBBBBBBBB": { "uploaded_at": "2026-08-30T10:00:00Z" }
            }
        });

        let snapshot = TeamSnapshot::from_value(&value);
        assert_eq!(snapshot.len(), 1);
        // the malformed sibling attempt does not shadow the good one
        assert_eq!(
            snapshot.get(5).unwrap().attempt_id,
            "01BBBBBBBBBBBBBBBBBBBBBBBB"
        );
    }

    #[test]
    fn test_non_object_root_is_empty() {
        let snapshot = TeamSnapshot::from_value(&json!([1, 2, 3]));
        assert!(snapshot.is_empty());
    }
}
