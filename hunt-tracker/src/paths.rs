//! Store key layout for the hosted keyed database
//!
//! Key structure:
//! ```text
//! events/
//! └── <event>/
//!     └── submissions/
//!         └── <team>/
//!             └── <location-id>/
//!                 └── <attempt-ULID>    # one record per submit attempt
//! ```
//!
//! Attempt ids are ULIDs, so within one `(team, location)` node the
//! chronologically latest record is the lexicographically greatest key.

/// Base key for all event data
pub const EVENTS_BASE: &str = "events";

/// Escapes a raw name into a store-safe key segment.
///
/// Hosted keyed stores reject `. $ # [ ] /` in keys; team and event names
/// come from display strings, so map anything outside `[a-z0-9_-]` to `-`.
pub fn escape_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Key of a team's full submission subtree (the reconciliation root)
pub fn team_submissions_path(event: &str, team: &str) -> String {
    format!(
        "{}/{}/submissions/{}",
        EVENTS_BASE,
        escape_key(event),
        escape_key(team)
    )
}

/// Key of one submission attempt record
pub fn submission_path(event: &str, team: &str, location_id: u32, attempt_id: &str) -> String {
    format!(
        "{}/{}/{}",
        team_submissions_path(event, team),
        location_id,
        attempt_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("Team Shadow"), "team-shadow");
        assert_eq!(escape_key("  Alpha "), "alpha");
        assert_eq!(escape_key("a.b#c$d[e]f/g"), "a-b-c-d-e-f-g");
        assert_eq!(escape_key("plain_name-1"), "plain_name-1");
    }

    #[test]
    fn test_team_submissions_path() {
        let path = team_submissions_path("Decked Out", "Team Shadow");
        assert_eq!(path, "events/decked-out/submissions/team-shadow");
    }

    #[test]
    fn test_submission_path() {
        let path = submission_path("decked-out", "alpha", 5, "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(
            path,
            "events/decked-out/submissions/alpha/5/01ARZ3NDEKTSV4RRFFQ69G5FAV"
        );
    }
}
