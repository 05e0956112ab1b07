//! Submission lifecycle of the location cards
//!
//! Each location moves through `Available -> PendingSelection ->
//! PendingUpload -> Submitted`, with `Submitted` terminal for the session.
//! Rejections are not a state: they are a transient notification that
//! leaves the tracker untouched.
//!
//! The tracker itself performs no I/O. A submit is brokered through a
//! [`SubmitTicket`]: `begin_submit` validates the guards and marks the
//! attempt in flight, the caller performs the durable write, then reports
//! back via `complete_submit` or `fail_submit`.

use crate::models::{Location, StagedFile};
use crate::notify::{NotificationKind, Notifier};
use crate::paths;
use crate::snapshot::TeamSnapshot;
use ulid::Ulid;

/// Client-side upload limit: 2 MiB
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

pub const MSG_FILE_TOO_LARGE: &str = "File size exceeds 2MB. Please upload a smaller file.";
pub const MSG_NO_IMAGE: &str = "No image uploaded.";
pub const MSG_UPLOAD_SUCCESS: &str = "Image successfully uploaded!";
pub const MSG_ONCE_PER_LOCATION: &str = "You can only submit an image once for each location.";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed. Please try again.";
pub const MSG_SIGN_IN_REQUIRED: &str = "Please sign in before submitting.";

/// Lifecycle state of one location card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Available,
    PendingSelection,
    PendingUpload,
    Submitted,
}

#[derive(Debug)]
pub enum TrackerError {
    UnknownLocation(u32),
    AlreadySubmitted(u32),
    FileTooLarge(usize),
    NothingOpen,
    NoStagedFile,
    SubmitInFlight,
    AuthRequired,
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::UnknownLocation(id) => write!(f, "Unknown location {}", id),
            TrackerError::AlreadySubmitted(id) => {
                write!(f, "Location {} already has a submission", id)
            }
            TrackerError::FileTooLarge(size) => {
                write!(f, "File of {} bytes exceeds the {} byte limit", size, MAX_UPLOAD_BYTES)
            }
            TrackerError::NothingOpen => write!(f, "No location is open"),
            TrackerError::NoStagedFile => write!(f, "No file staged for upload"),
            TrackerError::SubmitInFlight => write!(f, "A submit is already in flight"),
            TrackerError::AuthRequired => write!(f, "No authenticated team identity"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// Handed out by `begin_submit`; carries everything the durable write
/// needs. The attempt id is freshly generated per submit attempt.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub location_id: u32,
    pub attempt_id: String,
    pub file: StagedFile,
}

/// Session-scoped submission state for one team.
///
/// Owns the roster exclusively; `submitted`/`image_reference` change only
/// through the transitions below and through [`apply_snapshot`], never
/// from outside.
///
/// [`apply_snapshot`]: SubmissionTracker::apply_snapshot
pub struct SubmissionTracker {
    event: String,
    team: String,
    locations: Vec<Location>,
    open_location: Option<u32>,
    staged: Option<StagedFile>,
    in_flight: bool,
    notifier: Notifier,
}

impl SubmissionTracker {
    pub fn new(
        event: impl Into<String>,
        team: impl Into<String>,
        roster: Vec<Location>,
        notifier: Notifier,
    ) -> Self {
        Self {
            event: event.into(),
            team: team.into(),
            locations: roster,
            open_location: None,
            staged: None,
            in_flight: false,
            notifier,
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    fn location_mut(&mut self, id: u32) -> Option<&mut Location> {
        self.locations.iter_mut().find(|l| l.id == id)
    }

    pub fn submitted_count(&self) -> usize {
        self.locations.iter().filter(|l| l.submitted).count()
    }

    pub fn open_location(&self) -> Option<&Location> {
        self.open_location.and_then(|id| self.location(id))
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn submit_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn state_of(&self, id: u32) -> Option<CardState> {
        let location = self.location(id)?;
        let state = if location.submitted {
            CardState::Submitted
        } else if self.open_location == Some(id) {
            if self.staged.is_some() {
                CardState::PendingUpload
            } else {
                CardState::PendingSelection
            }
        } else {
            CardState::Available
        };
        Some(state)
    }

    /// Opens a location for submission.
    ///
    /// Refused with a rejection notification when the location already
    /// has a submission; the card state does not change. Opening another
    /// card while one is open replaces it and discards any staged file.
    pub fn open(&mut self, id: u32) -> Result<(), TrackerError> {
        let location = self.location(id).ok_or(TrackerError::UnknownLocation(id))?;

        if location.submitted {
            log::debug!("Refusing to reopen submitted location {}", id);
            self.notifier
                .notify(NotificationKind::Rejection(id), MSG_ONCE_PER_LOCATION);
            return Err(TrackerError::AlreadySubmitted(id));
        }
        if self.in_flight {
            return Err(TrackerError::SubmitInFlight);
        }

        self.staged = None;
        self.open_location = Some(id);
        Ok(())
    }

    /// Stages a selected file for the open location.
    ///
    /// An oversized file is refused with a size-limit notification; a
    /// previously staged file stays staged. Re-selecting within the
    /// limit replaces the stage.
    pub fn choose_file(&mut self, file: StagedFile) -> Result<(), TrackerError> {
        if self.open_location.is_none() {
            return Err(TrackerError::NothingOpen);
        }
        if self.in_flight {
            return Err(TrackerError::SubmitInFlight);
        }

        if file.len() > MAX_UPLOAD_BYTES {
            log::debug!(
                "Rejecting staged file {:?} of {} bytes",
                file.name,
                file.len()
            );
            self.notifier
                .notify(NotificationKind::Error, MSG_FILE_TOO_LARGE);
            return Err(TrackerError::FileTooLarge(file.len()));
        }

        self.staged = Some(file);
        Ok(())
    }

    /// Closes the selection/upload view, discarding any staged file.
    /// Ignored while a submit is in flight (an in-flight submit cannot
    /// be aborted).
    pub fn close(&mut self) {
        if self.in_flight {
            return;
        }
        self.open_location = None;
        self.staged = None;
    }

    /// Validates the submit guards and marks the attempt in flight.
    ///
    /// The returned ticket carries the staged bytes and a fresh ULID
    /// attempt id; the caller performs the durable write and then calls
    /// `complete_submit` or `fail_submit`. While in flight, further
    /// submits are refused so the same location cannot race itself.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, TrackerError> {
        if self.in_flight {
            return Err(TrackerError::SubmitInFlight);
        }
        let location_id = self.open_location.ok_or(TrackerError::NothingOpen)?;
        let location = self
            .location(location_id)
            .ok_or(TrackerError::UnknownLocation(location_id))?;

        if location.submitted {
            self.notifier
                .notify(NotificationKind::Rejection(location_id), MSG_ONCE_PER_LOCATION);
            return Err(TrackerError::AlreadySubmitted(location_id));
        }
        if self.team.trim().is_empty() {
            self.notifier
                .notify(NotificationKind::Error, MSG_SIGN_IN_REQUIRED);
            return Err(TrackerError::AuthRequired);
        }
        let file = match &self.staged {
            Some(file) => file.clone(),
            None => {
                self.notifier.notify(NotificationKind::Error, MSG_NO_IMAGE);
                return Err(TrackerError::NoStagedFile);
            }
        };

        self.in_flight = true;
        Ok(SubmitTicket {
            location_id,
            attempt_id: Ulid::new().to_string(),
            file,
        })
    }

    /// Records a successful durable write: the location becomes
    /// `Submitted`, the staged file is discarded and the success
    /// confirmation is shown.
    pub fn complete_submit(&mut self, location_id: u32, image_reference: String) {
        self.in_flight = false;

        match self.location_mut(location_id) {
            Some(location) => {
                location.submitted = true;
                location.image_reference = Some(image_reference);
                log::info!("Location {} submitted", location_id);
            }
            None => {
                log::error!("Completed submit for unknown location {}", location_id);
            }
        }

        if self.open_location == Some(location_id) {
            self.open_location = None;
            self.staged = None;
        }
        self.notifier
            .notify(NotificationKind::Success, MSG_UPLOAD_SUCCESS);
    }

    /// Records a failed durable write: the staged file is retained so the
    /// submit can be retried with a fresh attempt id.
    pub fn fail_submit(&mut self, location_id: u32) {
        self.in_flight = false;

        // A snapshot may have resolved the location while the write was in
        // flight; the authoritative record wins and there is no error to show.
        if self
            .location(location_id)
            .is_some_and(|l| l.submitted)
        {
            log::info!(
                "Submit for location {} superseded by an authoritative snapshot",
                location_id
            );
            self.open_location = None;
            self.staged = None;
            return;
        }

        log::warn!(
            "Submit for location {} failed; staged file retained for retry",
            location_id
        );
        self.notifier
            .notify(NotificationKind::Error, MSG_UPLOAD_FAILED);
    }

    /// Applies an authoritative snapshot.
    ///
    /// Every listed location is overwritten to `Submitted` with the
    /// winning record's store key, regardless of local state; a staged
    /// file for a location the snapshot resolves is discarded without an
    /// error. Locations absent from the snapshot are left alone, so
    /// `submitted` stays monotonic even against a misbehaving store.
    pub fn apply_snapshot(&mut self, snapshot: &TeamSnapshot) {
        for (&location_id, record) in snapshot.iter() {
            let reference =
                paths::submission_path(&self.event, &self.team, location_id, &record.attempt_id);

            match self.location_mut(location_id) {
                Some(location) => {
                    if !location.submitted {
                        log::debug!("Snapshot marks location {} submitted", location_id);
                    }
                    location.submitted = true;
                    location.image_reference = Some(reference);
                }
                None => {
                    log::warn!("Snapshot references unknown location {}", location_id);
                    continue;
                }
            }

            if self.open_location == Some(location_id) && !self.in_flight {
                self.open_location = None;
                self.staged = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::load_roster;
    use crate::snapshot::SubmissionRecord;

    fn thirteen_locations() -> Vec<Location> {
        let entries: Vec<String> = (1..=13)
            .map(|i| {
                format!(
                    r#"{{"id": {}, "name": "Location {}", "difficulty": {}}}"#,
                    i,
                    i,
                    (i % 5) + 1
                )
            })
            .collect();
        load_roster(&format!("[{}]", entries.join(","))).unwrap()
    }

    fn tracker() -> SubmissionTracker {
        SubmissionTracker::new(
            "decked-out",
            "Team Shadow",
            thirteen_locations(),
            Notifier::new(),
        )
    }

    fn one_mib_file() -> StagedFile {
        StagedFile::new("photo.jpg", vec![0u8; 1024 * 1024])
    }

    fn record(attempt_id: &str) -> SubmissionRecord {
        SubmissionRecord {
            attempt_id: attempt_id.to_string(),
            uploaded_at: "2026-08-30T10:00:00Z".to_string(),
            content: None,
            session: None,
        }
    }

    #[test]
    fn test_open_then_stage_then_submit() {
        let mut t = tracker();
        assert_eq!(t.submitted_count(), 0);

        t.open(5).unwrap();
        assert_eq!(t.state_of(5), Some(CardState::PendingSelection));

        t.choose_file(one_mib_file()).unwrap();
        assert_eq!(t.state_of(5), Some(CardState::PendingUpload));

        let ticket = t.begin_submit().unwrap();
        assert_eq!(ticket.location_id, 5);
        assert_eq!(ticket.file.len(), 1024 * 1024);
        assert!(t.submit_in_flight());

        t.complete_submit(5, "events/decked-out/submissions/team-shadow/5/x".to_string());
        assert_eq!(t.state_of(5), Some(CardState::Submitted));
        assert_eq!(t.submitted_count(), 1);
        assert!(t.open_location().is_none());
        assert!(t.staged_file().is_none());
        assert!(!t.submit_in_flight());

        let note = t.notifier().current().unwrap();
        assert_eq!(note.message, MSG_UPLOAD_SUCCESS);
        assert_eq!(note.kind, NotificationKind::Success);
    }

    #[test]
    fn test_oversized_file_refused_and_stage_unchanged() {
        let mut t = tracker();
        t.open(2).unwrap();
        t.choose_file(one_mib_file()).unwrap();

        let before = t.notifier().last_id();
        let oversized = StagedFile::new("big.jpg", vec![0u8; MAX_UPLOAD_BYTES + 1]);
        let err = t.choose_file(oversized).unwrap_err();
        assert!(matches!(err, TrackerError::FileTooLarge(_)));

        // exactly one notification, with the size limit message
        assert_eq!(t.notifier().last_id(), before + 1);
        assert_eq!(t.notifier().current().unwrap().message, MSG_FILE_TOO_LARGE);
        // previous stage retained, state unchanged
        assert_eq!(t.state_of(2), Some(CardState::PendingUpload));
        assert_eq!(t.staged_file().unwrap().len(), 1024 * 1024);
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let mut t = tracker();
        t.open(1).unwrap();
        t.choose_file(StagedFile::new("edge.jpg", vec![0u8; MAX_UPLOAD_BYTES]))
            .unwrap();
        assert_eq!(t.state_of(1), Some(CardState::PendingUpload));
    }

    #[test]
    fn test_reselect_replaces_stage() {
        let mut t = tracker();
        t.open(3).unwrap();
        t.choose_file(StagedFile::new("first.jpg", vec![0u8; 10])).unwrap();
        t.choose_file(StagedFile::new("second.jpg", vec![0u8; 20])).unwrap();
        let staged = t.staged_file().unwrap();
        assert_eq!(staged.name, "second.jpg");
        assert_eq!(staged.len(), 20);
    }

    #[test]
    fn test_submit_without_stage_refused() {
        let mut t = tracker();
        t.open(4).unwrap();

        let before = t.notifier().last_id();
        assert!(matches!(t.begin_submit(), Err(TrackerError::NoStagedFile)));
        assert_eq!(t.notifier().last_id(), before + 1);
        assert_eq!(t.notifier().current().unwrap().message, MSG_NO_IMAGE);
        assert_eq!(t.state_of(4), Some(CardState::PendingSelection));
        assert!(!t.submit_in_flight());
    }

    #[test]
    fn test_open_submitted_location_rejected() {
        let mut t = tracker();
        t.open(5).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        let ticket = t.begin_submit().unwrap();
        t.complete_submit(ticket.location_id, "ref".to_string());

        // refused even before any reconciliation snapshot arrives
        let err = t.open(5).unwrap_err();
        assert!(matches!(err, TrackerError::AlreadySubmitted(5)));
        assert!(t.open_location().is_none());
        assert_eq!(t.state_of(5), Some(CardState::Submitted));

        let note = t.notifier().current().unwrap();
        assert_eq!(note.message, MSG_ONCE_PER_LOCATION);
        assert_eq!(note.kind, NotificationKind::Rejection(5));
    }

    #[test]
    fn test_close_discards_stage() {
        let mut t = tracker();
        t.open(6).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        t.close();
        assert!(t.open_location().is_none());
        assert!(t.staged_file().is_none());
        assert_eq!(t.state_of(6), Some(CardState::Available));
    }

    #[test]
    fn test_switching_cards_discards_stage() {
        let mut t = tracker();
        t.open(6).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        t.open(7).unwrap();
        assert!(t.staged_file().is_none());
        assert_eq!(t.state_of(7), Some(CardState::PendingSelection));
        assert_eq!(t.state_of(6), Some(CardState::Available));
    }

    #[test]
    fn test_in_flight_blocks_second_submit() {
        let mut t = tracker();
        t.open(8).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        let _ticket = t.begin_submit().unwrap();
        assert!(matches!(t.begin_submit(), Err(TrackerError::SubmitInFlight)));
    }

    #[test]
    fn test_failed_submit_keeps_stage_for_retry() {
        let mut t = tracker();
        t.open(9).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        let first = t.begin_submit().unwrap();
        t.fail_submit(first.location_id);

        assert_eq!(t.notifier().current().unwrap().message, MSG_UPLOAD_FAILED);
        assert_eq!(t.state_of(9), Some(CardState::PendingUpload));
        assert!(!t.submit_in_flight());

        // retry gets a fresh attempt id over the same bytes
        let second = t.begin_submit().unwrap();
        assert_ne!(first.attempt_id, second.attempt_id);
        assert_eq!(first.file, second.file);
    }

    #[test]
    fn test_submit_without_identity_refused() {
        let mut t = SubmissionTracker::new("decked-out", "", thirteen_locations(), Notifier::new());
        t.open(1).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        assert!(matches!(t.begin_submit(), Err(TrackerError::AuthRequired)));
        assert_eq!(
            t.notifier().current().unwrap().message,
            MSG_SIGN_IN_REQUIRED
        );
        assert_eq!(t.state_of(1), Some(CardState::PendingUpload));
    }

    #[test]
    fn test_snapshot_marks_locations_submitted() {
        let mut t = tracker();
        let snapshot = TeamSnapshot::from_entries([
            (5, record("01AAAAAAAAAAAAAAAAAAAAAAAA")),
            (7, record("01BBBBBBBBBBBBBBBBBBBBBBBB")),
        ]);

        t.apply_snapshot(&snapshot);
        assert_eq!(t.submitted_count(), 2);
        assert_eq!(
            t.location(5).unwrap().image_reference.as_deref(),
            Some("events/decked-out/submissions/team-shadow/5/01AAAAAAAAAAAAAAAAAAAAAAAA")
        );
    }

    #[test]
    fn test_snapshot_resolves_pending_upload_without_error() {
        let mut t = tracker();
        t.open(7).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        assert_eq!(t.state_of(7), Some(CardState::PendingUpload));

        let before = t.notifier().last_id();
        t.apply_snapshot(&TeamSnapshot::from_entries([(
            7,
            record("01AAAAAAAAAAAAAAAAAAAAAAAA"),
        )]));

        assert_eq!(t.state_of(7), Some(CardState::Submitted));
        assert!(t.staged_file().is_none());
        assert!(t.open_location().is_none());
        // no notification raised by reconciliation
        assert_eq!(t.notifier().last_id(), before);
    }

    #[test]
    fn test_submitted_is_monotonic_across_snapshots() {
        let mut t = tracker();
        t.apply_snapshot(&TeamSnapshot::from_entries([(
            2,
            record("01AAAAAAAAAAAAAAAAAAAAAAAA"),
        )]));
        assert!(t.location(2).unwrap().submitted);

        // a later snapshot without location 2 does not clear it
        t.apply_snapshot(&TeamSnapshot::from_entries([(
            3,
            record("01BBBBBBBBBBBBBBBBBBBBBBBB"),
        )]));
        assert!(t.location(2).unwrap().submitted);
        assert!(t.location(3).unwrap().submitted);
    }

    #[test]
    fn test_snapshot_with_unknown_location_is_ignored() {
        let mut t = tracker();
        t.apply_snapshot(&TeamSnapshot::from_entries([(
            99,
            record("01AAAAAAAAAAAAAAAAAAAAAAAA"),
        )]));
        assert_eq!(t.submitted_count(), 0);
    }

    #[test]
    fn test_failed_submit_after_snapshot_resolution_shows_no_error() {
        let mut t = tracker();
        t.open(4).unwrap();
        t.choose_file(one_mib_file()).unwrap();
        let ticket = t.begin_submit().unwrap();

        // another session completes location 4 while our write is in flight
        t.apply_snapshot(&TeamSnapshot::from_entries([(
            4,
            record("01AAAAAAAAAAAAAAAAAAAAAAAA"),
        )]));
        let before = t.notifier().last_id();

        t.fail_submit(ticket.location_id);
        assert_eq!(t.notifier().last_id(), before);
        assert_eq!(t.state_of(4), Some(CardState::Submitted));
        assert!(t.staged_file().is_none());
    }
}
