//! Form session driven end-to-end against the record store.

use assert_matches::assert_matches;
use camlog_core::draft::LogDraft;
use camlog_core::fields::Field;
use camlog_core::form_session::{FormSession, SessionState, SubmitOutcome};
use camlog_db::{LogEntryRepo, MemoryBlobStore};

fn fill(session: &mut FormSession, values: &[(Field, &str)]) {
    for &(field, value) in values {
        session.on_change(field, value);
        session.on_blur(field);
    }
}

#[tokio::test]
async fn canonical_entry_submits_and_persists() {
    let mut repo = LogEntryRepo::open(MemoryBlobStore::new()).await;
    let mut session = FormSession::new(LogDraft::default());
    fill(
        &mut session,
        &[
            (Field::Camera, "A-Cam"),
            (Field::Roll, "1"),
            (Field::Take, "1"),
            (Field::Iso, "800"),
            (Field::Timecode, "01:23:45:12"),
        ],
    );

    let outcome = session.submit(&mut repo).await;

    let entry = assert_matches!(outcome, SubmitOutcome::Saved(entry) => entry);
    assert!(!entry.id.is_empty());
    assert_eq!(entry.camera, "A-Cam");
    assert_eq!(entry.roll, 1);
    assert_eq!(entry.take, 1);
    assert_eq!(entry.iso, Some(800));
    assert_eq!(entry.timecode.as_deref(), Some("01:23:45:12"));
    assert_eq!(session.state(), SessionState::Saved);
    assert_eq!(repo.list(), &[entry]);
}

#[tokio::test]
async fn missing_camera_blocks_submit_without_touching_store() {
    let mut repo = LogEntryRepo::open(MemoryBlobStore::new()).await;
    let mut session = FormSession::new(LogDraft::default());
    fill(&mut session, &[(Field::Roll, "1"), (Field::Take, "1")]);

    let outcome = session.submit(&mut repo).await;

    let (errors, focus) =
        assert_matches!(outcome, SubmitOutcome::Invalid { errors, focus } => (errors, focus));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(&Field::Camera).map(String::as_str), Some("Camera is required"));
    assert_eq!(focus, Field::Camera);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn save_failure_keeps_draft_for_retry() {
    let blobs = MemoryBlobStore::new();
    let mut repo = LogEntryRepo::open(blobs.clone()).await;
    let mut session = FormSession::new(LogDraft::default());
    fill(
        &mut session,
        &[(Field::Camera, "B-Cam"), (Field::Roll, "2"), (Field::Take, "7")],
    );

    blobs.fail_writes(true);
    assert_matches!(session.submit(&mut repo).await, SubmitOutcome::SaveFailed { .. });
    assert!(session.save_failed());
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.draft().camera, "B-Cam");
    assert!(repo.is_empty());

    blobs.fail_writes(false);
    assert_matches!(session.submit(&mut repo).await, SubmitOutcome::Saved(_));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn edit_session_updates_existing_entry() {
    let mut repo = LogEntryRepo::open(MemoryBlobStore::new()).await;
    let mut draft = LogDraft::default();
    draft.set(Field::Camera, "A-Cam");
    draft.set(Field::Roll, "1");
    draft.set(Field::Take, "1");
    let entry = repo.create(&draft).await.unwrap();

    let mut session = FormSession::edit(&entry);
    fill(&mut session, &[(Field::Notes, "hair in gate")]);
    let updated = assert_matches!(session.submit(&mut repo).await, SubmitOutcome::Saved(e) => e);

    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.notes.as_deref(), Some("hair in gate"));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn edit_of_deleted_entry_reports_save_failure() {
    let mut repo = LogEntryRepo::open(MemoryBlobStore::new()).await;
    let mut draft = LogDraft::default();
    draft.set(Field::Camera, "A-Cam");
    draft.set(Field::Roll, "1");
    draft.set(Field::Take, "1");
    let entry = repo.create(&draft).await.unwrap();
    let mut session = FormSession::edit(&entry);
    repo.delete(&entry.id).await.unwrap();

    assert_matches!(session.submit(&mut repo).await, SubmitOutcome::SaveFailed { .. });
    assert!(repo.is_empty());
}
