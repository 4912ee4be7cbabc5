//! Confirming registrations against the in-memory backend.

use seatkit_backend::InMemoryBackend;
use seatkit_core::{
    BackendError, Error, Mode, OverlayId, Rectangle, RegistrationError, RegistrationKind,
    ReservationBackend, SeatId,
};
use seatkit_map::{ModeCoordinator, SeatMap, SeatStatus};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::from_origin_size(x, y, w, h).unwrap()
}

async fn loaded_map(backend: &InMemoryBackend) -> SeatMap {
    let mut coordinator = ModeCoordinator::new();
    coordinator.load(backend).await.unwrap();
    SeatMap::new(Default::default(), coordinator)
}

fn pend_seat(map: &mut SeatMap, id: u32, r: Rectangle) {
    map.select_seat_for_registration(SeatId(id)).unwrap();
    map.update_coordinator(|c| c.on_rectangle_finalized(r)).unwrap();
}

fn offline() -> BackendError {
    BackendError::Unavailable {
        reason: "offline".to_string(),
    }
}

#[tokio::test]
async fn test_confirmed_seat_is_placed() {
    let backend = InMemoryBackend::seeded(74);
    let mut map = loaded_map(&backend).await;
    assert!(!map.coordinator().seat(SeatId(5)).unwrap().is_placed());

    map.enter_seat_registration().unwrap();
    pend_seat(&mut map, 5, rect(10.0, 10.0, 40.0, 30.0));
    let persisted = map.confirm_seat_registration(&backend).await.unwrap();

    assert_eq!(persisted, 1);
    assert_eq!(map.mode(), Mode::Idle);
    assert!(map.coordinator().pending_seats().is_empty());
    assert!(!map.controls().all_disabled());

    let seat = map.coordinator().seat(SeatId(5)).unwrap();
    assert_eq!(
        (seat.x, seat.y, seat.width, seat.height),
        (Some(10.0), Some(10.0), Some(40.0), Some(30.0))
    );
    assert!(map
        .coordinator()
        .unplaced_seats()
        .iter()
        .all(|s| s.id != SeatId(5)));

    let stored = backend.fetch_seats().await.unwrap();
    assert!(stored[4].is_placed());
}

#[tokio::test]
async fn test_confirm_with_nothing_pending_is_refused() {
    let backend = InMemoryBackend::seeded(3);
    let mut map = loaded_map(&backend).await;
    map.enter_seat_registration().unwrap();

    let err = map.confirm_seat_registration(&backend).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Registration(RegistrationError::NothingPending(RegistrationKind::Seats))
    ));
    assert_eq!(map.mode(), Mode::SeatRegistration);
}

#[tokio::test]
async fn test_partial_seat_failure_keeps_rest_pending() {
    let backend = InMemoryBackend::seeded(10);
    let mut map = loaded_map(&backend).await;
    map.enter_seat_registration().unwrap();
    pend_seat(&mut map, 1, rect(0.0, 0.0, 5.0, 5.0));
    pend_seat(&mut map, 2, rect(10.0, 0.0, 5.0, 5.0));
    pend_seat(&mut map, 3, rect(20.0, 0.0, 5.0, 5.0));

    backend.fail_writes_after(1, offline());
    let err = map.confirm_seat_registration(&backend).await.unwrap_err();

    let commit = match err {
        Error::Commit(commit) => commit,
        other => panic!("expected a commit error, got {other:?}"),
    };
    assert_eq!(commit.persisted, 1);
    assert_eq!(commit.remaining(), 2);
    assert_eq!(commit.source, offline());

    assert_eq!(map.mode(), Mode::SeatRegistration);
    let pending: Vec<SeatId> = map.coordinator().pending_seats().keys().copied().collect();
    assert_eq!(pending, vec![SeatId(2), SeatId(3)]);

    // The seat that made it is shown as persisted.
    let seat = map.coordinator().seat(SeatId(1)).unwrap();
    assert_eq!(map.coordinator().seat_status(seat), SeatStatus::Registered);

    // A retry finishes the job.
    assert_eq!(map.confirm_seat_registration(&backend).await.unwrap(), 2);
    assert_eq!(map.mode(), Mode::Idle);
}

#[tokio::test]
async fn test_split_commit_blocks_double_submit() {
    let backend = InMemoryBackend::seeded(3);
    let mut map = loaded_map(&backend).await;
    map.enter_seat_registration().unwrap();
    pend_seat(&mut map, 2, rect(1.0, 1.0, 1.0, 1.0));

    let commit = map.begin_seat_commit().unwrap();
    assert!(!map.coordinator().can_confirm_seats());
    assert!(map.begin_seat_commit().is_err());

    let outcome = commit.run(&backend).await;
    assert!(outcome.is_complete());
    assert_eq!(map.finish_seat_commit(outcome).unwrap(), 1);
    assert_eq!(map.mode(), Mode::Idle);
}

#[tokio::test]
async fn test_overlay_confirm_needs_every_name() {
    let backend = InMemoryBackend::new();
    let mut map = loaded_map(&backend).await;
    map.enter_overlay_registration().unwrap();
    map.update_coordinator(|c| c.on_rectangle_finalized(rect(0.0, 0.0, 10.0, 10.0)))
        .unwrap();
    map.update_coordinator(|c| c.on_rectangle_finalized(rect(20.0, 0.0, 10.0, 10.0)))
        .unwrap();
    let ids: Vec<_> = map
        .coordinator()
        .pending_overlays()
        .iter()
        .map(|o| o.temp_id)
        .collect();

    map.rename_pending_overlay(ids[0], "Kitchen").unwrap();
    let err = map.confirm_overlay_registration(&backend).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Registration(RegistrationError::UnnamedOverlays { count: 1 })
    ));
    assert!(backend.fetch_overlays().await.unwrap().is_empty());
    assert_eq!(map.coordinator().pending_overlays().len(), 2);

    map.rename_pending_overlay(ids[1], "Lobby").unwrap();
    assert_eq!(map.confirm_overlay_registration(&backend).await.unwrap(), 2);
    assert_eq!(map.mode(), Mode::Idle);

    let names: Vec<String> = map
        .coordinator()
        .overlays()
        .iter()
        .map(|o| o.name.clone())
        .collect();
    assert_eq!(names, vec!["Kitchen".to_string(), "Lobby".to_string()]);
}

#[tokio::test]
async fn test_partial_overlay_failure() {
    let backend = InMemoryBackend::new();
    let mut map = loaded_map(&backend).await;
    map.enter_overlay_registration().unwrap();
    for (i, name) in ["A", "B"].iter().enumerate() {
        map.update_coordinator(|c| c.on_rectangle_finalized(rect(i as f64 * 10.0, 0.0, 5.0, 5.0)))
            .unwrap();
        let id = map.coordinator().pending_overlays()[i].temp_id;
        map.rename_pending_overlay(id, *name).unwrap();
    }

    backend.fail_writes_after(1, offline());
    let err = map.confirm_overlay_registration(&backend).await.unwrap_err();
    assert!(err.is_backend_error());

    assert_eq!(map.mode(), Mode::OverlayRegistration);
    assert_eq!(map.coordinator().overlays().len(), 1);
    let left: Vec<&str> = map
        .coordinator()
        .pending_overlays()
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(left, vec!["B"]);
}

#[tokio::test]
async fn test_overlay_delete_flow() {
    let backend = InMemoryBackend::new();
    backend
        .add_overlay("Kitchen", rect(0.0, 0.0, 5.0, 5.0))
        .await
        .unwrap();
    let mut map = loaded_map(&backend).await;
    map.enter_overlay_registration().unwrap();

    assert!(map.request_overlay_delete(OverlayId(7)).is_err());
    map.request_overlay_delete(OverlayId(1)).unwrap();
    let removed = map.confirm_overlay_delete(&backend).await.unwrap();

    assert_eq!(removed, OverlayId(1));
    assert!(map.coordinator().overlays().is_empty());
    assert!(backend.fetch_overlays().await.unwrap().is_empty());
    assert_eq!(map.mode(), Mode::OverlayRegistration);

    // Nothing is awaiting confirmation any more.
    assert!(map.confirm_overlay_delete(&backend).await.is_err());
}

#[tokio::test]
async fn test_seat_mode_is_held_while_commit_runs() {
    let backend = InMemoryBackend::seeded(3);
    let mut map = loaded_map(&backend).await;
    map.enter_seat_registration().unwrap();
    pend_seat(&mut map, 1, rect(0.0, 0.0, 5.0, 5.0));

    let commit = map.begin_seat_commit().unwrap();
    let in_flight = RegistrationError::CommitInFlight(RegistrationKind::Seats);
    assert_eq!(map.cancel_seat_registration(), Err(in_flight.clone()));
    assert_eq!(map.toggle_seat_registration(), Err(in_flight.clone()));
    assert_eq!(map.toggle_overlay_registration(), Err(in_flight));
    assert_eq!(map.mode(), Mode::SeatRegistration);
    assert_eq!(map.coordinator().pending_seats().len(), 1);

    let outcome = commit.run(&backend).await;
    assert_eq!(map.finish_seat_commit(outcome).unwrap(), 1);
    assert_eq!(map.mode(), Mode::Idle);

    // A fresh session after the commit is not disturbed by it.
    map.enter_seat_registration().unwrap();
    map.select_seat_for_registration(SeatId(2)).unwrap();
    assert_eq!(map.mode(), Mode::SeatRegistration);
    assert_eq!(map.coordinator().target_seat(), Some(SeatId(2)));
    map.cancel_seat_registration().unwrap();
}

#[tokio::test]
async fn test_failed_seat_commit_can_then_be_cancelled() {
    let backend = InMemoryBackend::seeded(3);
    let mut map = loaded_map(&backend).await;
    map.enter_seat_registration().unwrap();
    pend_seat(&mut map, 2, rect(0.0, 0.0, 5.0, 5.0));

    let commit = map.begin_seat_commit().unwrap();
    backend.fail_writes_after(0, offline());
    let outcome = commit.run(&backend).await;
    assert!(map.finish_seat_commit(outcome).is_err());
    assert_eq!(map.mode(), Mode::SeatRegistration);

    map.cancel_seat_registration().unwrap();
    assert_eq!(map.mode(), Mode::Idle);
    assert!(!backend.fetch_seats().await.unwrap()[1].is_placed());
}

#[tokio::test]
async fn test_overlay_mode_is_held_while_commit_runs() {
    let backend = InMemoryBackend::new();
    let mut map = loaded_map(&backend).await;
    map.enter_overlay_registration().unwrap();
    map.update_coordinator(|c| c.on_rectangle_finalized(rect(0.0, 0.0, 5.0, 5.0)))
        .unwrap();
    let id = map.coordinator().pending_overlays()[0].temp_id;
    map.rename_pending_overlay(id, "Kitchen").unwrap();

    let commit = map.begin_overlay_commit().unwrap();
    let in_flight = RegistrationError::CommitInFlight(RegistrationKind::Overlays);
    assert_eq!(map.cancel_overlay_registration(), Err(in_flight.clone()));
    assert_eq!(map.toggle_overlay_registration(), Err(in_flight.clone()));
    assert_eq!(map.toggle_seat_registration(), Err(in_flight));
    assert_eq!(map.mode(), Mode::OverlayRegistration);

    let outcome = commit.run(&backend).await;
    assert_eq!(map.finish_overlay_commit(outcome).unwrap(), 1);
    assert_eq!(map.mode(), Mode::Idle);

    map.enter_overlay_registration().unwrap();
    assert_eq!(map.mode(), Mode::OverlayRegistration);
    assert!(map.coordinator().pending_overlays().is_empty());
}

#[tokio::test]
async fn test_rename_during_overlay_commit_stays_pending() {
    let backend = InMemoryBackend::new();
    let mut map = loaded_map(&backend).await;
    map.enter_overlay_registration().unwrap();
    map.update_coordinator(|c| c.on_rectangle_finalized(rect(0.0, 0.0, 5.0, 5.0)))
        .unwrap();
    let id = map.coordinator().pending_overlays()[0].temp_id;
    map.rename_pending_overlay(id, "Kitchen").unwrap();

    let commit = map.begin_overlay_commit().unwrap();
    map.rename_pending_overlay(id, "Pantry").unwrap();
    let outcome = commit.run(&backend).await;
    assert_eq!(map.finish_overlay_commit(outcome).unwrap(), 1);

    // The old name was stored; the new one waits for another confirm.
    assert_eq!(map.mode(), Mode::OverlayRegistration);
    let left = map.coordinator().pending_overlays();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Pantry");
    assert_eq!(map.coordinator().overlays()[0].name, "Kitchen");
}
