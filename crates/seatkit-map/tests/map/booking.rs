//! Booking flows: selection, reservation form, detail and date changes.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use seatkit_backend::InMemoryBackend;
use seatkit_core::{
    BookingError, Error, Mode, Rectangle, ReservationBackend, ReservationRequest, Seat, SeatId,
};
use seatkit_map::{
    BookingDialog, BookingSession, ModeCoordinator, SeatClick, SeatMap, SeatPalette, SeatState,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::from_origin_size(x, y, w, h).unwrap()
}

async fn reserve(backend: &InMemoryBackend, seat: u32, date: NaiveDate, name: &str) {
    backend
        .create_reservations(ReservationRequest {
            seat_ids: vec![SeatId(seat)],
            date,
            name: name.to_string(),
            department: "Sales".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_click_toggles_selection() {
    let backend = InMemoryBackend::seeded(5);
    let mut session = BookingSession::new(day(31));
    session.load(&backend).await.unwrap();

    let click = session.click_seat(SeatId(2), Mode::Idle, &backend).await.unwrap();
    assert_eq!(click, SeatClick::Selected(SeatId(2)));
    session.click_seat(SeatId(4), Mode::Idle, &backend).await.unwrap();
    assert_eq!(session.selection(), &BTreeSet::from([SeatId(2), SeatId(4)]));

    let click = session.click_seat(SeatId(2), Mode::Idle, &backend).await.unwrap();
    assert_eq!(click, SeatClick::Deselected(SeatId(2)));
    assert_eq!(session.selection(), &BTreeSet::from([SeatId(4)]));
}

#[tokio::test]
async fn test_clicks_ignored_while_registering() {
    let backend = InMemoryBackend::seeded(5);
    let mut session = BookingSession::new(day(31));

    let click = session
        .click_seat(SeatId(1), Mode::OverlayRegistration, &backend)
        .await
        .unwrap();
    assert_eq!(click, SeatClick::Ignored);
    assert!(session.selection().is_empty());
}

#[tokio::test]
async fn test_reservation_form_flow() {
    let backend = InMemoryBackend::seeded(5);
    let mut session = BookingSession::new(day(31));
    session.load(&backend).await.unwrap();

    session.click_seat(SeatId(1), Mode::Idle, &backend).await.unwrap();
    session.click_seat(SeatId(3), Mode::Idle, &backend).await.unwrap();
    session.open_reservation_form(Mode::Idle).unwrap();

    let err = session.submit_reservation(&backend).await.unwrap_err();
    assert!(matches!(err, Error::Booking(BookingError::MissingName)));

    let form = session.form_mut().unwrap();
    form.name = "Suzuki".to_string();
    form.department = "Engineering".to_string();
    let created = session.submit_reservation(&backend).await.unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(session.dialog(), &BookingDialog::Closed);
    assert!(session.selection().is_empty());
    assert!(session.is_reserved(SeatId(1)));
    assert!(session.is_reserved(SeatId(3)));
    assert!(!session.is_reserved(SeatId(2)));
}

#[tokio::test]
async fn test_submit_without_form_is_refused() {
    let backend = InMemoryBackend::seeded(2);
    let mut session = BookingSession::new(day(31));
    let err = session.submit_reservation(&backend).await.unwrap_err();
    assert!(matches!(err, Error::Booking(BookingError::FormClosed)));
}

#[tokio::test]
async fn test_reserved_seat_opens_detail_and_cancels() {
    let backend = InMemoryBackend::seeded(5);
    reserve(&backend, 2, day(31), "Ito").await;

    let mut session = BookingSession::new(day(31));
    session.load(&backend).await.unwrap();

    let click = session.click_seat(SeatId(2), Mode::Idle, &backend).await.unwrap();
    let SeatClick::DetailOpened(reservation) = click else {
        panic!("expected the detail dialog");
    };
    assert_eq!(reservation.name, "Ito");
    assert_eq!(reservation.department, "Sales");
    assert!(session.selection().is_empty());
    assert!(matches!(session.dialog(), BookingDialog::Detail(_)));

    session.cancel_open_reservation(&backend).await.unwrap();
    assert_eq!(session.dialog(), &BookingDialog::Closed);
    assert!(!session.is_reserved(SeatId(2)));
    assert!(backend
        .reservation_detail(SeatId(2), day(31))
        .await
        .unwrap()
        .is_none());

    let err = session.cancel_open_reservation(&backend).await.unwrap_err();
    assert!(matches!(err, Error::Booking(BookingError::NoDetailOpen)));
}

#[tokio::test]
async fn test_changing_date_clears_selection_and_reloads() {
    let backend = InMemoryBackend::seeded(5);
    reserve(&backend, 1, day(30), "Kato").await;

    let mut session = BookingSession::new(day(31));
    session.load(&backend).await.unwrap();
    session.click_seat(SeatId(1), Mode::Idle, &backend).await.unwrap();
    assert!(!session.is_reserved(SeatId(1)));

    session.change_date(day(30), &backend).await.unwrap();
    assert_eq!(session.date(), day(30));
    assert!(session.selection().is_empty());
    assert!(session.is_reserved(SeatId(1)));
}

#[tokio::test]
async fn test_scene_reflects_booking_state() {
    let backend = InMemoryBackend::seeded(3);
    for id in 1..=3 {
        backend
            .update_seat_rect(SeatId(id), rect(id as f64 * 20.0, 0.0, 10.0, 10.0))
            .await
            .unwrap();
    }
    reserve(&backend, 1, day(31), "Mori").await;

    let mut coordinator = ModeCoordinator::new();
    coordinator.load(&backend).await.unwrap();
    let map = SeatMap::new(Default::default(), coordinator);
    let mut session = BookingSession::new(day(31));
    session.load(&backend).await.unwrap();
    session.click_seat(SeatId(2), Mode::Idle, &backend).await.unwrap();

    let scene = map.scene(
        session.reservations(),
        session.selection(),
        &SeatPalette::default(),
    );
    let states: Vec<SeatState> = scene.seats.iter().map(|s| s.appearance.state).collect();
    assert_eq!(
        states,
        vec![SeatState::Reserved, SeatState::Selected, SeatState::Plain]
    );
    assert_eq!(scene.seats[0].appearance.label, "Seat 1\nMori");
    assert_eq!(scene.seats[1].appearance.label, "Seat 2\n(selected)");
    assert!(scene.candidate.is_none());

    let unplaced: Vec<&Seat> = map.coordinator().unplaced_seats();
    assert!(unplaced.is_empty());
}
