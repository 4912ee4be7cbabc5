//! Registration mode flows driven through pointer events.

use seatkit_core::{Mode, Rectangle, RegistrationError, SeatId};
use seatkit_map::{DragState, PointerEvent, PointerOutcome, SeatMap, Viewport};

/// Map at zoom 0 with no pan: world x = pixel x, world y = 600 - pixel y.
fn unit_map() -> SeatMap {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(0.0);
    viewport.set_pan(0.0, 0.0);
    SeatMap::new(viewport, Default::default())
}

fn drag(map: &mut SeatMap, from: (f64, f64), to: (f64, f64)) -> PointerOutcome {
    let to_px = (to.0, 600.0 - to.1);
    map.handle_pointer(PointerEvent::down(from.0, 600.0 - from.1));
    map.handle_pointer(PointerEvent::drag_to(to_px.0, to_px.1));
    map.handle_pointer(PointerEvent::up(to_px.0, to_px.1))
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::from_origin_size(x, y, w, h).unwrap()
}

#[test]
fn test_pointer_down_in_idle_never_starts_drag() {
    let mut map = unit_map();
    map.handle_pointer(PointerEvent::down(10.0, 10.0));
    assert_eq!(map.drag().state(), DragState::Idle);
    assert_eq!(
        map.handle_pointer(PointerEvent::up(10.0, 10.0)),
        PointerOutcome::Ignored
    );
}

#[test]
fn test_seat_drag_becomes_pending_rectangle() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();
    map.select_seat_for_registration(SeatId(5)).unwrap();

    let outcome = drag(&mut map, (10.0, 10.0), (50.0, 40.0));

    assert_eq!(outcome, PointerOutcome::Finalized(rect(10.0, 10.0, 40.0, 30.0)));
    assert_eq!(
        map.coordinator().pending_seat(SeatId(5)),
        Some(rect(10.0, 10.0, 40.0, 30.0))
    );
    assert_eq!(map.candidate(), None);
}

#[test]
fn test_second_drag_overwrites_first() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();
    map.select_seat_for_registration(SeatId(5)).unwrap();

    drag(&mut map, (10.0, 10.0), (50.0, 40.0));
    drag(&mut map, (100.0, 100.0), (90.0, 120.0));

    assert_eq!(map.coordinator().pending_seats().len(), 1);
    assert_eq!(
        map.coordinator().pending_seat(SeatId(5)),
        Some(rect(90.0, 100.0, 10.0, 20.0))
    );
}

#[test]
fn test_seat_drag_needs_a_target() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();

    assert_eq!(
        map.handle_pointer(PointerEvent::down(10.0, 10.0)),
        PointerOutcome::Ignored
    );
    assert!(!map.drag().is_dragging());
    assert!(map.coordinator().pending_seats().is_empty());
}

#[test]
fn test_cancel_then_reenter_starts_empty() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();
    map.select_seat_for_registration(SeatId(1)).unwrap();
    drag(&mut map, (0.0, 0.0), (10.0, 10.0));
    map.select_seat_for_registration(SeatId(2)).unwrap();
    drag(&mut map, (20.0, 0.0), (30.0, 10.0));
    assert_eq!(map.coordinator().pending_seats().len(), 2);

    map.cancel_seat_registration().unwrap();
    assert_eq!(map.mode(), Mode::Idle);

    map.enter_seat_registration().unwrap();
    assert!(map.coordinator().pending_seats().is_empty());
    assert_eq!(map.coordinator().target_seat(), None);
}

#[test]
fn test_switching_to_overlays_discards_seat_drafts() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();
    map.select_seat_for_registration(SeatId(7)).unwrap();
    drag(&mut map, (0.0, 0.0), (10.0, 10.0));

    map.toggle_overlay_registration().unwrap();

    assert_eq!(map.mode(), Mode::OverlayRegistration);
    assert!(map.coordinator().pending_seats().is_empty());
    assert!(map.coordinator().pending_overlays().is_empty());
}

#[test]
fn test_switching_to_seats_discards_overlay_drafts() {
    let mut map = unit_map();
    map.enter_overlay_registration().unwrap();
    drag(&mut map, (0.0, 0.0), (10.0, 10.0));
    assert_eq!(map.coordinator().pending_overlays().len(), 1);

    map.toggle_seat_registration().unwrap();

    assert_eq!(map.mode(), Mode::SeatRegistration);
    assert!(map.coordinator().pending_overlays().is_empty());
}

#[test]
fn test_entering_a_mode_while_another_is_active_is_refused() {
    let mut map = unit_map();
    map.enter_seat_registration().unwrap();
    assert!(matches!(
        map.enter_overlay_registration(),
        Err(RegistrationError::ModeBusy { .. })
    ));
    assert_eq!(map.mode(), Mode::SeatRegistration);
}

#[test]
fn test_overlay_drafts_keep_drawing_order() {
    let mut map = unit_map();
    map.enter_overlay_registration().unwrap();
    drag(&mut map, (0.0, 0.0), (10.0, 10.0));
    drag(&mut map, (50.0, 50.0), (60.0, 70.0));

    let drafts = map.coordinator().pending_overlays();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].rect, rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(drafts[1].rect, rect(50.0, 50.0, 10.0, 20.0));
    assert_ne!(drafts[0].temp_id, drafts[1].temp_id);
    assert!(drafts.iter().all(|d| d.name.is_empty()));
}

#[test]
fn test_click_without_drag_follows_zero_area_policy() {
    let mut map = unit_map();
    map.enter_overlay_registration().unwrap();
    map.handle_pointer(PointerEvent::down(5.0, 5.0));
    map.handle_pointer(PointerEvent::drag_to(5.0, 5.0));
    assert!(matches!(
        map.handle_pointer(PointerEvent::up(5.0, 5.0)),
        PointerOutcome::Finalized(_)
    ));

    map.update_coordinator(|c| {
        c.set_policy(seatkit_map::RegistrationPolicy {
            accept_zero_area: false,
        })
    });
    map.handle_pointer(PointerEvent::down(5.0, 5.0));
    map.handle_pointer(PointerEvent::drag_to(5.0, 5.0));
    assert_eq!(
        map.handle_pointer(PointerEvent::up(5.0, 5.0)),
        PointerOutcome::Dropped
    );
    assert_eq!(map.coordinator().pending_overlays().len(), 1);
}
