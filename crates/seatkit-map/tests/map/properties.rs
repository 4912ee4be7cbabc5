//! Property tests for the drag gesture.

use proptest::prelude::*;

use seatkit_core::{rectangle_from_points, Mode, Point};
use seatkit_map::{drag_eligible, DragGesture, PointerEvent, SeatMap, Viewport};

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn prop_release_depends_only_on_start_and_last_point(
        start in point(),
        path in prop::collection::vec(point(), 1..20),
    ) {
        let mut drag = DragGesture::new();
        drag.press(start, true);
        for p in &path {
            drag.motion(*p, true);
        }
        let last = *path.last().unwrap();
        prop_assert_eq!(drag.release(), Some(rectangle_from_points(start, last)));
        prop_assert!(!drag.is_dragging());
    }

    #[test]
    fn prop_candidate_never_negative(start in point(), end in point()) {
        let mut drag = DragGesture::new();
        drag.press(start, true);
        let rect = drag.motion(end, true).unwrap();
        prop_assert!(rect.width() >= 0.0);
        prop_assert!(rect.height() >= 0.0);
    }

    #[test]
    fn prop_idle_presses_never_drag(x in 0.0..800.0f64, y in 0.0..600.0f64) {
        let mut map = SeatMap::new(Viewport::default(), Default::default());
        map.handle_pointer(PointerEvent::down(x, y));
        prop_assert!(!map.drag().is_dragging());
        prop_assert!(!drag_eligible(Mode::Idle, true));
    }

    #[test]
    fn prop_overlay_drag_matches_world_points(
        x1 in 0.0..800.0f64, y1 in 0.0..600.0f64,
        x2 in 0.0..800.0f64, y2 in 0.0..600.0f64,
    ) {
        let mut map = SeatMap::new(Viewport::default(), Default::default());
        map.enter_overlay_registration().unwrap();
        let expected =
            rectangle_from_points(map.pixel_to_world(x1, y1), map.pixel_to_world(x2, y2));

        map.handle_pointer(PointerEvent::down(x1, y1));
        map.handle_pointer(PointerEvent::drag_to(x2, y2));
        map.handle_pointer(PointerEvent::up(x2, y2));

        let drafts = map.coordinator().pending_overlays();
        prop_assert_eq!(drafts.len(), 1);
        prop_assert_eq!(drafts[0].rect, expected);
    }
}
