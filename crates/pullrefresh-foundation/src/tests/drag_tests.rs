use super::*;
use crate::nodes::input::types::PointerEvent;
use pullrefresh_ui_graphics::Point;

fn event(kind: PointerEventKind, y: f32, uptime_millis: u64) -> PointerEvent {
    PointerEvent::new(kind, Point::new(50.0, y), uptime_millis)
}

#[test]
fn movement_within_slop_is_not_a_drag() {
    let mut gesture = DragGesture::new();
    assert_eq!(gesture.on_event(&event(PointerEventKind::Down, 100.0, 0)), None);
    assert_eq!(gesture.on_event(&event(PointerEventKind::Move, 105.0, 8)), None);
    assert!(!gesture.is_dragging());
    assert_eq!(gesture.on_event(&event(PointerEventKind::Up, 105.0, 16)), None);
}

#[test]
fn deltas_after_slop_exclude_the_slop() {
    let mut gesture = DragGesture::new();
    gesture.on_event(&event(PointerEventKind::Down, 100.0, 0));

    let first = event(PointerEventKind::Move, 120.0, 16);
    assert_eq!(
        gesture.on_event(&first),
        Some(DragAction::Delta(Offset::new(0.0, 12.0)))
    );
    assert!(first.is_consumed());
    assert_eq!(
        gesture.on_event(&event(PointerEventKind::Move, 150.0, 32)),
        Some(DragAction::Delta(Offset::new(0.0, 30.0)))
    );
}

#[test]
fn release_reports_velocity_over_recent_window() {
    let mut gesture = DragGesture::new();
    gesture.on_event(&event(PointerEventKind::Down, 0.0, 0));
    gesture.on_event(&event(PointerEventKind::Move, 50.0, 50));
    gesture.on_event(&event(PointerEventKind::Move, 100.0, 100));

    match gesture.on_event(&event(PointerEventKind::Up, 100.0, 100)) {
        Some(DragAction::Release(velocity)) => {
            assert!((velocity.y - 1000.0).abs() < 1.0, "got {:?}", velocity);
        }
        other => panic!("expected release, got {:?}", other),
    }
    assert!(!gesture.is_dragging());
}

#[test]
fn cancel_during_drag_is_reported() {
    let mut gesture = DragGesture::new();
    gesture.on_event(&event(PointerEventKind::Down, 0.0, 0));
    gesture.on_event(&event(PointerEventKind::Move, 40.0, 16));
    assert_eq!(
        gesture.on_event(&event(PointerEventKind::Cancel, 40.0, 20)),
        Some(DragAction::Cancel)
    );
}
