use super::*;
use crate::config::{ColorSpec, Config};
use crate::draw::ShapeDescriptor;
use crate::draw::color::{BLUE, RED};
use std::time::Duration;

fn session() -> Session {
    Session::new(&Config::default()).expect("session creation")
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn sample(pointer: Option<(i32, i32)>, fingers: u8) -> Sample {
    Sample {
        pointer,
        finger_count: fingers,
        hand_detected: true,
    }
}

#[test]
fn a_new_session_reports_idle_defaults() {
    let session = session();
    let status = session.status();
    assert_eq!(status.mode, "idle");
    assert_eq!(status.color, "red");
    assert_eq!(status.color_index, 0);
    assert_eq!(status.thickness, 5);
    assert_eq!(status.eraser_thickness, 70);
    assert!(!status.can_undo);
    assert!(!status.can_redo);
    assert!(!status.hand_detected);
}

#[test]
fn pointer_samples_in_draw_mode_become_a_stroke() {
    let mut session = session();
    let t0 = Instant::now();

    for (i, point) in [(10, 10), (20, 20), (30, 30)].into_iter().enumerate() {
        session.handle_sample(&sample(Some(point), 1), t0 + secs(0.03 * i as f64));
    }
    // Still in progress: nothing committed yet
    assert!(session.strokes().is_empty());

    session.handle_sample(&sample(None, 2), t0 + secs(0.2));
    assert_eq!(session.strokes().len(), 1);
    assert_eq!(session.strokes()[0].points, vec![(10, 10), (20, 20), (30, 30)]);
    assert!(matches!(session.strokes()[0].kind, StrokeKind::Freehand));
    assert_eq!(session.strokes()[0].color, RED);
}

#[test]
fn losing_the_hand_commits_the_stroke() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((5, 5)), 1), t0);
    session.handle_sample(&sample(Some((6, 6)), 1), t0 + secs(0.03));
    session.handle_sample(
        &Sample {
            pointer: None,
            finger_count: 1,
            hand_detected: false,
        },
        t0 + secs(0.06),
    );

    assert_eq!(session.strokes().len(), 1);
    assert!(!session.status().hand_detected);
    // The stale count never reached the controller; mode survives
    assert_eq!(session.status().mode, "draw");
}

#[test]
fn erase_mode_strokes_carry_the_eraser_thickness() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((5, 5)), 0), t0);
    session.handle_sample(&sample(Some((50, 50)), 0), t0 + secs(0.03));
    session.handle_sample(&sample(None, 2), t0 + secs(0.06));

    let stroke = &session.strokes()[0];
    assert!(matches!(stroke.kind, StrokeKind::Erase));
    assert_eq!(stroke.thickness, 70);
}

#[test]
fn pause_mode_ignores_pointer_samples() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((0, 0)), 5), t0);
    session.handle_sample(&sample(Some((10, 10)), 5), t0 + secs(0.03));
    session.handle_sample(&sample(None, 2), t0 + secs(0.06));

    assert!(session.strokes().is_empty());
    assert!(!session.status().can_undo);
}

#[test]
fn a_color_change_splits_the_stroke() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((0, 0)), 1), t0);
    session.handle_sample(&sample(Some((10, 0)), 1), t0 + secs(0.1));
    // Three fingers held while the pointer keeps moving; mode stays Draw
    session.handle_sample(&sample(Some((20, 0)), 3), t0 + secs(0.2));
    session.handle_sample(&sample(Some((30, 0)), 3), t0 + secs(1.8));
    session.handle_sample(&sample(Some((40, 0)), 1), t0 + secs(1.9));
    session.handle_sample(&sample(None, 2), t0 + secs(2.0));

    assert_eq!(session.strokes().len(), 2);
    assert_eq!(session.strokes()[0].color, RED);
    assert_eq!(session.strokes()[0].points, vec![(0, 0), (10, 0), (20, 0)]);
    assert_eq!(session.strokes()[1].color, BLUE);
    assert_eq!(session.strokes()[1].points, vec![(30, 0), (40, 0)]);
}

#[test]
fn a_held_color_gesture_then_a_rough_circle_recognizes() {
    let mut session = session();
    let t0 = Instant::now();
    assert_eq!(session.status().color, "red");

    // Hold three fingers past the 1.5 s confirmation
    session.handle_sample(&sample(None, 3), t0);
    session.handle_sample(&sample(None, 3), t0 + secs(1.6));
    assert_eq!(session.status().color, "blue");

    // A sustained hold never fires twice
    session.handle_sample(&sample(None, 3), t0 + secs(3.0));
    assert_eq!(session.status().color, "blue");

    // Draw a rough circle around (100, 100) with alternating radial jitter
    let t1 = t0 + secs(4.0);
    for i in 0..40 {
        let angle = i as f64 / 40.0 * std::f64::consts::TAU;
        let radius = if i % 2 == 0 { 54.0 } else { 46.0 };
        let point = (
            (100.0 + radius * angle.cos()).round() as i32,
            (100.0 + radius * angle.sin()).round() as i32,
        );
        session.handle_sample(&sample(Some(point), 1), t1 + secs(0.03 * i as f64));
    }
    session.handle_sample(&sample(None, 2), t1 + secs(2.0));

    assert!(session.apply_shape_recognition());
    match session.strokes().last().map(|s| &s.kind) {
        Some(StrokeKind::Shape(ShapeDescriptor::Circle { center, radius })) => {
            assert!((center.0 - 100).abs() <= 3);
            assert!((center.1 - 100).abs() <= 3);
            assert!((radius - 50).abs() <= 5);
        }
        other => panic!("expected a circle, got {other:?}"),
    }
    assert_eq!(session.strokes().last().map(|s| s.color), Some(BLUE));

    // The redrawn raster still encodes
    let mut buffer = Vec::new();
    session.export_to(&mut buffer).expect("png encode");
    assert_eq!(&buffer[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn short_strokes_do_not_convert() {
    let mut session = session();
    let t0 = Instant::now();

    for i in 0..5 {
        session.handle_sample(&sample(Some((i * 10, 0)), 1), t0 + secs(0.03 * i as f64));
    }
    session.handle_sample(&sample(None, 2), t0 + secs(1.0));

    assert!(!session.apply_shape_recognition());
    assert!(matches!(session.strokes()[0].kind, StrokeKind::Freehand));
}

#[test]
fn undo_and_redo_drive_the_canvas() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((0, 0)), 1), t0);
    session.handle_sample(&sample(Some((10, 10)), 1), t0 + secs(0.03));
    session.handle_sample(&sample(None, 2), t0 + secs(0.06));
    assert!(session.status().can_undo);

    assert!(session.undo());
    assert!(session.strokes().is_empty());
    assert!(session.status().can_redo);

    assert!(session.redo());
    assert_eq!(session.strokes().len(), 1);
    assert!(!session.redo());
}

#[test]
fn clear_wipes_strokes_and_history() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((0, 0)), 1), t0);
    session.handle_sample(&sample(Some((10, 10)), 1), t0 + secs(0.03));
    session.handle_sample(&sample(None, 2), t0 + secs(0.06));

    session.clear();
    assert!(session.strokes().is_empty());
    assert!(!session.status().can_undo);
    assert!(!session.status().can_redo);
}

#[test]
fn unknown_color_names_are_rejected() {
    let mut session = session();

    let err = session.set_color_by_name("chartreuse").unwrap_err();
    assert!(matches!(err, SessionError::UnknownColor { .. }));
    assert_eq!(session.status().color, "red");

    // Background black is valid in the config but not a pen color
    assert!(session.set_color_by_name("black").is_err());

    session.set_color_by_name("Green").expect("palette color");
    assert_eq!(session.status().color, "green");
    assert_eq!(session.status().color_index, 2);
}

#[test]
fn thickness_is_validated_against_the_range() {
    let mut session = session();

    assert!(matches!(
        session.set_brush_thickness(1),
        Err(SessionError::ThicknessOutOfRange { .. })
    ));
    assert!(matches!(
        session.set_brush_thickness(31),
        Err(SessionError::ThicknessOutOfRange { .. })
    ));
    assert_eq!(session.status().thickness, 5);

    session.set_brush_thickness(12).expect("valid thickness");
    assert_eq!(session.status().thickness, 12);
}

#[test]
fn the_configured_default_color_seeds_the_gesture_cycle() {
    let mut config = Config::default();
    config.drawing.default_color = ColorSpec::Name("green".to_string());
    let mut session = Session::new(&config).expect("session creation");
    assert_eq!(session.status().color, "green");

    let t0 = Instant::now();
    session.handle_sample(&sample(None, 3), t0);
    session.handle_sample(&sample(None, 3), t0 + secs(1.5));
    assert_eq!(session.status().color, "yellow");
}

#[test]
fn status_serializes_to_json() {
    let session = session();
    let json = serde_json::to_value(session.status()).expect("serialize");
    assert_eq!(json["mode"], "idle");
    assert_eq!(json["color"], "red");
    assert_eq!(json["can_undo"], false);
}

#[test]
fn export_writes_the_composited_raster() {
    let mut session = session();
    let t0 = Instant::now();

    session.handle_sample(&sample(Some((0, 0)), 1), t0);
    session.handle_sample(&sample(Some((200, 200)), 1), t0 + secs(0.03));

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.png");
    session.export_png(&path).expect("export");
    assert!(path.exists());
}
