use egui::{Color32, pos2};
use inkink::{BlendMode, DrawingSurface, PointerId, SurfaceConfig, SurfaceEvent};
use std::cell::RefCell;
use std::rc::Rc;

const MOUSE: PointerId = PointerId::Mouse;

fn create_test_surface() -> DrawingSurface {
    DrawingSurface::new(96, 96, &SurfaceConfig::default())
}

fn scribble(surface: &mut DrawingSurface, seed: usize) {
    let offset = (seed % 7) as f32 * 9.0;
    surface.on_pointer_down(MOUSE, pos2(5.0 + offset, 10.0));
    for step in 1..6 {
        let t = step as f32;
        surface.on_pointer_move(MOUSE, pos2(5.0 + offset + t * 6.0, 10.0 + t * t * 2.5));
    }
    surface.on_pointer_up(MOUSE);
}

fn assert_replay_equivalent(surface: &DrawingSurface) {
    assert_eq!(surface.replay_committed(), *surface.raster());
}

#[test]
fn test_replay_equivalence_across_interleavings() {
    // 'c' = commit, 'u' = undo, 'r' = redo
    let scripts = ["ccuur", "cucrcu", "cccuuurrr", "cuucrr", "ccucuurr"];

    for script in scripts {
        let mut surface = create_test_surface();
        for (i, op) in script.chars().enumerate() {
            match op {
                'c' => scribble(&mut surface, i),
                'u' => {
                    surface.undo();
                }
                'r' => {
                    surface.redo();
                }
                _ => unreachable!(),
            }
            assert_replay_equivalent(&surface);
        }
    }
}

#[test]
fn test_undo_removes_baked_pixels() {
    let mut surface = create_test_surface();
    scribble(&mut surface, 0);
    assert!(!surface.raster().is_blank());

    assert!(surface.undo());
    assert!(surface.raster().is_blank());

    assert!(surface.redo());
    assert!(!surface.raster().is_blank());
    assert_replay_equivalent(&surface);
}

#[test]
fn test_undoing_an_erase_brings_paint_back() {
    let mut surface = create_test_surface();
    surface.set_stroke_width(30.0);
    scribble(&mut surface, 0);
    let painted = surface.raster().clone();

    surface.set_style(Color32::BLACK, BlendMode::Erase);
    surface.set_stroke_width(60.0);
    scribble(&mut surface, 0);
    assert_ne!(*surface.raster(), painted);

    assert!(surface.undo());
    assert_eq!(*surface.raster(), painted);
}

#[test]
fn test_resize_rebuilds_raster_from_history() {
    let mut surface = create_test_surface();
    scribble(&mut surface, 1);
    scribble(&mut surface, 2);

    assert!(surface.resize(128, 64));
    assert_eq!(surface.raster().size(), [128, 64]);
    assert!(!surface.raster().is_blank());
    assert_replay_equivalent(&surface);
}

#[test]
fn test_export_is_a_pure_read() {
    let mut surface = create_test_surface();
    scribble(&mut surface, 0);
    surface.on_pointer_down(MOUSE, pos2(10.0, 80.0));
    surface.on_pointer_move(MOUSE, pos2(60.0, 80.0));
    surface.take_redraw();

    let raster_before = surface.raster().clone();
    let snapshot = surface.export_raster_snapshot();

    assert_eq!(snapshot.dimensions(), (96, 96));
    assert_eq!(*surface.raster(), raster_before);
    assert!(surface.is_drawing());
    assert!(!surface.needs_redraw());
    // The live stroke is part of the exported frame
    assert_ne!(snapshot, raster_before.snapshot());
}

#[test]
fn test_events_are_emitted_in_order() {
    let mut surface = create_test_surface();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    surface.subscribe(Box::new(move |event: &SurfaceEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    surface.on_pointer_down(MOUSE, pos2(10.0, 10.0));
    surface.on_pointer_move(MOUSE, pos2(20.0, 10.0));
    surface.on_pointer_move(MOUSE, pos2(21.0, 10.0));
    surface.on_pointer_up(MOUSE);
    surface.undo();
    surface.on_pointer_down(MOUSE, pos2(50.0, 50.0));
    surface.on_pointer_up(MOUSE);
    surface.redo();
    surface.clear_all();

    assert_eq!(
        *seen.borrow(),
        vec![
            SurfaceEvent::StrokeStarted,
            SurfaceEvent::SegmentAdded,
            SurfaceEvent::StrokeCommitted { segments: 2 },
            SurfaceEvent::Undone,
            SurfaceEvent::RedoDiscarded { count: 1 },
            SurfaceEvent::StrokeStarted,
            SurfaceEvent::StrokeCommitted { segments: 1 },
            SurfaceEvent::Cleared,
        ]
    );
}
