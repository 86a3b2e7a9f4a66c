use egui::pos2;
use inkink::{DrawingSurface, PointerId, SurfaceConfig};
use std::sync::Arc;

const MOUSE: PointerId = PointerId::Mouse;

fn create_test_surface() -> DrawingSurface {
    DrawingSurface::new(120, 80, &SurfaceConfig::default())
}

fn draw(surface: &mut DrawingSurface, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().unwrap();
    surface.on_pointer_down(MOUSE, pos2(first.0, first.1));
    for &(x, y) in rest {
        surface.on_pointer_move(MOUSE, pos2(x, y));
    }
    surface.on_pointer_up(MOUSE);
}

fn draw_n(surface: &mut DrawingSurface, n: usize) {
    for i in 0..n {
        let y = 10.0 + i as f32 * 8.0;
        draw(surface, &[(10.0, y), (40.0, y), (70.0, y + 3.0)]);
    }
}

#[test]
fn test_undo_redo_restores_committed_exactly() {
    for n in 1..=5 {
        let mut surface = create_test_surface();
        draw_n(&mut surface, n);
        let before: Vec<_> = surface.history().committed().iter().cloned().collect();

        assert!(surface.undo());
        assert!(surface.redo());

        let after: Vec<_> = surface.history().committed().iter().cloned().collect();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert!(Arc::ptr_eq(a, b));
        }
        assert!(surface.history().undone().is_empty());
    }
}

#[test]
fn test_new_stroke_clears_redo_future() {
    let mut surface = create_test_surface();
    draw_n(&mut surface, 2);
    assert!(surface.undo());
    assert_eq!(surface.history().undone().len(), 1);

    draw(&mut surface, &[(5.0, 70.0), (50.0, 70.0)]);
    assert!(surface.history().undone().is_empty());
    assert!(!surface.redo());
    assert_eq!(surface.history().committed().len(), 2);
}

#[test]
fn test_redo_future_is_dropped_at_pointer_down() {
    let mut surface = create_test_surface();
    draw_n(&mut surface, 1);
    assert!(surface.undo());

    surface.on_pointer_down(MOUSE, pos2(30.0, 30.0));
    assert!(surface.history().undone().is_empty());
    assert!(!surface.can_redo());
}

#[test]
fn test_empty_stack_operations_are_noops() {
    let mut surface = create_test_surface();
    assert!(!surface.undo());
    assert!(!surface.redo());
    assert!(surface.history().committed().is_empty());
    assert!(surface.history().undone().is_empty());

    draw_n(&mut surface, 1);
    assert!(!surface.redo());
    assert_eq!(surface.history().committed().len(), 1);
    assert!(surface.undo());
    assert!(!surface.undo());
    assert_eq!(surface.history().undone().len(), 1);
}

#[test]
fn test_multiple_undos_redo_in_reverse_order() {
    let mut surface = create_test_surface();
    draw_n(&mut surface, 3);
    let strokes: Vec<_> = surface.history().committed().iter().cloned().collect();

    assert!(surface.undo());
    assert!(surface.undo());
    assert!(Arc::ptr_eq(surface.history().undone().peek().unwrap(), &strokes[1]));

    assert!(surface.redo());
    assert!(Arc::ptr_eq(surface.history().committed().peek().unwrap(), &strokes[1]));
    assert!(surface.redo());
    assert!(Arc::ptr_eq(surface.history().committed().peek().unwrap(), &strokes[2]));
}

#[test]
fn test_clear_all_empties_everything() {
    let mut surface = create_test_surface();
    draw_n(&mut surface, 3);
    surface.undo();

    assert!(surface.clear_all());
    assert!(surface.history().committed().is_empty());
    assert!(surface.history().undone().is_empty());
    assert!(surface.raster().is_blank());
    assert!(!surface.clear_all());
}
