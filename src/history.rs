use crate::stroke::StrokeRef;

/// LIFO stack of finalized strokes.
///
/// Iteration runs bottom to top (oldest first), which is also the order in
/// which strokes must be replayed onto a blank raster.
#[derive(Debug, Default, Clone)]
pub struct StrokeStack {
    strokes: Vec<StrokeRef>,
}

impl StrokeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a stroke on top of the stack
    pub fn push(&mut self, stroke: StrokeRef) {
        self.strokes.push(stroke);
    }

    /// Remove and return the top stroke, or `None` when empty
    pub fn pop(&mut self) -> Option<StrokeRef> {
        self.strokes.pop()
    }

    /// The top stroke without removing it
    pub fn peek(&self) -> Option<&StrokeRef> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &StrokeRef> + ExactSizeIterator {
        self.strokes.iter()
    }

    fn clear(&mut self) {
        self.strokes.clear();
    }
}

/// Undo/redo history of committed strokes.
///
/// `committed` and `undone` partition every stroke that was finalized and not
/// yet discarded. Strokes only ever move between the two tops.
#[derive(Debug, Default, Clone)]
pub struct StrokeHistory {
    /// Strokes currently part of the drawing, oldest at the bottom
    committed: StrokeStack,
    /// Strokes that can be redone, most recently undone on top
    undone: StrokeStack,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized stroke. Anything that could still be redone is
    /// dropped for good.
    pub fn commit(&mut self, stroke: StrokeRef) {
        self.committed.push(stroke);
        self.undone.clear();
    }

    /// Move the newest committed stroke to the undone stack.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back on top of `committed`.
    /// Returns the restored stroke, or `None` if there was nothing to redo.
    pub fn redo(&mut self) -> Option<StrokeRef> {
        let stroke = self.undone.pop()?;
        self.committed.push(stroke.clone());
        Some(stroke)
    }

    /// Permanently drop every undone stroke. Returns how many were dropped.
    pub fn discard_redo(&mut self) -> usize {
        let dropped = self.undone.len();
        self.undone.clear();
        dropped
    }

    /// Empty both stacks
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    pub fn committed(&self) -> &StrokeStack {
        &self.committed
    }

    pub fn undone(&self) -> &StrokeStack {
        &self.undone
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoother::Segment;
    use crate::stroke::{PaintStyle, Stroke};
    use egui::pos2;
    use std::sync::Arc;

    fn stroke_at(x: f32) -> StrokeRef {
        Stroke::new_ref(
            PaintStyle::default(),
            vec![Segment::Line {
                from: pos2(x, 0.0),
                to: pos2(x, 10.0),
            }],
        )
    }

    #[test]
    fn test_stack_contract() {
        let mut stack = StrokeStack::new();
        assert!(stack.peek().is_none());
        assert!(stack.pop().is_none());

        let a = stroke_at(1.0);
        let b = stroke_at(2.0);
        stack.push(a.clone());
        stack.push(b.clone());
        assert_eq!(stack.len(), 2);
        assert!(Arc::ptr_eq(stack.peek().unwrap(), &b));
        assert!(Arc::ptr_eq(&stack.pop().unwrap(), &b));
        assert!(Arc::ptr_eq(&stack.pop().unwrap(), &a));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_undo_redo_moves_between_tops() {
        let mut history = StrokeHistory::new();
        let a = stroke_at(1.0);
        let b = stroke_at(2.0);
        history.commit(a.clone());
        history.commit(b.clone());

        assert!(history.undo());
        assert_eq!(history.committed().len(), 1);
        assert!(Arc::ptr_eq(history.undone().peek().unwrap(), &b));

        let restored = history.redo().unwrap();
        assert!(Arc::ptr_eq(&restored, &b));
        assert!(history.undone().is_empty());
        assert_eq!(history.committed().len(), 2);
    }

    #[test]
    fn test_commit_clears_undone() {
        let mut history = StrokeHistory::new();
        history.commit(stroke_at(1.0));
        assert!(history.undo());
        assert!(history.can_redo());

        history.commit(stroke_at(2.0));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_empty_operations_are_noops() {
        let mut history = StrokeHistory::new();
        assert!(!history.undo());
        assert!(history.redo().is_none());
        assert_eq!(history.discard_redo(), 0);
        assert!(history.committed().is_empty());
        assert!(history.undone().is_empty());
    }
}
