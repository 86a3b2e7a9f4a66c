use egui::{Context, LayerId, PointerButton, Pos2, Rect, TouchPhase};

/// Identifies the device contact that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Pointer events in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Contact started (primary button pressed or finger down)
    PointerDown { pointer: PointerId, pos: Pos2 },
    /// Contact moved
    PointerMove { pointer: PointerId, pos: Pos2 },
    /// Contact ended or was cancelled
    PointerUp { pointer: PointerId },
}

impl InputEvent {
    pub fn pointer(&self) -> PointerId {
        match *self {
            InputEvent::PointerDown { pointer, .. }
            | InputEvent::PointerMove { pointer, .. }
            | InputEvent::PointerUp { pointer } => pointer,
        }
    }
}

/// Handles converting raw egui input into surface-local InputEvents
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    // Whether the primary mouse button went down inside the canvas
    mouse_down: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            mouse_down: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    // Contacts may only start on the visible part of the canvas
    fn starts_here(&self, pos: Pos2, covered: &impl Fn(Pos2) -> bool) -> bool {
        self.canvas_rect.contains(pos) && !covered(pos)
    }

    /// Translate a single raw egui event. `covered` tells whether another
    /// layer, such as a window, lies over a screen position.
    pub fn translate(
        &mut self,
        event: &egui::Event,
        covered: impl Fn(Pos2) -> bool,
    ) -> Option<InputEvent> {
        match event {
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } if self.starts_here(*pos, &covered) => {
                self.mouse_down = true;
                Some(InputEvent::PointerDown {
                    pointer: PointerId::Mouse,
                    pos: self.to_local(*pos),
                })
            }
            egui::Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            }
            | egui::Event::PointerGone
                if self.mouse_down =>
            {
                self.mouse_down = false;
                Some(InputEvent::PointerUp {
                    pointer: PointerId::Mouse,
                })
            }
            egui::Event::PointerMoved(pos) if self.mouse_down => Some(InputEvent::PointerMove {
                pointer: PointerId::Mouse,
                pos: self.to_local(*pos),
            }),
            egui::Event::Touch { id, phase, pos, .. } => {
                let pointer = PointerId::Touch(id.0);
                match phase {
                    TouchPhase::Start if self.starts_here(*pos, &covered) => {
                        Some(InputEvent::PointerDown {
                            pointer,
                            pos: self.to_local(*pos),
                        })
                    }
                    TouchPhase::Move => Some(InputEvent::PointerMove {
                        pointer,
                        pos: self.to_local(*pos),
                    }),
                    TouchPhase::End | TouchPhase::Cancel => Some(InputEvent::PointerUp { pointer }),
                    TouchPhase::Start => None,
                }
            }
            _ => None,
        }
    }

    /// Process this frame's raw egui input and generate our InputEvents.
    /// Presses landing on any layer above `canvas_layer` are left to that layer.
    pub fn process_input(&mut self, ctx: &Context, canvas_layer: LayerId) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.events.clone());
        let covered = |pos| ctx.layer_id_at(pos).is_some_and(|layer| layer != canvas_layer);
        raw_events
            .iter()
            .filter_map(|event| self.translate(event, covered))
            .collect()
    }
}
