use egui::{Color32, Key, LayerId, Modifiers, Rect};

use crate::config::{BrushSize, SurfaceConfig};
use crate::event::SurfaceEvent;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::stroke::BlendMode;
use crate::surface::DrawingSurface;

/// Which confirmation or chooser window is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    BrushSize,
    EraserSize,
    NewDrawing,
    SaveDrawing,
}

pub struct PaintApp {
    config: SurfaceConfig,
    surface: DrawingSurface,
    renderer: Renderer,
    input: InputHandler,
    palette: Vec<Color32>,
    // Index into `palette` of the color in use; None while erasing
    current_color: Option<usize>,
    dialog: Option<Dialog>,
    // Result of the last save, shown in the tools panel
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// `config` (from the command environment) wins over the one eframe
    /// persisted on the last shutdown.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<SurfaceConfig>) -> Self {
        let config = config
            .or_else(|| {
                let stored = eframe::get_value::<SurfaceConfig>(cc.storage?, eframe::APP_KEY)?;
                stored.validate().is_ok().then_some(stored)
            })
            .unwrap_or_default();
        let mut app = Self::with_config(config);

        // Surface changes outside of input handling still need a new frame
        let ctx = cc.egui_ctx.clone();
        app.surface.subscribe(Box::new(move |event: &SurfaceEvent| {
            log::debug!("Surface event: {:?}", event);
            if event.needs_redraw() {
                ctx.request_repaint();
            }
        }));
        app
    }

    pub fn with_config(config: SurfaceConfig) -> Self {
        let palette = config.palette_colors();
        let current_color = palette.iter().position(|c| *c == config.initial_color);
        Self {
            surface: DrawingSurface::new(0, 0, &config),
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::NOTHING),
            palette,
            current_color,
            dialog: None,
            status: None,
            config,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn palette(&self) -> &[Color32] {
        &self.palette
    }

    pub fn current_color(&self) -> Option<usize> {
        self.current_color
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    /// Switch back to painting with a palette color at the last brush size
    pub fn select_color(&mut self, index: usize) {
        let Some(&color) = self.palette.get(index) else {
            return;
        };
        self.current_color = Some(index);
        self.surface.set_style(color, BlendMode::Normal);
        let last = self.surface.last_brush_size();
        self.surface.set_stroke_width(last);
    }

    pub fn choose_brush(&mut self, size: BrushSize) {
        let width = self.config.brush_width(size);
        let color = self.selected_color();
        self.surface.set_style(color, BlendMode::Normal);
        self.surface.set_stroke_width(width);
        self.surface.set_last_brush_size(width);
    }

    pub fn choose_eraser(&mut self, size: BrushSize) {
        let width = self.config.brush_width(size);
        let color = self.selected_color();
        self.surface.set_style(color, BlendMode::Erase);
        self.surface.set_stroke_width(width);
    }

    fn selected_color(&self) -> Color32 {
        self.current_color
            .and_then(|i| self.palette.get(i).copied())
            .unwrap_or(self.surface.style().color)
    }

    pub fn undo(&mut self) -> bool {
        self.surface.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.surface.redo()
    }

    pub fn new_drawing(&mut self) {
        self.surface.clear_all();
    }

    /// Save the current frame as PNG into the configured directory
    pub fn save_drawing(&mut self) {
        let snapshot = self.surface.export_raster_snapshot();
        self.status = Some(match export::save_png(&snapshot, &self.config.save_directory) {
            Ok(path) => format!("Drawing saved to {}", path.display()),
            Err(err) => {
                log::error!("Failed to save drawing: {}", err);
                "Oops! Image could not be saved.".to_owned()
            }
        });
    }

    /// Track the canvas rect and forward this frame's pointer input. Presses
    /// on windows above `canvas_layer` never reach the surface.
    pub fn handle_canvas(&mut self, ctx: &egui::Context, canvas_rect: Rect, canvas_layer: LayerId) {
        let width = canvas_rect.width().max(0.0).round() as u32;
        let height = canvas_rect.height().max(0.0).round() as u32;
        self.surface.resize(width, height);

        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx, canvas_layer) {
            self.surface.handle_input(event);
        }
    }

    /// Upload a new frame if anything changed, then paint it
    pub fn render_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        if self.surface.take_redraw() || !self.renderer.has_frame() {
            self.renderer.upload(ctx, self.surface.frame().to_color_image());
        }
        self.renderer.render(painter, rect);
    }

    /// Lay out one frame of the whole window
    pub fn show(&mut self, ctx: &egui::Context) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.show_dialog(ctx);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let redo = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z));
        let undo = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z));
        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog else {
            return;
        };

        let title = match dialog {
            Dialog::BrushSize => "Brush size",
            Dialog::EraserSize => "Eraser size",
            Dialog::NewDrawing => "New drawing",
            Dialog::SaveDrawing => "Save drawing",
        };

        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| match dialog {
                Dialog::BrushSize | Dialog::EraserSize => {
                    ui.horizontal(|ui| {
                        for &size in BrushSize::all() {
                            if ui.button(size.label()).clicked() {
                                if dialog == Dialog::BrushSize {
                                    self.choose_brush(size);
                                } else {
                                    self.choose_eraser(size);
                                }
                                close = true;
                            }
                        }
                    });
                }
                Dialog::NewDrawing | Dialog::SaveDrawing => {
                    ui.label(if dialog == Dialog::NewDrawing {
                        "Start new drawing (you will lose the current drawing)?"
                    } else {
                        "Save drawing to disk?"
                    });
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            if dialog == Dialog::NewDrawing {
                                self.new_drawing();
                            } else {
                                self.save_drawing();
                            }
                            close = true;
                        }
                        if ui.button("Cancel").clicked() {
                            close = true;
                        }
                    });
                }
            });

        if close {
            self.dialog = None;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
