use egui::{Color32, Stroke as EguiStroke, vec2};

use crate::PaintApp;
use crate::app::Dialog;
use crate::stroke::{BlendMode, Stroke};

const SWATCH_SIZE: f32 = 24.0;
const SWATCHES_PER_ROW: usize = 4;

fn describe(stroke: &Stroke) -> String {
    let tool = match stroke.style().blend_mode {
        BlendMode::Normal => "Stroke",
        BlendMode::Erase => "Erase",
    };
    format!("{} ({} seg)", tool, stroke.segments().len())
}

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            // Palette swatches
            let palette = app.palette().to_vec();
            let selected = app.current_color();
            egui::Grid::new("palette_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                for (index, color) in palette.iter().enumerate() {
                    let outline = if selected == Some(index) {
                        EguiStroke::new(3.0, Color32::DARK_GRAY)
                    } else {
                        EguiStroke::new(1.0, Color32::GRAY)
                    };
                    let swatch = egui::Button::new("")
                        .fill(*color)
                        .stroke(outline)
                        .min_size(vec2(SWATCH_SIZE, SWATCH_SIZE));
                    if ui.add(swatch).clicked() {
                        log::info!("Color selected from palette: {:?}", color);
                        app.select_color(index);
                    }
                    if (index + 1) % SWATCHES_PER_ROW == 0 {
                        ui.end_row();
                    }
                }
            });
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                if ui.button("🖌 Brush").clicked() {
                    app.open_dialog(Dialog::BrushSize);
                }
                if ui.button("⌫ Eraser").clicked() {
                    app.open_dialog(Dialog::EraserSize);
                }
                if ui.button("New").clicked() {
                    app.open_dialog(Dialog::NewDrawing);
                }
                if ui.button("Save").clicked() {
                    app.open_dialog(Dialog::SaveDrawing);
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.surface().can_undo();
                let can_redo = app.surface().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            let history = app.surface().history();
            ui.horizontal(|ui| {
                ui.label(format!("Committed: {}", history.committed().len()));
                ui.label(format!("Undone: {}", history.undone().len()));
            });

            egui::Grid::new("stroke_history_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Committed");
                    ui.strong("Undone");
                    ui.end_row();

                    // Newest first, like the tops of two stacks
                    let mut committed = history.committed().iter().rev();
                    let mut undone = history.undone().iter().rev();
                    loop {
                        let (left, right) = (committed.next(), undone.next());
                        if left.is_none() && right.is_none() {
                            break;
                        }
                        ui.label(left.map(|s| describe(s)).unwrap_or_default());
                        ui.label(right.map(|s| describe(s)).unwrap_or_default());
                        ui.end_row();
                    }
                });

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
