use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
            let canvas_rect = response.rect;

            // Handle input
            app.handle_canvas(ctx, canvas_rect, response.layer_id);

            // Render the canvas
            app.render_canvas(ctx, &painter, canvas_rect);
        });
}
