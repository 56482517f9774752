use eframe::egui;
use tracing::{error, info};

use brotview_app::{GestureOutcome, GestureState, PanRedraw, PointerButton, ViewportController};
use brotview_core::{Complex, ViewSettings};

/// Status message shown at the bottom of the window: text, time, is-error.
pub(crate) type Notification = (String, std::time::Instant, bool);

/// A viewport plus the widgets that belong to it.
pub(crate) struct ViewPanel {
    pub(crate) title: String,
    pub(crate) controller: ViewportController,
    texture: Option<egui::TextureHandle>,
    iterations_text: String,
    zoom_ratio_text: String,
    clicked: Option<Complex>,
    hovered: Option<Complex>,
}

impl ViewPanel {
    pub(crate) fn new(title: String, controller: ViewportController) -> Self {
        let settings = controller.settings();
        Self {
            title,
            controller,
            texture: None,
            iterations_text: settings.max_iterations.to_string(),
            zoom_ratio_text: settings.zoom_ratio.to_string(),
            clicked: None,
            hovered: None,
        }
    }

    /// Upload a newly finished frame, if the worker delivered one.
    pub(crate) fn poll(&mut self, ctx: &egui::Context) {
        if !self.controller.poll() {
            return;
        }
        if let Some(buffer) = self.controller.buffer() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [buffer.width as usize, buffer.height as usize],
                &buffer.pixels,
            );
            self.texture = Some(ctx.load_texture(
                self.title.clone(),
                image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    /// Paint the canvas and feed its pointer events to the controller.
    /// A triple-click on a Mandelbrot view returns the spawned Julia viewport.
    pub(crate) fn canvas(&mut self, ui: &mut egui::Ui) -> Option<Box<ViewportController>> {
        let (w, h) = self.controller.size();
        let (response, painter) =
            ui.allocate_painter(egui::vec2(w as f32, h as f32), egui::Sense::click_and_drag());

        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        if let Some(ref tex) = self.texture {
            painter.image(tex.id(), response.rect, uv, egui::Color32::WHITE);
        } else {
            painter.rect_filled(response.rect, 0.0, egui::Color32::BLACK);
        }

        self.handle_input(ui.ctx(), &response)
    }

    fn handle_input(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
    ) -> Option<Box<ViewportController>> {
        let rect = response.rect;
        let (w, h) = self.controller.size();
        let to_pixels = |pos: egui::Pos2| {
            (
                ((pos.x - rect.min.x) / rect.width() * w as f32) as f64,
                ((pos.y - rect.min.y) / rect.height() * h as f32) as f64,
            )
        };

        self.hovered = response.hover_pos().map(|pos| {
            let (px, py) = to_pixels(pos);
            self.controller.plane_point(px, py)
        });

        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                let (px, py) = to_pixels(pos);
                self.controller.on_press(px, py);
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let (px, py) = to_pixels(pos);
                self.controller.on_move(px, py);
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            let pos = response.interact_pointer_pos().unwrap_or(rect.center());
            let (px, py) = to_pixels(pos);
            self.controller.on_release(px, py);
        }

        let mut spawned = None;
        for (egui_button, button) in [
            (egui::PointerButton::Primary, PointerButton::Primary),
            (egui::PointerButton::Secondary, PointerButton::Secondary),
        ] {
            let count = if response.triple_clicked_by(egui_button) {
                3
            } else if response.double_clicked_by(egui_button) {
                2
            } else if response.clicked_by(egui_button) {
                1
            } else {
                continue;
            };
            let Some(pos) = response.interact_pointer_pos() else {
                continue;
            };
            let (px, py) = to_pixels(pos);
            match self.controller.on_click(px, py, button, count) {
                GestureOutcome::Coordinates(c) => self.clicked = Some(c),
                GestureOutcome::SpawnJulia(julia) => spawned = Some(julia),
                _ => {}
            }
        }
        spawned
    }

    /// Iteration/zoom fields, read-outs and the export button.
    pub(crate) fn controls(
        &mut self,
        ui: &mut egui::Ui,
        export_dir: &std::path::Path,
        notification: &mut Option<Notification>,
    ) {
        ui.horizontal(|ui| {
            ui.label("Iterations");
            ui.add(egui::TextEdit::singleline(&mut self.iterations_text).desired_width(70.0));
            ui.label("Zoom ratio");
            ui.add(egui::TextEdit::singleline(&mut self.zoom_ratio_text).desired_width(50.0));
            if ui.button("Apply").clicked() {
                self.apply_settings(notification);
            }
        });

        let mut live_pan = self.controller.pan_redraw() == PanRedraw::EveryMove;
        if ui.checkbox(&mut live_pan, "Redraw while dragging").changed() {
            self.controller.set_pan_redraw(if live_pan {
                PanRedraw::EveryMove
            } else {
                PanRedraw::OnRelease
            });
        }

        ui.horizontal(|ui| {
            if ui.button("Save PNG").clicked() {
                self.save_png(export_dir, notification);
            }
            let status = if self.controller.is_rendering() {
                "Rendering\u{2026}"
            } else {
                self.controller.gesture().label()
            };
            ui.weak(status);
            if let Some(frame) = self.controller.frame() {
                ui.weak(format!("{} ms", frame.elapsed.as_millis()));
            }
        });

        ui.label(format!("Zoom: {:.4e}", self.controller.zoomed()));
        ui.label(format!("Window: {}", self.controller.window()));
        if let Some(c) = self.controller.kind().julia_c() {
            ui.label(format!("c = {c}"));
        }
        if let Some(c) = self.clicked {
            ui.label(format!("Clicked: {c}"));
        }
        if let Some(c) = self.hovered {
            ui.weak(format!("Cursor: {c}"));
        }
    }

    fn apply_settings(&mut self, notification: &mut Option<Notification>) {
        match ViewSettings::parse(&self.iterations_text, &self.zoom_ratio_text) {
            Ok(settings) => {
                self.controller.set_settings(settings);
                if self.controller.gesture() != GestureState::Generating {
                    self.controller.request_render();
                }
            }
            Err(e) => {
                *notification = Some((format!("{e}"), std::time::Instant::now(), true));
            }
        }
    }

    fn save_png(&mut self, export_dir: &std::path::Path, notification: &mut Option<Notification>) {
        let file_name = format!("{}.png", self.controller.kind().label().to_lowercase());
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(file_name);
        if export_dir.is_dir() {
            dialog = dialog.set_directory(export_dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        let message = match self.controller.export(&path) {
            Ok(true) => {
                let short = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                (format!("Exported: {short}"), false)
            }
            Ok(false) => ("Nothing rendered yet".to_string(), true),
            Err(e) => {
                error!("Export failed: {e}");
                (format!("Export failed: {e}"), true)
            }
        };
        info!("{}", message.0);
        *notification = Some((message.0, std::time::Instant::now(), message.1));
    }
}
