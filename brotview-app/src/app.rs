use std::sync::Arc;

use eframe::egui;
use tracing::info;

use brotview_app::{AppPreferences, RepaintHook, ViewOptions, ViewportController};

use crate::view::{Notification, ViewPanel};

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct BrotviewApp {
    preferences: AppPreferences,
    mandelbrot: ViewPanel,
    /// Julia views spawned from the Mandelbrot view, with their open flags.
    julias: Vec<(u64, ViewPanel, bool)>,
    next_julia_id: u64,
    notification: Option<Notification>,
}

impl BrotviewApp {
    pub(crate) fn new(
        egui_ctx: &egui::Context,
        prefs: AppPreferences,
    ) -> brotview_render::Result<Self> {
        let ctx = egui_ctx.clone();
        let repaint: RepaintHook = Arc::new(move || ctx.request_repaint());
        let options = ViewOptions {
            settings: prefs.view_settings,
            pan_redraw: prefs.pan_redraw,
            repaint: Some(repaint),
        };
        let controller =
            ViewportController::mandelbrot(prefs.canvas_width, prefs.canvas_height, options)?;

        Ok(Self {
            preferences: prefs,
            mandelbrot: ViewPanel::new("Mandelbrot".to_string(), controller),
            julias: Vec::new(),
            next_julia_id: 0,
            notification: None,
        })
    }

    fn open_julia(&mut self, julia: Box<ViewportController>) {
        self.next_julia_id += 1;
        let title = match julia.kind().julia_c() {
            Some(c) => format!("Julia #{} ({c})", self.next_julia_id),
            None => format!("Julia #{}", self.next_julia_id),
        };
        self.julias
            .push((self.next_julia_id, ViewPanel::new(title, *julia), true));
    }

    fn draw_julia_windows(&mut self, ctx: &egui::Context) {
        let export_dir = self.preferences.export_directory();
        for (id, panel, open) in &mut self.julias {
            let title = panel.title.clone();
            egui::Window::new(title)
                .id(egui::Id::new(("julia_view", *id)))
                .open(open)
                .resizable(false)
                .show(ctx, |ui| {
                    // Julia views cannot spawn further views.
                    let _ = panel.canvas(ui);
                    ui.add_space(4.0);
                    panel.controls(ui, &export_dir, &mut self.notification);
                });
        }
        self.julias.retain(|(_, _, open)| *open);
    }

    fn draw_notification(&mut self, ctx: &egui::Context) {
        let Some((ref msg, at, is_error)) = self.notification else {
            return;
        };
        let elapsed = at.elapsed().as_secs_f32();
        if elapsed > 5.0 {
            self.notification = None;
            return;
        }
        let alpha = ((5.0 - elapsed) / 1.0).clamp(0.0, 1.0);
        let color = if is_error {
            egui::Color32::from_rgba_unmultiplied(255, 100, 100, (alpha * 255.0) as u8)
        } else {
            egui::Color32::from_rgba_unmultiplied(100, 255, 140, (alpha * 255.0) as u8)
        };
        egui::Area::new(egui::Id::new("notification"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -20.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_black_alpha((alpha * 200.0) as u8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg.clone()).color(color));
                    });
            });
        ctx.request_repaint();
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for BrotviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.mandelbrot.poll(ctx);
        for (_, panel, _) in &mut self.julias {
            panel.poll(ctx);
        }

        let export_dir = self.preferences.export_directory();
        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Mandelbrot");
                ui.add_space(4.0);
                self.mandelbrot
                    .controls(ui, &export_dir, &mut self.notification);
                ui.separator();
                ui.weak("Double-click: zoom in (right button: out)");
                ui.weak("Drag: pan");
                ui.weak("Click: show coordinates");
                ui.weak("Triple-click: open Julia set");
            });

        let mut spawned = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            spawned = self.mandelbrot.canvas(ui);
        });
        if let Some(julia) = spawned {
            self.open_julia(julia);
        }

        self.draw_julia_windows(ctx);
        self.draw_notification(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.view_settings = self.mandelbrot.controller.settings();
        self.preferences.pan_redraw = self.mandelbrot.controller.pan_redraw();
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Brotview");

    let prefs = AppPreferences::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Brotview")
            .with_inner_size([prefs.window_width, prefs.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Brotview",
        options,
        Box::new(move |cc| Ok(Box::new(BrotviewApp::new(&cc.egui_ctx, prefs)?))),
    )
}
