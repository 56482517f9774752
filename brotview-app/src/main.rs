mod app;
mod view;

fn main() -> eframe::Result {
    app::run()
}
