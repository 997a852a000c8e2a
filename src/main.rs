mod api;
mod app;
mod application;
mod domain;
mod ui;

use iced::window;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> iced::Result {
    init_logging();

    let icon_data = include_bytes!("../assets/icon.png");

    let icon = match image::load_from_memory(icon_data) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            window::icon::from_rgba(rgba.into_raw(), width, height).ok()
        }
        Err(_) => None,
    };

    iced::application(app::ShareApp::default, app::update, app::view)
        .title("Simple File Share")
        .subscription(app::subscription)
        .window(window::Settings {
            icon,
            size: iced::Size::new(480.0, 640.0),
            ..Default::default()
        })
        .run()
}

/// Initialize logging with tracing.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("simple_file_share=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
