// Desktop entry point for the supermarket front-end
#![allow(non_snake_case)] // Common for Dioxus components

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;
use services::Services;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::load_default()?;
    tracing::info!("Loaded default configuration version {}", app_config.version);

    let (services, inbox) = Services::build(&app_config)?;
    tracing::info!(api = %services.http.base_url(), "Backend client ready");

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(1280.0, 720.0)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .with_context(services)
        .with_context(inbox)
        .launch(App);

    tracing::info!("Window closed");
    Ok(())
}
