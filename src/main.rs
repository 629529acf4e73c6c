// Main entry point - Dependency injection and chart preparation
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::application::sample_repository::SampleRepository;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::fixture_repository::FixtureRepository;
use crate::presentation::chart_view::render_json;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the chart JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app_config = load_app_config().context("Failed to load config/app")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FixtureRepository::from_path(&app_config.fixture.path)?);
    tracing::debug!("Available channels: {:?}", repository.list_channels());

    // Create service (application layer)
    let chart_service = ChartService::new(repository, app_config.pipeline.clone());

    tracing::info!(
        "Preparing {} charts ({:?} parsing, tick stride {})",
        app_config.screens.len(),
        app_config.pipeline.parse_mode,
        app_config.pipeline.tick_stride
    );
    let charts = chart_service.build_charts(&app_config.screens);
    if charts.len() < app_config.screens.len() {
        tracing::warn!(
            "{} of {} charts could not be built",
            app_config.screens.len() - charts.len(),
            app_config.screens.len()
        );
    }

    println!("{}", render_json(charts)?);
    Ok(())
}
