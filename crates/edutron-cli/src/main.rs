//! Edutron CLI Application
//!
//! Terminal front end for the training plan builder.

mod args;
mod catalog;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use edutron_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        catalog: catalog_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .context("Failed to initialize planner")?;

    let courses = catalog_file
        .as_deref()
        .map(catalog::load_catalog)
        .transpose()?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Edutron started");

    Cli::new(planner, renderer, courses).run(command)
}
