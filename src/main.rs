use anyhow::{Context, Result};
use chrono::Utc;
use movie_calendar::{
    config::{self, Command, Config},
    pipeline,
};
use std::{env, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // ─── 2) settings ─────────────────────────────────────────────────
    let output = match config::parse_args(env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", config::USAGE);
            return Ok(());
        }
        Command::Run { output } => output,
    };
    let mut cfg = Config::load().context("loading configuration")?;
    if let Some(out) = output {
        cfg.output = out;
    }
    info!(url = %cfg.url, output = %cfg.output.display(), "startup");

    // ─── 3) fetch → parse → write ────────────────────────────────────
    let summary = pipeline::run(&cfg, Utc::now())
        .await
        .with_context(|| format!("scraping {}", cfg.url))?;

    println!(
        "Successfully saved {} movies to {}",
        summary.written,
        cfg.output.display()
    );
    Ok(())
}
