use std::process::ExitCode;

use anyhow::Result;
use tracing::{error, info};

use reachcheck::config::ProbeConfig;
use reachcheck::engine::Prober;
use reachcheck::utils;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    utils::setup_console();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(true)
        .init();

    let prober = Prober::new(ProbeConfig::default())?;
    let report = prober.run().await?;

    if report.summary.all_accessible {
        info!("All sites reachable from this runner");
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            "{} site(s) unreachable from this runner",
            report.summary.failed
        );
        Ok(ExitCode::from(1))
    }
}
