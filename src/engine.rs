use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::{ProbeConfig, Target};
#[cfg(feature = "markers")]
use crate::config::TargetKind;
use crate::models::{ProbeResult, Report, SiteInfo, Summary, TestInfo};
use crate::utils::truncate;
#[cfg(feature = "markers")]
use crate::utils::truncate_marked;

const IP_SENTINEL: &str = "unknown";
const LOG_TRUNCATE: usize = 50;

/// Sequential connectivity prober. One HTTP GET per target, no retries; each
/// probe is independent and a failure never stops the run.
pub struct Prober {
    config: ProbeConfig,
    /// Verifying client, used only for the IP echo lookup.
    echo_client: reqwest::Client,
    /// Target client; certificate verification follows the config flag.
    target_client: reqwest::Client,
}

impl Prober {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let echo_client = reqwest::Client::builder()
            .timeout(config.ip_lookup_timeout)
            .build()
            .context("Failed to build IP lookup client")?;
        let target_client = reqwest::Client::builder()
            .timeout(config.target_timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("Failed to build target client")?;
        Ok(Self {
            config,
            echo_client,
            target_client,
        })
    }

    /// Best-effort public IP lookup. Any failure degrades to "unknown" and
    /// never affects the run's outcome.
    pub async fn probe_self_ip(&self) -> String {
        #[derive(Deserialize)]
        struct EchoBody {
            ip: String,
        }

        let response = match self.echo_client.get(&self.config.ip_echo_url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Could not determine runner IP: {}", e);
                return IP_SENTINEL.into();
            }
        };
        match response.json::<EchoBody>().await {
            Ok(body) => body.ip,
            Err(e) => {
                warn!("Could not parse IP echo response: {}", e);
                IP_SENTINEL.into()
            }
        }
    }

    pub async fn probe_target(&self, target: &Target) -> ProbeResult {
        info!("Probing: {}", target.name);
        info!("   URL: {}", target.url);

        let start = Instant::now();
        let response = match self.target_client.get(&target.url).send().await {
            Ok(r) => r,
            Err(e) => return self.record_failure(target, &e),
        };
        let status_code = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return self.record_failure(target, &e),
        };
        let elapsed = start.elapsed().as_secs_f64();

        info!(
            "   Request OK: status {}, {:.2}s, {} bytes",
            status_code,
            elapsed,
            body.len()
        );
        #[cfg(feature = "markers")]
        self.inspect_body(target, &body);

        ProbeResult::success(target, status_code, elapsed, body.len() as u64)
    }

    fn record_failure(&self, target: &Target, err: &reqwest::Error) -> ProbeResult {
        let message = classify(err);
        error!("   Request failed: {}", truncate(&message, LOG_TRUNCATE));
        ProbeResult::failure(target, message)
    }

    #[cfg(feature = "markers")]
    fn inspect_body(&self, target: &Target, body: &[u8]) {
        let html = String::from_utf8_lossy(body);
        match target.kind {
            TargetKind::Icons => {
                let links = crate::markers::icon_links(&html);
                info!("   Icon links found: {}", links.len());
                if let Some(first) = links.first() {
                    info!("   Sample icon: {}", truncate_marked(first, LOG_TRUNCATE));
                }
            }
            TargetKind::Channels => {
                info!(
                    "   Channel data rows found: {}",
                    crate::markers::channel_rows(&html)
                );
            }
        }
    }

    /// Runs the full check: IP lookup, every target in order, summary, report
    /// file. Only a report-write failure is fatal.
    pub async fn run(&self) -> Result<Report> {
        info!("Reachability check starting");

        let runner_ip = self.probe_self_ip().await;
        info!("Runner public IP: {}", runner_ip);
        info!("Probe time: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));

        let mut results = Vec::with_capacity(self.config.targets.len());
        for target in &self.config.targets {
            results.push(self.probe_target(target).await);
            tokio::time::sleep(self.config.pacing).await;
        }

        let summary = Summary::from_results(&results);
        info!(
            "Probed {} sites: {} reachable, {} failed",
            summary.total_tested, summary.successful, summary.failed
        );
        for result in &results {
            if result.accessible {
                info!(
                    "   OK  {}: status {}, {:.2}s",
                    result.site,
                    result.status_code.unwrap_or(0),
                    result.response_time_seconds.unwrap_or(0.0)
                );
            } else {
                error!(
                    "   ERR {}: {}",
                    result.site,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        let report = Report {
            test_info: TestInfo {
                timestamp: Utc::now(),
                runner_ip,
                runtime_version: env!("CARGO_PKG_VERSION").into(),
            },
            test_sites: self.config.targets.iter().map(SiteInfo::from).collect(),
            results,
            summary,
        };
        self.write_report(&report)?;
        Ok(report)
    }

    fn write_report(&self, report: &Report) -> Result<()> {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(&self.config.report_path, json).with_context(|| {
            format!(
                "Failed to write report to {}",
                self.config.report_path.display()
            )
        })?;
        info!("Report written to {}", self.config.report_path.display());
        Ok(())
    }
}

fn classify(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".into()
    } else if err.is_connect() {
        "connection error".into()
    } else {
        err.to_string()
    }
}
