use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (CI-Reachability-Probe)";
pub const DEFAULT_REPORT_PATH: &str = "access_report.json";
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org?format=json";

/// What to look for in a target's HTML, beyond plain reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Icons,
    Channels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub url: String,
    pub description: String,
    pub kind: TargetKind,
}

/// One run's full configuration. The defaults are the compiled-in contract;
/// the struct exists so tests can point the prober at a local server.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub targets: Vec<Target>,
    pub ip_echo_url: String,
    pub ip_lookup_timeout: Duration,
    pub target_timeout: Duration,
    /// Blocking pause after each target probe.
    pub pacing: Duration,
    pub user_agent: String,
    /// Skips TLS certificate verification for target fetches. Deliberate for
    /// this diagnostic: the EPG hosts serve certificates that do not validate.
    pub accept_invalid_certs: bool,
    pub report_path: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                Target {
                    name: "icon source".into(),
                    url: "https://epg.51zmt.top:8001".into(),
                    description: "IPTV icon source index".into(),
                    kind: TargetKind::Icons,
                },
                Target {
                    name: "channel listing".into(),
                    url: "https://epg.51zmt.top:8001/sctvmulticast.html".into(),
                    description: "Chengdu Telecom IPTV multicast channel listing".into(),
                    kind: TargetKind::Channels,
                },
            ],
            ip_echo_url: DEFAULT_IP_ECHO_URL.into(),
            ip_lookup_timeout: Duration::from_secs(10),
            target_timeout: Duration::from_secs(30),
            pacing: Duration::from_secs(1),
            user_agent: DEFAULT_USER_AGENT.into(),
            accept_invalid_certs: true,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}
