use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodPhase {
    Running,
    Pending,
    Succeeded,
    Failed,
    Unknown,
    Other(String),
}

impl PodPhase {
    /// Buckets that appear in every phase tally, even at zero.
    pub const TRACKED: [PodPhase; 4] = [
        PodPhase::Running,
        PodPhase::Pending,
        PodPhase::Failed,
        PodPhase::Unknown,
    ];

    pub fn parse(phase: Option<&str>) -> Self {
        match phase {
            Some("Running") => PodPhase::Running,
            Some("Pending") => PodPhase::Pending,
            Some("Succeeded") => PodPhase::Succeeded,
            Some("Failed") => PodPhase::Failed,
            Some("Unknown") | None => PodPhase::Unknown,
            Some(other) => PodPhase::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PodPhase::Running => "Running",
            PodPhase::Pending => "Pending",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
            PodPhase::Other(s) => s,
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String-keyed counter. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<String, usize>);

impl Tally {
    pub fn with_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self(keys.into_iter().map(|k| (k.to_string(), 0)).collect())
    }

    pub fn bump(&mut self, key: &str) {
        *self.0.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Debug, Clone)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub phase: PodPhase,
    pub node: String,
    pub restarts: i32,
}

#[derive(Debug, Clone)]
pub struct ServiceSummary {
    pub name: String,
    pub namespace: String,
    pub service_type: String,
    pub cluster_ip: String,
    pub ports: Vec<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeReadiness {
    pub ready: usize,
    pub not_ready: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PodDigest {
    pub pods: Vec<PodSummary>,
    pub phase_counts: Tally,
    pub top_restarting: Vec<PodSummary>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceDigest {
    pub services: Vec<ServiceSummary>,
    pub type_counts: Tally,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardAggregate {
    pub total_pods: usize,
    pub total_services: usize,
    pub total_nodes: usize,
    pub phase_counts: Tally,
    pub service_type_counts: Tally,
    pub node_readiness: NodeReadiness,
    pub top_restarting: Vec<PodSummary>,
    pub health_score: u8,
    pub pods: Vec<PodSummary>,
    pub services: Vec<ServiceSummary>,
}

// --- JSON bodies ---

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub pods: PodMetrics,
    pub services: ServiceMetrics,
    pub nodes: NodeReadiness,
}

#[derive(Debug, Serialize)]
pub struct PodMetrics {
    pub total: usize,
    pub status: Tally,
}

#[derive(Debug, Serialize)]
pub struct ServiceMetrics {
    pub total: usize,
    pub types: Tally,
}

impl From<DashboardAggregate> for MetricsReport {
    fn from(agg: DashboardAggregate) -> Self {
        Self {
            pods: PodMetrics {
                total: agg.total_pods,
                status: agg.phase_counts,
            },
            services: ServiceMetrics {
                total: agg.total_services,
                types: agg.service_type_counts,
            },
            nodes: agg.node_readiness,
        }
    }
}

// --- Template rows ---

#[derive(Debug, Clone, Default)]
pub struct CountView {
    pub label: String,
    pub count: usize,
    pub badge_class: String,
}

#[derive(Debug, Clone, Default)]
pub struct PodView {
    pub name: String,
    pub namespace: String,
    pub node: String,
    pub status: String,
    pub status_class: String,
    pub restarts: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceView {
    pub name: String,
    pub namespace: String,
    pub service_type: String,
    pub cluster_ip: String,
    pub ports: String,
}
