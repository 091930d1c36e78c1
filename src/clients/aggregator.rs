use k8s_openapi::api::core::v1::{Node, Pod, Service};
use tracing::debug;

use crate::error::Result;
use crate::models::views::{
    DashboardAggregate, NodeReadiness, PodDigest, PodPhase, PodSummary, ServiceDigest,
    ServiceSummary, Tally,
};

use super::ClusterReader;

const TOP_RESTARTING: usize = 5;

pub fn summarize_pods(pods: &[Pod]) -> PodDigest {
    let mut phase_counts = Tally::with_keys(PodPhase::TRACKED.iter().map(PodPhase::as_str));
    let mut summaries = Vec::with_capacity(pods.len());

    for pod in pods {
        let status = pod.status.as_ref();
        let phase = PodPhase::parse(status.and_then(|s| s.phase.as_deref()));
        phase_counts.bump(phase.as_str());

        let restarts = status
            .and_then(|s| s.container_statuses.as_ref())
            .map(|cs| cs.iter().map(|c| c.restart_count).sum::<i32>())
            .unwrap_or(0);

        summaries.push(PodSummary {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            phase,
            node: pod
                .spec
                .as_ref()
                .and_then(|s| s.node_name.clone())
                .unwrap_or_default(),
            restarts,
        });
    }

    // sort_by is stable, so equal restart counts keep listing order
    let mut top_restarting = summaries.clone();
    top_restarting.sort_by(|a, b| b.restarts.cmp(&a.restarts));
    top_restarting.truncate(TOP_RESTARTING);

    PodDigest {
        pods: summaries,
        phase_counts,
        top_restarting,
    }
}

pub fn summarize_services(services: &[Service]) -> ServiceDigest {
    let mut type_counts = Tally::default();
    let mut summaries = Vec::with_capacity(services.len());

    for svc in services {
        let spec = svc.spec.as_ref();
        let service_type = spec
            .and_then(|s| s.type_.clone())
            .unwrap_or_else(|| "ClusterIP".to_string());
        type_counts.bump(&service_type);

        summaries.push(ServiceSummary {
            name: svc.metadata.name.clone().unwrap_or_default(),
            namespace: svc.metadata.namespace.clone().unwrap_or_default(),
            service_type,
            cluster_ip: spec.and_then(|s| s.cluster_ip.clone()).unwrap_or_default(),
            ports: spec
                .and_then(|s| s.ports.as_ref())
                .map(|ports| ports.iter().map(|p| p.port).collect())
                .unwrap_or_default(),
        });
    }

    ServiceDigest {
        services: summaries,
        type_counts,
    }
}

/// Nodes that report no `Ready` condition are counted in neither bucket.
pub fn summarize_node_readiness(nodes: &[Node]) -> NodeReadiness {
    let mut readiness = NodeReadiness::default();

    for node in nodes {
        let ready = node
            .status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .and_then(|conds| conds.iter().find(|c| c.type_ == "Ready"));

        match ready {
            Some(cond) if cond.status == "True" => readiness.ready += 1,
            Some(_) => readiness.not_ready += 1,
            None => {}
        }
    }

    readiness
}

/// Percentage of running pods, rounded down.
pub fn health_score(running: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (running.min(total) * 100 / total) as u8
}

impl DashboardAggregate {
    pub fn from_listings(pods: &[Pod], services: &[Service], nodes: &[Node]) -> Self {
        let pod_digest = summarize_pods(pods);
        let svc_digest = summarize_services(services);
        let node_readiness = summarize_node_readiness(nodes);

        let total_pods = pod_digest.pods.len();
        let running = pod_digest.phase_counts.get(PodPhase::Running.as_str());

        Self {
            total_pods,
            total_services: svc_digest.services.len(),
            total_nodes: node_readiness.ready + node_readiness.not_ready,
            health_score: health_score(running, total_pods),
            phase_counts: pod_digest.phase_counts,
            service_type_counts: svc_digest.type_counts,
            node_readiness,
            top_restarting: pod_digest.top_restarting,
            pods: pod_digest.pods,
            services: svc_digest.services,
        }
    }
}

/// Reads pods, services and nodes one after another and aggregates them.
pub async fn collect(reader: &dyn ClusterReader) -> Result<DashboardAggregate> {
    let pods = reader.list_pods().await?;
    let services = reader.list_services().await?;
    let nodes = reader.list_nodes().await?;

    debug!(
        pods = pods.len(),
        services = services.len(),
        nodes = nodes.len(),
        "cluster listings fetched"
    );

    Ok(DashboardAggregate::from_listings(&pods, &services, &nodes))
}
