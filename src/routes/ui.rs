use askama::Template;
use axum::{extract::State, response::Html};
use chrono::{DateTime, Utc};

use crate::AppState;
use crate::clients::aggregator;
use crate::error::Result;
use crate::helpers::{health_badge, join_ports, or_dash, phase_badge, timestamp};
use crate::models::views::*;

// --- View Builders ---

fn build_pod_view(pod: &PodSummary) -> PodView {
    PodView {
        name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        node: or_dash(&pod.node),
        status: pod.phase.to_string(),
        status_class: phase_badge(pod.phase.as_str()).to_string(),
        restarts: pod.restarts,
    }
}

fn build_service_view(svc: &ServiceSummary) -> ServiceView {
    ServiceView {
        name: svc.name.clone(),
        namespace: svc.namespace.clone(),
        service_type: svc.service_type.clone(),
        cluster_ip: or_dash(&svc.cluster_ip),
        ports: join_ports(&svc.ports),
    }
}

fn build_count_views(tally: &Tally, badge: fn(&str) -> &'static str) -> Vec<CountView> {
    tally
        .iter()
        .map(|(label, count)| CountView {
            label: label.to_string(),
            count,
            badge_class: badge(label).to_string(),
        })
        .collect()
}

// --- Dashboard ---

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: String,
    generated_at: String,
    total_pods: usize,
    total_services: usize,
    total_nodes: usize,
    ready_nodes: usize,
    not_ready_nodes: usize,
    health_score: u8,
    health_class: String,
    phase_counts: Vec<CountView>,
    service_types: Vec<CountView>,
    top_restarting: Vec<PodView>,
    pods: Vec<PodView>,
    services: Vec<ServiceView>,
}

impl DashboardTemplate {
    fn new(cluster_name: &str, agg: &DashboardAggregate, now: DateTime<Utc>) -> Self {
        Self {
            title: format!("{} cluster dashboard", cluster_name),
            generated_at: timestamp(now),
            total_pods: agg.total_pods,
            total_services: agg.total_services,
            total_nodes: agg.total_nodes,
            ready_nodes: agg.node_readiness.ready,
            not_ready_nodes: agg.node_readiness.not_ready,
            health_score: agg.health_score,
            health_class: health_badge(agg.health_score).to_string(),
            phase_counts: build_count_views(&agg.phase_counts, phase_badge),
            service_types: build_count_views(&agg.service_type_counts, |_| "badge-info"),
            top_restarting: agg.top_restarting.iter().map(build_pod_view).collect(),
            pods: agg.pods.iter().map(build_pod_view).collect(),
            services: agg.services.iter().map(build_service_view).collect(),
        }
    }
}

fn render_template(tmpl: &impl Template) -> Result<Html<String>> {
    Ok(Html(tmpl.render()?))
}

pub async fn handle_dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let agg = aggregator::collect(state.reader.as_ref()).await?;
    let tmpl = DashboardTemplate::new(&state.config.cluster_name, &agg, Utc::now());
    render_template(&tmpl)
}
