use chrono::{DateTime, Utc};

pub fn phase_badge(phase: &str) -> &'static str {
    match phase {
        "Running" | "Succeeded" => "badge-success",
        "Pending" => "badge-warning",
        "Failed" => "badge-error",
        _ => "badge-info",
    }
}

pub fn health_badge(score: u8) -> &'static str {
    match score {
        90..=100 => "badge-success",
        60..=89 => "badge-warning",
        _ => "badge-error",
    }
}

pub fn join_ports(ports: &[i32]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }
    ports
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

pub fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
