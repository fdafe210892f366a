use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;
use ticket_desk_proto::{Snapshot, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct SnapshotView<'a> {
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

fn fmt_ticket(out: &mut String, t: &Ticket) {
    let _ = writeln!(
        out,
        "  {:<7} {:<20} pri {}  {:<6} {:<8} {}",
        t.id().to_string(),
        t.name(),
        t.priority(),
        t.kind(),
        t.status(),
        t.created_at().format("%Y-%m-%d %H:%M:%S"),
    );
}

fn fmt_lane(out: &mut String, title: &str, tickets: &[Ticket]) {
    let _ = writeln!(out, "{title}");
    if tickets.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for t in tickets {
        fmt_ticket(out, t);
    }
}

pub fn render_snapshot(
    snapshot: &Snapshot,
    branch: &str,
    vip_capacity: usize,
    notice: Option<&str>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return serde_json::to_string(&SnapshotView { branch, notice, snapshot });
    }

    let mut out = String::new();
    if let Some(notice) = notice {
        let _ = writeln!(out, "{notice}");
    }
    let _ = writeln!(out, "[{branch}]");
    let vip = format!("VIP lane ({}/{vip_capacity}), front first:", snapshot.vip.len());
    fmt_lane(&mut out, &vip, &snapshot.vip);
    let standard = format!("Standard queue ({}), front first:", snapshot.standard.len());
    fmt_lane(&mut out, &standard, &snapshot.standard);
    let resolved = format!("Resolved history ({}), bottom to top:", snapshot.resolved.len());
    fmt_lane(&mut out, &resolved, &snapshot.resolved);
    Ok(out.trim_end().to_string())
}

pub fn render_branches(
    current: &str,
    names: &[String],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        let view = serde_json::json!({ "current": current, "branches": names });
        return serde_json::to_string(&view);
    }
    Ok(names
        .iter()
        .map(|n| if n == current { format!("* {n}") } else { format!("  {n}") })
        .collect::<Vec<_>>()
        .join("\n"))
}
