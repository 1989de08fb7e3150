//! Rendering of calculation results.

use serde::Serialize;
use tubetally_core::{DurationStyle, ItemDetail, PlaylistResult, SpeedProjection};

/// JSON document printed in `--json` mode.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a PlaylistResult,
    playlist_url: String,
    total_duration: String,
    average_duration_seconds: u64,
    speed_projections: Vec<SpeedProjection>,
}

/// Render `result` as pretty-printed JSON.
pub fn render_json(result: &PlaylistResult, style: DurationStyle) -> serde_json::Result<String> {
    let summary = result.summary();
    let report = JsonReport {
        result,
        playlist_url: result.playlist_url(),
        total_duration: result.total_duration().format(style),
        average_duration_seconds: summary.average.as_secs(),
        speed_projections: summary.speed_projections(),
    };
    serde_json::to_string_pretty(&report)
}

/// Render `result` as a human-readable report.
pub fn render_text(result: &PlaylistResult, style: DurationStyle) -> String {
    let summary = result.summary();
    let mut lines = vec![
        format!("Playlist:   {}", result.title),
        format!("Channel:    {}", result.channel_name),
    ];

    lines.push(match result.range {
        Some(range) => format!(
            "Videos:     {} (#{} to #{} of {})",
            summary.item_count,
            range.from(),
            range.to(),
            result.total_item_count
        ),
        None => format!("Videos:     {}", summary.item_count),
    });

    lines.push(format!(
        "Total:      {}",
        result.total_duration().format(style)
    ));
    lines.push(format!("Average:    {}", summary.average.format(style)));

    lines.push(String::new());
    for projection in summary.speed_projections() {
        let label = format!("{}x:", projection.speed);
        lines.push(format!(
            "At {label:<6} {}",
            projection.duration.format(style)
        ));
    }

    if let Some(first) = &summary.first {
        lines.push(String::new());
        lines.push(item_line("First:", first, style));
    }
    if let Some(last) = &summary.last {
        lines.push(item_line("Last:", last, style));
    }

    lines.join("\n")
}

fn item_line(label: &str, item: &ItemDetail, style: DurationStyle) -> String {
    format!(
        "{label:<11} #{} {} [{}]\n            {}",
        item.position,
        item.title,
        item.duration().format(style),
        item.watch_url()
    )
}
