//! Session statistics output.

use clap::ValueEnum;
use stackkv_core::StatsSnapshot;

/// Output format for the exit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable table.
    Text,
    /// Pretty-printed JSON object.
    Json,
}

/// Renders a statistics snapshot.
pub fn render_stats(
    stats: &StatsSnapshot,
    format: StatsFormat,
) -> Result<String, serde_json::Error> {
    match format {
        StatsFormat::Json => serde_json::to_string_pretty(stats),
        StatsFormat::Text => Ok(stats.to_string()),
    }
}
