mod bootstrap;

use anyhow::Result;
use trip_core::formatting::{format_count, render_slot_table, render_zone_table};
use trip_core::settings::Settings;
use trip_data::analysis::{analyze_trips, AnalysisReport};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Trip Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    // The analyzer stays silent about unreadable input, so say it here.
    if let Err(e) = settings.validate() {
        tracing::warn!("{}", e);
    }

    let report = analyze_trips(&settings.csv_path, settings.top_zones, settings.top_slots);

    if settings.json_output() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

/// Plain-text rendering of both rankings plus a one-line summary.
fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("Top pickup zones\n");
    out.push_str(&render_zone_table(&report.top_zones));
    out.push('\n');
    out.push_str("Busiest zone/hour slots\n");
    out.push_str(&render_slot_table(&report.top_busy_slots));

    if let Some(ingest) = &report.metadata.ingest {
        out.push('\n');
        out.push_str(&format!(
            "{} records counted, {} skipped, {} zones ({:.3}s)\n",
            format_count(ingest.records_accepted),
            format_count(ingest.records_skipped),
            format_count(ingest.distinct_zones as u64),
            report.metadata.ingest_time_seconds,
        ));
    }

    out
}
