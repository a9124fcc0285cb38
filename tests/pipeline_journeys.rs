//! Behavior tests for the refresh journey: assemble the ratio, persist it, reload it, chart it.

use std::fs;

use tempfile::tempdir;
use valband_core::{
    AggregateObservation, HistoryRecord, IndexClose, LatestSnapshot, UtcDateTime,
};
use valband_tests::*;

fn closes() -> Vec<IndexClose> {
    [
        ("1999-07-01", 12000.0),
        ("2000-03-24", 14750.0),
        ("2001-07-02", 11000.0),
        ("2002-10-09", 7500.0),
        ("2004-01-02", 11200.0),
    ]
    .into_iter()
    .map(|(date, close)| IndexClose {
        date: date.to_owned(),
        close,
    })
    .collect()
}

fn gdp() -> Vec<AggregateObservation> {
    [
        ("1999-04-01", 9300.0),
        ("2000-01-01", 9900.0),
        ("2001-04-01", 10300.0),
        ("2002-07-01", 10800.0),
        ("2003-10-01", 11500.0),
    ]
    .into_iter()
    .map(|(date, value)| AggregateObservation {
        date: date.to_owned(),
        value,
    })
    .collect()
}

#[test]
fn user_can_refresh_history_and_chart_it_from_disk() {
    // Given: index closes and quarterly aggregate observations
    let assembly = ratio::assemble(&closes(), &gdp(), 1.05).expect("join succeeds");
    let dir = tempdir().expect("temp dir");

    // When: the history and latest snapshot are written and read back
    let history_path = dir.path().join("history.json");
    let latest_path = dir.path().join("latest.json");
    let generated_at = UtcDateTime::parse("2004-01-03T00:00:00Z").expect("timestamp");
    let latest = assembly
        .latest(generated_at, Some(String::from("^W5000")))
        .expect("latest row");
    fs::write(
        &history_path,
        serde_json::to_string(&assembly.history()).expect("serialize history"),
    )
    .expect("write history");
    fs::write(
        &latest_path,
        serde_json::to_string(&latest).expect("serialize latest"),
    )
    .expect("write latest");

    let records: Vec<HistoryRecord> =
        serde_json::from_str(&fs::read_to_string(&history_path).expect("read history"))
            .expect("parse history");
    let reloaded: LatestSnapshot =
        serde_json::from_str(&fs::read_to_string(&latest_path).expect("read latest"))
            .expect("parse latest");

    // Then: the reloaded records chart with the year-2000 peak on the +2σ band
    assert_eq!(records.len(), 5);
    assert_eq!(reloaded, latest);
    reloaded.validate().expect("snapshot is valid");

    let series = Series::from_history(&records);
    let analysis = analyze(&series, &AnalysisConfig::default(), &ChartStyle::default())
        .expect("default config is valid");
    let peak = analysis.payload.peak.as_ref().expect("peak located");
    assert_eq!(peak.date, "2000-03-24");
    assert!(peak.applied);

    let upper = analysis.payload.curve("band+2").expect("+2σ curve");
    assert!(approx_eq(upper.values[peak.index], series.values()[peak.index], 0.01));
}

#[test]
fn latest_snapshot_reports_ratio_as_percent() {
    let assembly = ratio::assemble(&closes(), &gdp(), 1.05).expect("join succeeds");
    let generated_at = UtcDateTime::parse("2004-01-03T00:00:00Z").expect("timestamp");

    let latest = assembly.latest(generated_at, None).expect("latest row");

    // 11200 * 1.05 / 11500
    assert_eq!(latest.buffett_ratio, 1.0226);
    assert!(approx_eq(latest.ratio_percent(), 102.26, 1e-9));
}

#[test]
fn chart_payload_serializes_with_curve_ids() {
    let analysis = analyze(&bubble_series(), &AnalysisConfig::default(), &ChartStyle::default())
        .expect("default config is valid");

    let json = serde_json::to_value(&analysis.payload).expect("serialize payload");

    let ids: Vec<&str> = json["curves"]
        .as_array()
        .expect("curves array")
        .iter()
        .filter_map(|curve| curve["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["ratio", "trend", "band-2", "band-1", "band+1", "band+2"]);
    assert_eq!(json["labels"].as_array().map(Vec::len), Some(10));
}
