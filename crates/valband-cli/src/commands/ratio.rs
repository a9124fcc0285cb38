use std::path::Path;

use serde::Serialize;

use valband_core::{
    ratio, AggregateObservation, AnalysisConfig, HistoryRecord, IndexClose, LatestSnapshot,
    UtcDateTime,
};

use crate::cli::RatioArgs;
use crate::error::CliError;

use super::{input_name, read_json, CommandResult};

#[derive(Debug, Serialize)]
struct RatioResponseData {
    billions_per_point: f64,
    rows: usize,
    dropped: usize,
    history: Vec<HistoryRecord>,
    latest: Option<LatestSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    written: Vec<String>,
}

pub fn run(args: &RatioArgs) -> Result<CommandResult, CliError> {
    let billions_per_point = match args.billions_per_point {
        Some(value) => value,
        None => AnalysisConfig::from_env()?.billions_per_point,
    };

    let closes: Vec<IndexClose> = read_json(&args.closes)?;
    let observations: Vec<AggregateObservation> = read_json(&args.aggregate)?;

    let assembly = ratio::assemble(&closes, &observations, billions_per_point)?;
    let history = assembly.history();
    let latest = assembly.latest(UtcDateTime::now(), args.source_ticker.clone());

    let mut written = Vec::new();
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir).map_err(|source| CliError::Write {
            path: input_name(dir),
            source,
        })?;
        written.push(write_json(&dir.join("history.json"), &history)?);
        if let Some(latest) = &latest {
            written.push(write_json(&dir.join("latest.json"), latest)?);
        }
    }

    let dropped = assembly.dropped;
    let data = serde_json::to_value(RatioResponseData {
        billions_per_point,
        rows: assembly.rows.len(),
        dropped,
        history,
        latest,
        written,
    })?;

    let inputs = vec![input_name(&args.closes), input_name(&args.aggregate)];
    let result = CommandResult::ok(data, inputs);
    if dropped > 0 {
        return Ok(result.with_warning(format!(
            "{dropped} closes dropped: no aggregate observation yet or non-positive close"
        )));
    }
    Ok(result)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<String, CliError> {
    let name = input_name(path);
    let payload = serde_json::to_string_pretty(value)?;
    std::fs::write(path, payload).map_err(|source| CliError::Write {
        path: name.clone(),
        source,
    })?;
    tracing::info!(path = %name, "wrote output file");
    Ok(name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn out_dir_receives_history_and_latest() {
        let dir = tempfile::tempdir().expect("temp dir");
        let closes = dir.path().join("closes.json");
        let aggregate = dir.path().join("aggregate.json");
        fs::write(
            &closes,
            r#"[{"date": "2023-12-29", "close": 39000.0},
                {"date": "2024-01-02", "close": 40000.0},
                {"date": "2024-04-02", "close": 42000.0}]"#,
        )
        .expect("write closes");
        fs::write(
            &aggregate,
            r#"[{"date": "2024-01-01", "value": 28000.0},
                {"date": "2024-04-01", "value": 28500.0}]"#,
        )
        .expect("write aggregate");
        let out_dir = dir.path().join("data");

        let result = run(&RatioArgs {
            closes,
            aggregate,
            billions_per_point: Some(1.0),
            source_ticker: Some(String::from("^FTW5000")),
            out_dir: Some(out_dir.clone()),
        })
        .expect("ratio succeeds");

        assert_eq!(result.data["rows"], 2);
        assert_eq!(result.data["dropped"], 1);
        assert_eq!(result.data["written"].as_array().map(Vec::len), Some(2));
        assert!(result.warnings[0].contains("1 closes dropped"));

        let history: Vec<HistoryRecord> =
            read_json(&out_dir.join("history.json")).expect("history written");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, "2024-01-02");
        assert_eq!(history[0].buffett_ratio, 1.4286);

        let latest: LatestSnapshot =
            read_json(&out_dir.join("latest.json")).expect("latest written");
        assert_eq!(latest.buffett_ratio, 1.4737);
        assert_eq!(latest.source_ticker.as_deref(), Some("^FTW5000"));
        latest.validate().expect("valid snapshot");
    }

    #[test]
    fn nothing_is_written_without_out_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let closes = dir.path().join("closes.json");
        let aggregate = dir.path().join("aggregate.json");
        fs::write(&closes, r#"[{"date": "2024-01-02", "close": 40000.0}]"#).expect("write");
        fs::write(&aggregate, r#"[{"date": "2024-01-01", "value": 28000.0}]"#).expect("write");

        let result = run(&RatioArgs {
            closes,
            aggregate,
            billions_per_point: Some(1.0),
            source_ticker: None,
            out_dir: None,
        })
        .expect("ratio succeeds");

        assert!(result.data.get("written").is_none());
        assert!(result.warnings.is_empty());
        assert!(!dir.path().join("history.json").exists());
    }
}
