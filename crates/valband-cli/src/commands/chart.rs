use serde::Serialize;

use valband_core::{analyze, ChartPayload, ChartStyle, EnvelopeError, LatestSnapshot};

use crate::cli::ChartArgs;
use crate::error::CliError;

use super::{analysis_config, input_name, read_history, read_json, series_warnings, CommandResult};

#[derive(Debug, Serialize)]
struct ChartResponseData {
    chart: ChartPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<LatestSnapshot>,
}

pub fn run(args: &ChartArgs) -> Result<CommandResult, CliError> {
    let config = analysis_config(&args.peak, args.multiples.as_deref())?;
    let series = read_history(&args.history)?;
    let mut inputs = vec![input_name(&args.history)];

    let mut errors = Vec::new();

    // An invalid snapshot still yields the chart; the problem is reported in the envelope.
    let latest = match &args.latest {
        Some(path) => {
            let latest: LatestSnapshot = read_json(path)?;
            inputs.push(input_name(path));
            match latest.validate() {
                Ok(()) => Some(latest),
                Err(error) => {
                    errors.push(EnvelopeError::new("invalid_snapshot", error.to_string())?);
                    None
                }
            }
        }
        None => None,
    };

    let analysis = analyze(&series, &config, &ChartStyle::default())?;
    let warnings = series_warnings(&series, &analysis.model);

    let data = serde_json::to_value(ChartResponseData {
        chart: analysis.payload,
        latest,
    })?;

    Ok(CommandResult::ok(data, inputs)
        .with_warnings(warnings)
        .with_errors(errors))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::cli::PeakArgs;

    use super::*;

    const HISTORY: &str = r#"[
        {"date": "1999-06-30", "buffett_ratio": 1.3},
        {"date": "2000-03-24", "buffett_ratio": 1.9},
        {"date": "2001-06-29", "buffett_ratio": 1.2},
        {"date": "2002-09-30", "buffett_ratio": 0.8}
    ]"#;

    fn args(dir: &std::path::Path, latest: &str) -> ChartArgs {
        let history = dir.join("history.json");
        let latest_path = dir.join("latest.json");
        fs::write(&history, HISTORY).expect("write history");
        fs::write(&latest_path, latest).expect("write latest");
        ChartArgs {
            history,
            latest: Some(latest_path),
            multiples: None,
            peak: PeakArgs::default(),
        }
    }

    #[test]
    fn invalid_snapshot_is_reported_alongside_the_chart() {
        let dir = tempfile::tempdir().expect("temp dir");
        let latest = r#"{"generated_at": "2024-05-01T12:00:00Z", "w5000_close": -1.0,
            "market_cap_billion": 52000.0, "gdp_billion_saar": 28000.0, "buffett_ratio": 1.86}"#;

        let result = run(&args(dir.path(), latest)).expect("chart still builds");

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "invalid_snapshot");
        assert!(result.errors[0].message.contains("w5000_close"));
        assert!(result.data.get("chart").is_some());
        assert!(result.data.get("latest").is_none());
        assert_eq!(result.inputs.len(), 2);
    }

    #[test]
    fn valid_snapshot_is_returned_with_the_chart() {
        let dir = tempfile::tempdir().expect("temp dir");
        let latest = r#"{"generated_at": "2024-05-01T12:00:00Z", "w5000_close": 49500.0,
            "market_cap_billion": 52000.0, "gdp_billion_saar": 28000.0, "buffett_ratio": 1.86}"#;

        let result = run(&args(dir.path(), latest)).expect("chart builds");

        assert!(result.errors.is_empty());
        assert_eq!(result.data["latest"]["buffett_ratio"], 1.86);
        assert_eq!(result.data["chart"]["labels"][0], "1999-06-30");
    }
}
