mod bands;
mod chart;
mod ratio;
mod render;
mod snapshot;
mod trend;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;
use valband_core::{
    AnalysisConfig, Envelope, EnvelopeError, EnvelopeMeta, HistoryRecord, PeakSource, PeakWindow,
    Series, TrendModel, SCHEMA_VERSION,
};

use crate::cli::{Cli, Command, PeakArgs};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub inputs: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value, inputs: Vec<String>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            inputs,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Trend(args) => trend::run(args)?,
        Command::Bands(args) => bands::run(args)?,
        Command::Chart(args) => chart::run(args)?,
        Command::Snapshot(args) => snapshot::run(args)?,
        Command::Ratio(args) => ratio::run(args)?,
        Command::Render(args) => render::run(args)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        inputs,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, inputs)?;
    for warning in warnings {
        tracing::warn!(%warning, "command warning");
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

pub(crate) fn read_history(path: &Path) -> Result<Series, CliError> {
    let records: Vec<HistoryRecord> = read_json(path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "history loaded");
    Ok(Series::from_history(&records))
}

/// Environment configuration with command-line overrides applied on top.
pub(crate) fn analysis_config(
    peak: &PeakArgs,
    multiples: Option<&[f64]>,
) -> Result<AnalysisConfig, CliError> {
    let mut config = AnalysisConfig::from_env()?;

    if peak.peak_start.is_some() || peak.peak_end.is_some() {
        let start = match &peak.peak_start {
            Some(raw) => valband_core::parse_calendar_date(raw)?,
            None => config.peak_window.start(),
        };
        let end = match &peak.peak_end {
            Some(raw) => valband_core::parse_calendar_date(raw)?,
            None => config.peak_window.end(),
        };
        config.peak_window = PeakWindow::new(start, end)?;
    }

    if let Some(multiples) = multiples {
        config.multiples = multiples.to_vec();
    }

    config.validate()?;
    Ok(config)
}

/// Warnings for degenerate histories. Estimation still succeeds on these inputs.
pub(crate) fn series_warnings(series: &Series, model: &TrendModel) -> Vec<String> {
    let mut warnings = Vec::new();

    match series.len() {
        0 => warnings.push(String::from("history is empty; all curves are empty")),
        1 => warnings.push(String::from(
            "history has a single point; dispersion is zero and bands collapse onto the trend",
        )),
        _ => {}
    }

    if let Some(peak) = &model.peak {
        if peak.source == PeakSource::GlobalMaximum {
            warnings.push(format!(
                "no points inside the peak window; calibrated on global maximum at {}",
                peak.date
            ));
        }
        if !peak.applied {
            warnings.push(String::from(
                "peak sits on or below the trend; residual dispersion kept",
            ));
        }
    }

    warnings
}

pub(crate) fn input_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use valband_core::{SeriesPoint, TrendEstimator};

    use super::*;

    #[test]
    fn reads_history_as_percent_series() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let history = r#"[{"date":"2000-03-24","buffett_ratio":1.4321},
            {"date":"2000-03-27","buffett_ratio":1.5}]"#;
        file.write_all(history.as_bytes()).expect("write history");

        let series = read_history(file.path()).expect("history parses");

        assert_eq!(series.values(), vec![143.21, 150.0]);
    }

    #[test]
    fn malformed_history_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = read_history(file.path()).expect_err("must fail");
        assert!(matches!(err, CliError::Parse { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_history(Path::new("/nonexistent/history.json")).expect_err("must fail");
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn inverted_peak_window_is_rejected() {
        let peak = PeakArgs {
            peak_start: Some(String::from("2001-01-01")),
            peak_end: Some(String::from("2000-01-01")),
        };
        let err = analysis_config(&peak, None).expect_err("must fail");
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn warns_on_single_point_history() {
        let series = Series::new(vec![SeriesPoint::new("2000-03-24", 150.0)]);
        let model = TrendEstimator::default().estimate(&series, &PeakWindow::default());

        let warnings = series_warnings(&series, &model);
        assert!(warnings.iter().any(|warning| warning.contains("single point")));
    }
}
