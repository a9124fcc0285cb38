use serde::Serialize;

use valband_core::{PeakWindow, TrendEstimator, TrendModel};

use crate::cli::TrendArgs;
use crate::error::CliError;

use super::{analysis_config, input_name, read_history, series_warnings, CommandResult};

#[derive(Debug, Serialize)]
struct TrendResponseData {
    labels: Vec<String>,
    peak_window: PeakWindow,
    model: TrendModel,
}

pub fn run(args: &TrendArgs) -> Result<CommandResult, CliError> {
    let config = analysis_config(&args.peak, None)?;
    let series = read_history(&args.history)?;

    let model = TrendEstimator::new(config.trend)?.estimate(&series, &config.peak_window);
    let warnings = series_warnings(&series, &model);

    let data = serde_json::to_value(TrendResponseData {
        labels: series.labels(),
        peak_window: config.peak_window,
        model,
    })?;

    Ok(CommandResult::ok(data, vec![input_name(&args.history)]).with_warnings(warnings))
}
