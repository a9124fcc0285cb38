use serde::Serialize;

use valband_core::{bands, Band, TrendEstimator, TrendModel};

use crate::cli::BandsArgs;
use crate::error::CliError;

use super::{analysis_config, input_name, read_history, series_warnings, CommandResult};

#[derive(Debug, Serialize)]
struct BandsResponseData {
    labels: Vec<String>,
    model: TrendModel,
    bands: Vec<Band>,
}

pub fn run(args: &BandsArgs) -> Result<CommandResult, CliError> {
    let config = analysis_config(&args.peak, args.multiples.as_deref())?;
    let series = read_history(&args.history)?;

    let model = TrendEstimator::new(config.trend)?.estimate(&series, &config.peak_window);
    let bands = bands::build(&model, &config.multiples);
    let warnings = series_warnings(&series, &model);

    let data = serde_json::to_value(BandsResponseData {
        labels: series.labels(),
        model,
        bands,
    })?;

    Ok(CommandResult::ok(data, vec![input_name(&args.history)]).with_warnings(warnings))
}
