use serde::Serialize;

use valband_core::LatestSnapshot;

use crate::cli::SnapshotArgs;
use crate::error::CliError;

use super::{input_name, read_json, CommandResult};

#[derive(Debug, Serialize)]
struct SnapshotResponseData {
    latest: LatestSnapshot,
    ratio_percent: f64,
}

pub fn run(args: &SnapshotArgs) -> Result<CommandResult, CliError> {
    let latest: LatestSnapshot = read_json(&args.latest)?;
    latest.validate()?;

    let missing_ticker = latest.source_ticker.is_none();
    let data = serde_json::to_value(SnapshotResponseData {
        ratio_percent: latest.ratio_percent(),
        latest,
    })?;

    let result = CommandResult::ok(data, vec![input_name(&args.latest)]);
    if missing_ticker {
        return Ok(result.with_warning("snapshot does not record its source ticker"));
    }
    Ok(result)
}
