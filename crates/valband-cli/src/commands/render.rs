use serde::Serialize;

use valband_core::{analyze, ChartStyle};
use valband_overlay::{ChartLayout, FrameOptions, OverlayRegistry, Padding};

use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::svg::SvgCanvas;

use super::{analysis_config, input_name, read_history, series_warnings, CommandResult};

#[derive(Debug, Serialize)]
struct RenderResponseData {
    out: String,
    width: f64,
    height: f64,
    curves: usize,
    overlays: Vec<&'static str>,
    hover_index: Option<usize>,
}

pub fn run(args: &RenderArgs) -> Result<CommandResult, CliError> {
    let config = analysis_config(&args.peak, args.multiples.as_deref())?;
    let series = read_history(&args.history)?;
    let analysis = analyze(&series, &config, &ChartStyle::default())?;
    let mut warnings = series_warnings(&series, &analysis.model);

    let layout = ChartLayout {
        width: args.width,
        height: args.height,
        padding: Padding::default(),
    };
    let frame = layout.frame(&analysis.payload, args.hover_index, FrameOptions::default());
    if args.hover_index.is_some() && frame.active.is_empty() {
        warnings.push(format!(
            "hover index is outside the {} data points; hover line skipped",
            analysis.payload.len()
        ));
    }

    let registry = OverlayRegistry::with_defaults();
    let mut canvas = SvgCanvas::new(args.width, args.height);
    canvas.draw_curves(&analysis.payload, &frame);
    registry.render(&frame, &mut canvas);

    let out = input_name(&args.out);
    std::fs::write(&args.out, canvas.finish()).map_err(|source| CliError::Write {
        path: out.clone(),
        source,
    })?;
    tracing::info!(path = %out, "chart rendered");

    let data = serde_json::to_value(RenderResponseData {
        out,
        width: args.width,
        height: args.height,
        curves: analysis.payload.curves.len(),
        overlays: registry.ids(),
        hover_index: args.hover_index,
    })?;

    Ok(CommandResult::ok(data, vec![input_name(&args.history)]).with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use crate::cli::PeakArgs;

    use super::*;

    fn args(dir: &Path, hover_index: Option<usize>) -> RenderArgs {
        let history = dir.join("history.json");
        fs::write(
            &history,
            r#"[{"date": "1999-06-30", "buffett_ratio": 1.3},
                {"date": "2000-03-24", "buffett_ratio": 1.9},
                {"date": "2001-06-29", "buffett_ratio": 1.2}]"#,
        )
        .expect("write history");
        RenderArgs {
            history,
            out: dir.join("chart.svg"),
            width: 640.0,
            height: 320.0,
            hover_index,
            multiples: None,
            peak: PeakArgs::default(),
        }
    }

    #[test]
    fn writes_svg_with_default_overlays() {
        let dir = tempfile::tempdir().expect("temp dir");

        let result = run(&args(dir.path(), Some(1))).expect("render succeeds");

        let svg = fs::read_to_string(dir.path().join("chart.svg")).expect("svg written");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(result.data["curves"], 6);
        assert_eq!(result.data["overlays"][0], "point_labels");
        assert!(!result.warnings.iter().any(|warning| warning.contains("hover index")));
    }

    #[test]
    fn hover_index_past_the_data_warns() {
        let dir = tempfile::tempdir().expect("temp dir");

        let result = run(&args(dir.path(), Some(99))).expect("render succeeds");

        assert!(dir.path().join("chart.svg").exists());
        let expected = "hover index is outside the 3 data points; hover line skipped";
        assert!(result.warnings.iter().any(|warning| warning == expected));
        assert_eq!(result.data["hover_index"], 99);
    }
}
