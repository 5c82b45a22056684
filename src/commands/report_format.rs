use crate::services::pipeline::PipelineSummary;

pub fn format_pipeline_summary(summary: &PipelineSummary) -> String {
    let timepoints = if summary.source_found {
        summary.timepoints_used.to_string()
    } else {
        "none (all dates unknown)".to_string()
    };

    let lines = [
        format!("Wrote {}", summary.output_path.display()),
        format!("daily rows: {}", summary.daily_rows),
        format!("monthly rows: {}", summary.monthly_rows),
        format!("USA timepoints: {timepoints}"),
    ];
    lines.join("\n")
}
