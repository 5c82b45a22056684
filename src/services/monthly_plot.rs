use std::collections::BTreeSet;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::{Palette, Palette99};
use thiserror::Error;

use crate::domain::variant::Category;
use crate::services::output_json::{MonthlyPercentageValue, OutputJsonError, read_dataset_json};

#[derive(Error, Debug)]
pub enum MonthlyPlotError {
    #[error("failed to load variant dataset: {0}")]
    Dataset(#[from] OutputJsonError),
    #[error("variant dataset has no monthly records")]
    EmptyMonthly,
    #[error("failed to render monthly plot: {0}")]
    Plot(String),
}

/// Renders the monthly variant percentages of a prepared dataset as a
/// stacked bar chart.
pub fn plot_monthly_from_dataset_file(
    input_path: &Path,
    output_path: &Path,
) -> Result<(), MonthlyPlotError> {
    let dataset = read_dataset_json(input_path)?;
    if dataset.monthly_percentage_values.is_empty() {
        return Err(MonthlyPlotError::EmptyMonthly);
    }
    render_plot_png(output_path, &dataset.monthly_percentage_values)
}

fn render_plot_png(
    output_path: &Path,
    months: &[MonthlyPercentageValue],
) -> Result<(), MonthlyPlotError> {
    let categories: BTreeSet<Category> = months
        .iter()
        .flat_map(|month| month.variant_percentages.keys().copied())
        .collect();
    let max_x = months.len().max(1) as i32;

    let root = BitMapBackend::new(output_path, (1200, 650)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Estimated Variant Share of Monthly Cases", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0f64..1f64)
        .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Month")
        .y_desc("Share of cases")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(months.len().min(12).max(1))
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            months
                .get(*index as usize)
                .map(|month| month.month.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|share| format!("{:.0}%", share * 100.0))
        .draw()
        .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?;

    // running top of each bar, in month order
    let mut stacked = vec![0f64; months.len()];
    for (color_index, category) in categories.iter().enumerate() {
        let color = Palette99::pick(color_index).mix(1.0);
        let style = color.filled();
        let segments: Vec<_> = months
            .iter()
            .enumerate()
            .filter_map(|(idx, month)| {
                let share = month.variant_percentages.get(category).copied()?;
                let bottom = stacked[idx];
                stacked[idx] += share;
                Some(Rectangle::new(
                    [(idx as i32, bottom), (idx as i32 + 1, stacked[idx])],
                    style,
                ))
            })
            .collect();

        chart
            .draw_series(segments)
            .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?
            .label(category.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| MonthlyPlotError::Plot(e.to_string()))?;
    Ok(())
}
