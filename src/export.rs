use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use crate::synth::{DashboardSeries, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Series {
    DailySpend,
    Monthly,
    Performance,
    Heatmap,
}

#[derive(Serialize)]
struct MonthlyRow<'a> {
    month: &'a str,
    spend: Option<u32>,
    forecast: Option<u32>,
    budget: u32,
}

#[derive(Serialize)]
struct HeatmapRow<'a> {
    day: &'a str,
    hour: &'a str,
    value: u8,
}

/// Writes one series as CSV with a header row; returns the number of data rows.
pub fn write_series<W: Write>(
    writer: W,
    data: &DashboardSeries,
    series: Series,
    timeframe: Timeframe,
) -> anyhow::Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0usize;

    match series {
        Series::DailySpend => {
            for point in data.spend_window(timeframe) {
                csv.serialize(point)?;
                rows += 1;
            }
        }
        Series::Monthly => {
            // Option fields serialize as empty cells, keeping the header stable.
            for point in &data.monthly_spend {
                csv.serialize(MonthlyRow {
                    month: &point.month,
                    spend: point.spend,
                    forecast: point.forecast,
                    budget: point.budget,
                })?;
                rows += 1;
            }
        }
        Series::Performance => {
            for point in &data.query_performance {
                csv.serialize(point)?;
                rows += 1;
            }
        }
        Series::Heatmap => {
            let heatmap = &data.heatmap;
            for (day, row) in heatmap.y_labels.iter().zip(&heatmap.data) {
                for (hour, value) in heatmap.x_labels.iter().zip(row) {
                    csv.serialize(HeatmapRow {
                        day,
                        hour,
                        value: *value,
                    })?;
                    rows += 1;
                }
            }
        }
    }

    csv.flush()?;
    Ok(rows)
}

pub fn export_to_path(
    path: &Path,
    data: &DashboardSeries,
    series: Series,
    timeframe: Timeframe,
) -> anyhow::Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_series(file, data, series, timeframe)
}
