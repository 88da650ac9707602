use std::f64::consts::PI;

use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use crate::models::{DailySpendPoint, HeatmapMatrix, MonthlySpendPoint, QueryPerformancePoint};

pub const DAILY_BUDGET: u32 = 300;
pub const MONTHLY_BUDGET: u32 = 5000;
pub const SERIES_DAYS: usize = 30;
pub const PERFORMANCE_DAYS: usize = 14;

const BASE_DAILY_SPEND: f64 = 250.0;
const BASE_MONTHLY_SPEND: f64 = 4000.0;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Trailing window of the 30-day spend series shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Timeframe {
    #[value(name = "7d")]
    #[serde(rename = "7d")]
    Week,
    #[value(name = "14d")]
    #[serde(rename = "14d")]
    Fortnight,
    #[default]
    #[value(name = "30d")]
    #[serde(rename = "30d")]
    Month,
}

impl Timeframe {
    pub fn days(self) -> usize {
        match self {
            Timeframe::Week => 7,
            Timeframe::Fortnight => 14,
            Timeframe::Month => 30,
        }
    }

    /// Trailing slice of an already generated series; shorter series are returned whole.
    pub fn window(self, series: &[DailySpendPoint]) -> &[DailySpendPoint] {
        let start = series.len().saturating_sub(self.days());
        &series[start..]
    }
}

/// Labels for the `days` calendar days ending at `today`, oldest first.
pub fn date_labels(today: NaiveDate, days: usize) -> Vec<String> {
    (0..days)
        .rev()
        .map(|offset| {
            (today - Duration::days(offset as i64))
                .format("%b %d")
                .to_string()
        })
        .collect()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_month_index() -> usize {
    Local::now().month0() as usize
}

fn is_weekend(day_index: usize) -> bool {
    day_index % 7 == 5 || day_index % 7 == 6
}

/// Unjittered spend for position `index` of a `days`-long window.
pub fn daily_spend_baseline(index: usize, days: usize) -> f64 {
    let third = (days / 3).max(1);
    let shape = if index < third {
        15.0 * index as f64
    } else if index < 2 * third {
        15.0 * third as f64 - 5.0 * (index - third) as f64
    } else {
        10.0 * third as f64 - 10.0 * (index - 2 * third) as f64
    };

    let mut value = BASE_DAILY_SPEND + shape;
    if is_weekend(index) {
        value *= 0.7;
    }
    value
}

pub fn generate_daily_spend<R: Rng>(rng: &mut R, today: NaiveDate, days: usize) -> Vec<DailySpendPoint> {
    date_labels(today, days)
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let factor = 0.8 + rng.gen::<f64>() * 0.4;
            let spend = (daily_spend_baseline(index, days) * factor).round().max(0.0);
            DailySpendPoint {
                date,
                spend: spend as u32,
                budget: DAILY_BUDGET,
            }
        })
        .collect()
}

fn business_hours_multiplier(hour: usize, weekend: bool) -> f64 {
    if (9..=17).contains(&hour) && !weekend {
        1.5
    } else if (7..=19).contains(&hour) {
        1.0
    } else {
        0.5
    }
}

pub fn generate_heatmap<R: Rng>(rng: &mut R) -> HeatmapMatrix {
    let data = (0..WEEKDAYS.len())
        .map(|day| {
            let weekend = is_weekend(day);
            let weekday_factor = if weekend { 0.3 } else { 1.0 };
            (0..24)
                .map(|hour| {
                    let time_of_day = (hour as f64 / 24.0 * PI * 2.0).sin() * 50.0 + 50.0;
                    let noise = rng.gen::<f64>() * 30.0;
                    let value = (time_of_day + noise)
                        * weekday_factor
                        * business_hours_multiplier(hour, weekend);
                    value.clamp(0.0, 100.0).round() as u8
                })
                .collect()
        })
        .collect();

    HeatmapMatrix {
        data,
        x_labels: (0..24).map(|hour| format!("{hour}:00")).collect(),
        y_labels: WEEKDAYS.iter().map(|day| day.to_string()).collect(),
    }
}

/// Months up to and including `current_month` (zero based) carry actual spend, the rest a forecast.
pub fn generate_monthly_forecast<R: Rng>(rng: &mut R, current_month: usize) -> Vec<MonthlySpendPoint> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let mut base = BASE_MONTHLY_SPEND;
            if index >= 9 {
                base += 1000.0;
            }
            if index <= 2 {
                base -= 500.0;
            }

            let factor = 0.9 + rng.gen::<f64>() * 0.3;
            let value = (base * factor).round() as u32;
            let actual = index <= current_month;

            MonthlySpendPoint {
                month: month.to_string(),
                spend: actual.then_some(value),
                forecast: (!actual).then_some(value),
                budget: MONTHLY_BUDGET,
            }
        })
        .collect()
}

pub fn generate_query_performance<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<QueryPerformancePoint> {
    date_labels(today, PERFORMANCE_DAYS)
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let factor = 0.9 + rng.gen::<f64>() * 0.2;
            let execution = ((100.0 - index as f64 * 3.5) * factor).round().max(50.0);
            let scanned = ((800.0 - index as f64 * 25.0) * factor).round();
            QueryPerformancePoint {
                date,
                execution_time: execution as u32,
                data_scanned: scanned as u32,
            }
        })
        .collect()
}

/// Every chart series the dashboard needs, generated once at startup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSeries {
    pub daily_spend: Vec<DailySpendPoint>,
    pub heatmap: HeatmapMatrix,
    pub monthly_spend: Vec<MonthlySpendPoint>,
    pub query_performance: Vec<QueryPerformancePoint>,
}

impl DashboardSeries {
    pub fn generate<R: Rng>(rng: &mut R, today: NaiveDate, current_month: usize) -> Self {
        Self {
            daily_spend: generate_daily_spend(rng, today, SERIES_DAYS),
            heatmap: generate_heatmap(rng),
            monthly_spend: generate_monthly_forecast(rng, current_month),
            query_performance: generate_query_performance(rng, today),
        }
    }

    pub fn spend_window(&self, timeframe: Timeframe) -> &[DailySpendPoint] {
        timeframe.window(&self.daily_spend)
    }

    /// The performance chart's weekly view shows the oldest seven points.
    pub fn performance_week(&self) -> &[QueryPerformancePoint] {
        let end = self.query_performance.len().min(7);
        &self.query_performance[..end]
    }
}
