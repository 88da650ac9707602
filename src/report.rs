use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::fixtures;
use crate::models::{DailySpendPoint, Notification, SpendSummary};
use crate::notifications::format_relative_time;
use crate::synth::Timeframe;

pub fn summarize_spend(points: &[DailySpendPoint]) -> SpendSummary {
    let total: u64 = points.iter().map(|p| p.spend as u64).sum();
    let peak = points.iter().max_by_key(|p| p.spend);

    SpendSummary {
        total,
        average: if points.is_empty() {
            0.0
        } else {
            total as f64 / points.len() as f64
        },
        peak_date: peak.map(|p| p.date.clone()),
        peak_spend: peak.map(|p| p.spend).unwrap_or(0),
        days_over_budget: points.iter().filter(|p| p.spend > p.budget).count(),
    }
}

pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let whole = (cents / 100).abs().to_string();

    let mut grouped = String::new();
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cents < 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", (cents % 100).abs())
}

pub fn build_report(
    timeframe: Timeframe,
    window: &[DailySpendPoint],
    notifications: &[Notification],
    now: DateTime<Utc>,
) -> String {
    let summary = summarize_spend(window);

    let mut output = String::new();

    let _ = writeln!(output, "# QuerySense Cost Report");
    let _ = writeln!(
        output,
        "Generated {} for the last {} days",
        now.format("%Y-%m-%d %H:%M UTC"),
        timeframe.days()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Spend Summary");

    if window.is_empty() {
        let _ = writeln!(output, "No spend recorded for this window.");
    } else {
        let _ = writeln!(output, "- Total: {}", format_money(summary.total as f64));
        let _ = writeln!(output, "- Daily average: {}", format_money(summary.average));
        if let Some(date) = &summary.peak_date {
            let _ = writeln!(
                output,
                "- Peak: {} on {}",
                format_money(summary.peak_spend as f64),
                date
            );
        }
        let _ = writeln!(
            output,
            "- Days over budget: {} of {}",
            summary.days_over_budget,
            window.len()
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Spend by Project");
    for project in fixtures::project_spend() {
        let _ = writeln!(output, "- {}: {}", project.name, format_money(project.spend));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Department ROI");
    let mut departments = fixtures::department_roi();
    departments.sort_by(|a, b| b.roi.cmp(&a.roi));
    for dept in departments.iter() {
        let _ = writeln!(
            output,
            "- {}: ROI {}/100 on {}",
            dept.department,
            dept.roi,
            format_money(dept.spend)
        );
    }

    let opportunities = fixtures::optimization_opportunities();
    let savings: f64 = opportunities.iter().map(|o| o.monthly_savings).sum();
    let _ = writeln!(output);
    let _ = writeln!(output, "## Optimization Opportunities");
    let _ = writeln!(output, "Potential savings: {}/month", format_money(savings));
    for opportunity in opportunities.iter() {
        let _ = writeln!(
            output,
            "- [{} impact, {} complexity] {} ({}%, {}/month)",
            opportunity.impact.label(),
            opportunity.complexity.label(),
            opportunity.name,
            opportunity.savings_percentage,
            format_money(opportunity.monthly_savings)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Low ROI Queries");
    for query in fixtures::low_roi_queries() {
        let _ = writeln!(
            output,
            "- {} ({}): {}/month, {} ({}) - {}",
            query.name,
            query.department,
            format_money(query.monthly_cost),
            query.execution_frequency,
            query.last_executed,
            query.purpose.unwrap_or("no documented purpose")
        );
    }

    let unread: Vec<&Notification> = notifications.iter().filter(|n| !n.read).collect();
    let _ = writeln!(output);
    let _ = writeln!(output, "## Unread Notifications");

    if unread.is_empty() {
        let _ = writeln!(output, "All caught up.");
    } else {
        for notification in unread {
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                notification.title,
                format_relative_time(notification.timestamp, now),
                notification.message
            );
        }
    }

    output
}
