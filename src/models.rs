use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpendPoint {
    pub date: String,
    pub spend: u32,
    pub budget: u32,
}

/// 7 weekday rows by 24 hour columns, every cell within `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapMatrix {
    pub data: Vec<Vec<u8>>,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpendPoint {
    pub month: String,
    pub spend: Option<u32>,
    pub forecast: Option<u32>,
    pub budget: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPerformancePoint {
    pub date: String,
    pub execution_time: u32,
    pub data_scanned: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSpend {
    pub name: &'static str,
    pub spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentRoi {
    pub department: &'static str,
    pub spend: f64,
    pub roi: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiBucket {
    pub name: &'static str,
    pub value: u8,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOpportunity {
    pub id: u32,
    pub name: &'static str,
    pub impact: Level,
    pub savings_percentage: u8,
    pub monthly_savings: f64,
    pub complexity: Level,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowRoiQuery {
    pub id: u32,
    pub name: &'static str,
    pub department: &'static str,
    pub monthly_cost: f64,
    pub purpose: Option<&'static str>,
    pub execution_frequency: &'static str,
    pub last_executed: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopQuery {
    pub id: u32,
    pub name: &'static str,
    pub cost: f64,
    pub roi: Level,
    pub department: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Warning,
    Optimization,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub message: String,
}

impl ChatMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelcomeFeature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendSummary {
    pub total: u64,
    pub average: f64,
    pub peak_date: Option<String>,
    pub peak_spend: u32,
    pub days_over_budget: usize,
}
