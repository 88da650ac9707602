use chrono::{DateTime, Duration, Utc};

use crate::models::{
    ChatMessage, DepartmentRoi, Level, LowRoiQuery, Notification, NotificationKind,
    OptimizationOpportunity, ProjectSpend, RoiBucket, TopQuery, WelcomeFeature,
};

pub fn project_spend() -> Vec<ProjectSpend> {
    vec![
        ProjectSpend { name: "Marketing Analytics", spend: 1452.78 },
        ProjectSpend { name: "Customer Data", spend: 987.34 },
        ProjectSpend { name: "Sales Pipeline", spend: 856.92 },
        ProjectSpend { name: "Product Analytics", spend: 645.21 },
        ProjectSpend { name: "Operations", spend: 314.53 },
    ]
}

pub fn department_roi() -> Vec<DepartmentRoi> {
    vec![
        DepartmentRoi { department: "Marketing", spend: 1856.23, roi: 87 },
        DepartmentRoi { department: "Sales", spend: 1234.56, roi: 82 },
        DepartmentRoi { department: "Customer Success", spend: 978.45, roi: 76 },
        DepartmentRoi { department: "Operations", spend: 856.34, roi: 74 },
        DepartmentRoi { department: "Analytics", spend: 1532.67, roi: 58 },
    ]
}

pub fn roi_distribution() -> Vec<RoiBucket> {
    vec![
        RoiBucket { name: "High ROI", value: 42, color: "#4ade80" },
        RoiBucket { name: "Medium ROI", value: 35, color: "#facc15" },
        RoiBucket { name: "Low ROI", value: 23, color: "#f87171" },
    ]
}

pub fn optimization_opportunities() -> Vec<OptimizationOpportunity> {
    vec![
        OptimizationOpportunity {
            id: 1,
            name: "Add partitioning to customer_events table",
            impact: Level::High,
            savings_percentage: 85,
            monthly_savings: 420.56,
            complexity: Level::Medium,
            description: "This table is queried frequently and contains 2.3TB of data. Adding date-based partitioning could reduce query costs by up to 85%.",
        },
        OptimizationOpportunity {
            id: 2,
            name: "Optimize daily_user_activity query",
            impact: Level::High,
            savings_percentage: 72,
            monthly_savings: 320.45,
            complexity: Level::High,
            description: "This query uses a cross join without proper filtering, scanning 845GB daily. Restructuring could save approximately $320/month.",
        },
        OptimizationOpportunity {
            id: 3,
            name: "Implement caching for product_inventory query",
            impact: Level::Medium,
            savings_percentage: 56,
            monthly_savings: 215.78,
            complexity: Level::Low,
            description: "This query runs every 15 minutes but data changes infrequently. Implementing results caching could reduce execution frequency by 75%.",
        },
        OptimizationOpportunity {
            id: 4,
            name: "Add clustering to marketing_events table",
            impact: Level::Medium,
            savings_percentage: 42,
            monthly_savings: 156.23,
            complexity: Level::Medium,
            description: "Adding clustering by campaign_id and event_type would improve query performance and reduce costs for this 1.5TB table.",
        },
        OptimizationOpportunity {
            id: 5,
            name: "Reduce report_generation job frequency",
            impact: Level::Low,
            savings_percentage: 25,
            monthly_savings: 132.65,
            complexity: Level::Low,
            description: "This automated report runs hourly but could be reduced to every 4 hours with minimal business impact.",
        },
    ]
}

pub fn low_roi_queries() -> Vec<LowRoiQuery> {
    vec![
        LowRoiQuery {
            id: 1,
            name: "Historical User Sessions",
            department: "Analytics",
            monthly_cost: 578.92,
            purpose: None,
            execution_frequency: "Daily",
            last_executed: "8 hours ago",
        },
        LowRoiQuery {
            id: 2,
            name: "Legacy Product Metrics",
            department: "Product",
            monthly_cost: 324.56,
            purpose: Some("Monitoring discontinued features"),
            execution_frequency: "Hourly",
            last_executed: "2 hours ago",
        },
        LowRoiQuery {
            id: 3,
            name: "Archived Campaign Analysis",
            department: "Marketing",
            monthly_cost: 289.45,
            purpose: None,
            execution_frequency: "Weekly",
            last_executed: "3 days ago",
        },
        LowRoiQuery {
            id: 4,
            name: "Development Environment Logs",
            department: "Engineering",
            monthly_cost: 245.78,
            purpose: Some("Debug logs retention"),
            execution_frequency: "Continuous",
            last_executed: "23 minutes ago",
        },
    ]
}

pub fn top_queries() -> Vec<TopQuery> {
    vec![
        TopQuery { id: 1, name: "User Activity Analytics", cost: 124.56, roi: Level::Low, department: "Marketing" },
        TopQuery { id: 2, name: "Daily Sales Pipeline", cost: 89.34, roi: Level::High, department: "Sales" },
        TopQuery { id: 3, name: "Inventory Reconciliation", cost: 215.78, roi: Level::Medium, department: "Operations" },
        TopQuery { id: 4, name: "Customer Churn Analysis", cost: 154.23, roi: Level::High, department: "Customer Success" },
        TopQuery { id: 5, name: "Campaign Performance", cost: 178.92, roi: Level::Medium, department: "Marketing" },
    ]
}

/// Seed notifications, timestamped relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let seeds = [
        (
            1,
            NotificationKind::Alert,
            "Cost Threshold Exceeded",
            "Your BigQuery spend has exceeded the daily threshold of $300. Current spend: $324.56.",
            Duration::minutes(30),
            false,
            Level::High,
        ),
        (
            2,
            NotificationKind::Warning,
            "Long-Running Query Detected",
            "\"Product Inventory Analysis\" query has been running for over 45 minutes.",
            Duration::hours(2),
            false,
            Level::Medium,
        ),
        (
            3,
            NotificationKind::Optimization,
            "Optimization Opportunity",
            "Adding partitioning to \"user_events\" table could reduce costs by 45%.",
            Duration::hours(8),
            false,
            Level::Medium,
        ),
        (
            4,
            NotificationKind::Alert,
            "Unusual Query Pattern",
            "Anomaly detected: 3x increase in Marketing department queries in the last hour.",
            Duration::hours(1),
            false,
            Level::High,
        ),
        (
            5,
            NotificationKind::Info,
            "Weekly Report Available",
            "Your BigQuery usage summary for last week is now available.",
            Duration::days(1),
            true,
            Level::Low,
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, kind, title, message, age, read, priority)| Notification {
            id,
            kind,
            title,
            message,
            timestamp: now - age,
            read,
            priority,
        })
        .collect()
}

pub fn initial_chat_history() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("How much did I spend on BigQuery yesterday?"),
        ChatMessage::assistant(
            "Your BigQuery spend for yesterday was $324.56, which is 12% higher than your daily average of $289.78.",
        ),
        ChatMessage::user("What are my top 5 costliest queries this month?"),
        ChatMessage::assistant(
            "Here are your top 5 costliest queries for this month:\n\n1. \"Customer Behavior Analytics\" - $215.78\n2. \"Product Inventory Reconciliation\" - $178.92\n3. \"Marketing Campaign Attribution\" - $154.23\n4. \"Daily User Activity Report\" - $124.56\n5. \"Sales Pipeline Forecast\" - $89.34",
        ),
    ]
}

pub const SUGGESTED_QUESTIONS: [&str; 8] = [
    "How much did I spend on BigQuery today?",
    "What are my optimization opportunities?",
    "Show me my ROI breakdown by department",
    "Identify my longest-running queries",
    "What's my monthly spend projection?",
    "Which tables should I partition?",
    "Where can I save the most money?",
    "Compare this month's spend to last month",
];

pub fn welcome_features() -> Vec<WelcomeFeature> {
    vec![
        WelcomeFeature {
            title: "Real-time Cost Monitoring",
            description: "Track your BigQuery spending in real-time and get alerts when you approach budget thresholds.",
        },
        WelcomeFeature {
            title: "Query Optimization",
            description: "Get AI-powered suggestions to optimize your most expensive queries and reduce costs.",
        },
        WelcomeFeature {
            title: "ROI Analysis",
            description: "Understand the business value of your data investments with detailed ROI metrics.",
        },
        WelcomeFeature {
            title: "AI Assistant",
            description: "Chat with your data governance assistant to get answers about your BigQuery usage.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn accessors_return_identical_data() {
        let now = Utc::now();
        assert_eq!(project_spend(), project_spend());
        assert_eq!(department_roi(), department_roi());
        assert_eq!(optimization_opportunities(), optimization_opportunities());
        assert_eq!(low_roi_queries(), low_roi_queries());
        assert_eq!(notifications(now), notifications(now));
        assert_eq!(welcome_features(), welcome_features());
    }

    #[test]
    fn catalog_sizes_match_dashboard() {
        assert_eq!(optimization_opportunities().len(), 5);
        assert_eq!(low_roi_queries().len(), 4);
        assert_eq!(notifications(Utc::now()).len(), 5);
        assert_eq!(welcome_features().len(), 4);
        assert_eq!(top_queries().len(), 5);
    }

    #[test]
    fn roi_distribution_sums_to_hundred() {
        let total: u32 = roi_distribution().iter().map(|b| b.value as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn only_weekly_report_starts_read() {
        let now = Utc::now();
        let seeded = notifications(now);
        let read: Vec<u32> = seeded.iter().filter(|n| n.read).map(|n| n.id).collect();
        assert_eq!(read, vec![5]);
        assert_eq!(seeded[0].timestamp, now - Duration::minutes(30));
    }

    #[test]
    fn seed_transcript_alternates_roles() {
        let history = initial_chat_history();
        assert_eq!(history.len(), 4);
        for (index, message) in history.iter().enumerate() {
            let expected = if index % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(message.role, expected);
        }
    }

    #[test]
    fn opportunity_percentages_are_bounded() {
        assert!(optimization_opportunities()
            .iter()
            .all(|o| o.savings_percentage <= 100 && o.monthly_savings > 0.0));
    }
}
