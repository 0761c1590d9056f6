//! Catalogue record types for the delegation dashboard.
//!
//! These are the shapes a real backend would return; today they are only
//! filled from the demo fixtures or a catalogue file. JSON field names are
//! camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Insurance,
    Investment,
    Travel,
    Shopping,
    Research,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Insurance,
        TaskCategory::Investment,
        TaskCategory::Travel,
        TaskCategory::Shopping,
        TaskCategory::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Insurance => "insurance",
            TaskCategory::Investment => "investment",
            TaskCategory::Travel => "travel",
            TaskCategory::Shopping => "shopping",
            TaskCategory::Research => "research",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// A delegable task template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub complexity: Complexity,
    /// Free text, e.g. "10-15 minutes".
    pub estimated_time: String,
    /// Percent, 0-100.
    pub success_rate: u8,
}

/// A kind of constraint the user can attach to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintType {
    pub id: String,
    pub label: String,
    /// Icon tag understood by the front end ("DollarSign", "Shield", ...).
    pub icon: String,
    pub placeholder: String,
    pub description: String,
}

/// A constraint the user entered on the goal page. Page-local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintInstance {
    pub id: u64,
    pub type_id: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationCategory {
    Banking,
    Documents,
    Services,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub connected: bool,
    pub category: IntegrationCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityStatus {
    Completed,
    InProgress,
    Pending,
    Error,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Completed => "completed",
            ActivityStatus::InProgress => "in-progress",
            ActivityStatus::Pending => "pending",
            ActivityStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    /// Display string ("2:03 PM"); entries are ordered by position only.
    pub timestamp: String,
    pub step: String,
    pub status: ActivityStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningCategory {
    Analysis,
    Decision,
    Optimization,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningEntry {
    pub id: String,
    pub timestamp: String,
    pub reasoning: String,
    /// 0-100.
    pub confidence: u8,
    pub category: ReasoningCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// A candidate option presented on the review page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub provider: String,
    /// Dollars per year.
    pub annual_premium: u32,
    /// Percent saved relative to the current policy.
    pub monthly_savings: u8,
    /// 0.0-5.0
    pub rating: f64,
    /// 0-100
    pub coverage_score: u8,
    pub recommended: bool,
    pub features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub ai_reasoning: Vec<String>,
    pub risk_level: RiskLevel,
    pub processing_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Improvement {
    Better,
    Same,
    Worse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One row of the current-vs-recommended table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub feature: String,
    pub current: String,
    pub recommended: String,
    pub improvement: Improvement,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// A "current findings" tile on the monitoring page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    pub change: String,
    pub trend: Trend,
    pub unit: String,
}

/// A node in the monitoring page's step timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStep {
    pub number: u8,
    pub name: String,
    pub status: ActivityStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_status_uses_kebab_case() {
        let json = serde_json::to_string(&ActivityStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(ActivityStatus::InProgress.as_str(), "in-progress");
    }

    #[test]
    fn metric_value_accepts_numbers_and_text() {
        let n: MetricValue = serde_json::from_str("12").unwrap();
        let t: MetricValue = serde_json::from_str("\"8m 30s\"").unwrap();
        assert_eq!(n, MetricValue::Count(12));
        assert_eq!(t.to_string(), "8m 30s");
    }

    #[test]
    fn task_category_parse_is_case_insensitive() {
        assert_eq!(TaskCategory::parse(" Travel "), Some(TaskCategory::Travel));
        assert_eq!(TaskCategory::parse("groceries"), None);
    }

    #[test]
    fn recommendation_serializes_camel_case() {
        let r = Recommendation {
            id: "x".to_string(),
            provider: "X".to_string(),
            annual_premium: 100,
            monthly_savings: 10,
            rating: 4.0,
            coverage_score: 80,
            recommended: false,
            features: vec![],
            pros: vec![],
            cons: vec![],
            ai_reasoning: vec![],
            risk_level: RiskLevel::Low,
            processing_time: "1 day".to_string(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["annualPremium"], 100);
        assert_eq!(v["aiReasoning"], serde_json::json!([]));
        assert_eq!(v["riskLevel"], "low");
    }
}
