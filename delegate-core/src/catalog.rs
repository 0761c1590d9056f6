//! Read-only catalogue repository.
//!
//! Pages only see the `Catalog` trait, so the demo fixtures can later be
//! swapped for file- or network-backed data without touching page logic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{DelegateError, Result};
use crate::fixtures;
use crate::model::{
    ActivityLogEntry, ComparisonRow, Complexity, ConstraintType, Integration, IntegrationCategory,
    Metric, ProgressStep, ReasoningEntry, Recommendation, Task, TaskCategory,
};

/// Every catalogue collection in one serialisable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    pub tasks: Vec<Task>,
    pub constraint_types: Vec<ConstraintType>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
    #[serde(default)]
    pub activity_log: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub reasoning_log: Vec<ReasoningEntry>,
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub comparison: Vec<ComparisonRow>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub steps: Vec<ProgressStep>,
    #[serde(default = "default_current_premium")]
    pub current_annual_premium: u32,
}

fn default_current_premium() -> u32 {
    fixtures::CURRENT_ANNUAL_PREMIUM
}

impl CatalogData {
    /// Check the invariants every page relies on.
    pub fn validate(&self) -> Result<()> {
        let recommended = self.recommendations.iter().filter(|r| r.recommended).count();
        if recommended != 1 {
            return Err(DelegateError::InvalidCatalog(format!(
                "exactly one recommendation must be flagged recommended (found {recommended})"
            )));
        }

        check_unique("task", self.tasks.iter().map(|t| t.id.as_str()))?;
        check_unique("constraint type", self.constraint_types.iter().map(|c| c.id.as_str()))?;
        check_unique("integration", self.integrations.iter().map(|i| i.id.as_str()))?;
        check_unique("recommendation", self.recommendations.iter().map(|r| r.id.as_str()))?;

        for r in &self.recommendations {
            if !(0.0..=5.0).contains(&r.rating) {
                return Err(DelegateError::InvalidCatalog(format!(
                    "{}: rating {} outside 0-5",
                    r.id, r.rating
                )));
            }
            if r.coverage_score > 100 || r.monthly_savings > 100 {
                return Err(DelegateError::InvalidCatalog(format!(
                    "{}: coverage score and savings are percentages",
                    r.id
                )));
            }
        }
        for t in &self.tasks {
            if t.success_rate > 100 {
                return Err(DelegateError::InvalidCatalog(format!("{}: success rate above 100", t.id)));
            }
        }
        for e in &self.reasoning_log {
            if e.confidence > 100 {
                return Err(DelegateError::InvalidCatalog(format!(
                    "reasoning {}: confidence above 100",
                    e.id
                )));
            }
        }
        for e in &self.activity_log {
            if e.confidence.is_some_and(|c| c > 100) {
                return Err(DelegateError::InvalidCatalog(format!(
                    "activity {}: confidence above 100",
                    e.id
                )));
            }
        }
        Ok(())
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(DelegateError::InvalidCatalog(format!("{kind} with empty id")));
        }
        if !seen.insert(id) {
            return Err(DelegateError::InvalidCatalog(format!("duplicate {kind} id: {id}")));
        }
    }
    Ok(())
}

/// Optional list filter for task templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<TaskCategory>,
    pub complexity: Option<Complexity>,
}

impl TaskFilter {
    pub fn category(category: TaskCategory) -> Self {
        Self {
            category: Some(category),
            complexity: None,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.category.is_none_or(|c| c == task.category)
            && self.complexity.is_none_or(|c| c == task.complexity)
    }
}

/// Read-only view over catalogue data.
///
/// Implementors supply the collections; lookups and filters are provided.
pub trait Catalog {
    fn all_tasks(&self) -> &[Task];
    fn constraint_types(&self) -> &[ConstraintType];
    fn all_integrations(&self) -> &[Integration];
    fn activity_log(&self) -> &[ActivityLogEntry];
    fn reasoning_log(&self) -> &[ReasoningEntry];
    fn recommendations(&self) -> &[Recommendation];
    fn comparison_rows(&self) -> &[ComparisonRow];
    fn metrics(&self) -> &[Metric];
    fn steps(&self) -> &[ProgressStep];
    fn current_annual_premium(&self) -> u32;

    fn tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.all_tasks().iter().filter(|t| filter.matches(t)).collect()
    }

    fn task(&self, id: &str) -> Option<&Task> {
        self.all_tasks().iter().find(|t| t.id == id)
    }

    fn constraint_type(&self, id: &str) -> Option<&ConstraintType> {
        self.constraint_types().iter().find(|c| c.id == id)
    }

    fn integrations(&self, category: Option<IntegrationCategory>) -> Vec<&Integration> {
        self.all_integrations()
            .iter()
            .filter(|i| category.is_none_or(|c| c == i.category))
            .collect()
    }

    fn integration(&self, id: &str) -> Option<&Integration> {
        self.all_integrations().iter().find(|i| i.id == id)
    }

    fn recommendation(&self, id: &str) -> Option<&Recommendation> {
        self.recommendations().iter().find(|r| r.id == id)
    }

    /// The entry flagged `recommended`.
    fn recommended(&self) -> Option<&Recommendation> {
        self.recommendations().iter().find(|r| r.recommended)
    }

    /// Every entry that is not the recommended one, in catalogue order.
    fn alternatives(&self) -> Vec<&Recommendation> {
        self.recommendations().iter().filter(|r| !r.recommended).collect()
    }
}

/// Catalogue handle shared by the dashboard and its pages.
pub type SharedCatalog = Arc<dyn Catalog + Send + Sync>;

/// In-memory catalogue over an owned `CatalogData`.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    data: CatalogData,
}

impl StaticCatalog {
    /// Wrap validated data.
    pub fn new(data: CatalogData) -> Result<Self> {
        data.validate()?;
        Ok(Self { data })
    }

    /// Skips validation, for exercising consumers against broken data.
    #[cfg(test)]
    pub(crate) fn unchecked(data: CatalogData) -> Self {
        Self { data }
    }

    /// The built-in demo fixtures.
    pub fn demo() -> Self {
        Self {
            data: fixtures::demo_catalog(),
        }
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }
}

impl Catalog for StaticCatalog {
    fn all_tasks(&self) -> &[Task] {
        &self.data.tasks
    }
    fn constraint_types(&self) -> &[ConstraintType] {
        &self.data.constraint_types
    }
    fn all_integrations(&self) -> &[Integration] {
        &self.data.integrations
    }
    fn activity_log(&self) -> &[ActivityLogEntry] {
        &self.data.activity_log
    }
    fn reasoning_log(&self) -> &[ReasoningEntry] {
        &self.data.reasoning_log
    }
    fn recommendations(&self) -> &[Recommendation] {
        &self.data.recommendations
    }
    fn comparison_rows(&self) -> &[ComparisonRow] {
        &self.data.comparison
    }
    fn metrics(&self) -> &[Metric] {
        &self.data.metrics
    }
    fn steps(&self) -> &[ProgressStep] {
        &self.data.steps
    }
    fn current_annual_premium(&self) -> u32 {
        self.data.current_annual_premium
    }
}

/// Words too generic to identify a template.
const STOP_WORDS: &[&str] = &["find", "best", "plan", "with", "from", "for", "the", "and", "my"];

/// Rank task templates whose category or title words occur in `goal`.
///
/// Category hits weigh 2, title-word hits 1. Templates with no hit are
/// dropped; ties keep catalogue order.
pub fn suggest_tasks<'a, C: Catalog + ?Sized>(catalog: &'a C, goal: &str) -> Vec<&'a Task> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Task)> = catalog
        .all_tasks()
        .iter()
        .filter_map(|t| {
            let mut score = 0;
            if word_regex(t.category.as_str()).is_some_and(|re| re.is_match(goal)) {
                score += 2;
            }
            for word in t.title.split_whitespace() {
                let w = word.to_lowercase();
                if w.len() < 4 || STOP_WORDS.contains(&w.as_str()) || w == t.category.as_str() {
                    continue;
                }
                if word_regex(&w).is_some_and(|re| re.is_match(goal)) {
                    score += 1;
                }
            }
            (score > 0).then_some((score, t))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, t)| t).collect()
}

fn word_regex(word: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id_and_filter_by_category() {
        let c = StaticCatalog::demo();
        assert_eq!(c.task("travel-1").map(|t| t.category), Some(TaskCategory::Travel));
        assert!(c.task("nope").is_none());

        let complex = c.tasks(&TaskFilter {
            category: None,
            complexity: Some(Complexity::Complex),
        });
        let ids: Vec<&str> = complex.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["investment-1", "research-1"]);

        assert_eq!(c.tasks(&TaskFilter::category(TaskCategory::Shopping)).len(), 1);
        assert_eq!(c.tasks(&TaskFilter::default()).len(), 5);
    }

    #[test]
    fn integrations_filter_by_category() {
        let c = StaticCatalog::demo();
        let docs = c.integrations(Some(IntegrationCategory::Documents));
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|i| !i.connected));
        assert_eq!(c.integrations(None).len(), 5);
    }

    #[test]
    fn recommended_and_alternatives_partition_the_list() {
        let c = StaticCatalog::demo();
        assert_eq!(c.recommended().map(|r| r.id.as_str()), Some("allstate"));
        let alt: Vec<&str> = c.alternatives().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(alt, vec!["progressive", "geico"]);
    }

    #[test]
    fn validate_rejects_two_recommended() {
        let mut data = fixtures::demo_catalog();
        data.recommendations[1].recommended = true;
        let err = StaticCatalog::new(data).unwrap_err();
        assert!(matches!(err, DelegateError::InvalidCatalog(_)));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut data = fixtures::demo_catalog();
        let dup = data.tasks[0].clone();
        data.tasks.push(dup);
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn suggestions_rank_category_hits_first() {
        let c = StaticCatalog::demo();
        let hits = suggest_tasks(&c, "Find cheaper insurance for my house");
        assert_eq!(hits.first().map(|t| t.id.as_str()), Some("insurance-1"));

        let hits = suggest_tasks(&c, "I need a new laptop");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "shopping-1");

        assert!(suggest_tasks(&c, "   ").is_empty());
        assert!(suggest_tasks(&c, "find the best").is_empty());
    }

    #[test]
    fn catalog_data_round_trips_through_json() {
        let data = fixtures::demo_catalog();
        let json = serde_json::to_string(&data).unwrap();
        let back: CatalogData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
