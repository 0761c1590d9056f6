//! Final review page state.
//!
//! Every display is derived from the selected catalogue entry; selecting
//! never mutates the catalogue.

use tracing::debug;

use crate::catalog::{Catalog, SharedCatalog};
use crate::error::{DelegateError, Result};
use crate::model::{ComparisonRow, Recommendation, RiskLevel};
use crate::notify::Notification;
use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewTab {
    #[default]
    Comparison,
    Reasoning,
}

impl ReviewTab {
    pub fn toggle(self) -> Self {
        match self {
            ReviewTab::Comparison => ReviewTab::Reasoning,
            ReviewTab::Reasoning => ReviewTab::Comparison,
        }
    }
}

/// Derived key metrics for the selected recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub id: String,
    pub provider: String,
    pub recommended: bool,
    pub annual_premium: u32,
    /// Current premium minus this one; negative when it costs more.
    pub annual_savings: i64,
    pub monthly_savings_percent: u8,
    pub rating: f64,
    /// Whole stars, 0-5.
    pub stars: u8,
    pub coverage_score: u8,
    pub features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub risk_level: RiskLevel,
    pub processing_time: String,
}

pub struct ReviewPage {
    catalog: SharedCatalog,
    selected: Recommendation,
    show_alternatives: bool,
    tab: ReviewTab,
}

impl ReviewPage {
    /// Mount with the catalogue's recommended entry selected.
    pub fn mount(catalog: SharedCatalog) -> Result<Self> {
        let selected = catalog
            .recommended()
            .cloned()
            .ok_or_else(|| DelegateError::InvalidCatalog("no recommended entry".to_string()))?;
        Ok(Self {
            catalog,
            selected,
            show_alternatives: false,
            tab: ReviewTab::default(),
        })
    }

    pub fn selected_id(&self) -> &str {
        &self.selected.id
    }

    pub fn selected(&self) -> &Recommendation {
        &self.selected
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        let found = self
            .catalog
            .recommendation(id)
            .ok_or_else(|| DelegateError::UnknownRecommendation(id.to_string()))?;
        debug!(id, "recommendation selected");
        self.selected = found.clone();
        Ok(())
    }

    pub fn summary(&self) -> ReviewSummary {
        let r = self.selected();
        ReviewSummary {
            id: r.id.clone(),
            provider: r.provider.clone(),
            recommended: r.recommended,
            annual_premium: r.annual_premium,
            annual_savings: i64::from(self.catalog.current_annual_premium()) - i64::from(r.annual_premium),
            monthly_savings_percent: r.monthly_savings,
            rating: r.rating,
            stars: r.rating.clamp(0.0, 5.0).floor() as u8,
            coverage_score: r.coverage_score,
            features: r.features.clone(),
            pros: r.pros.clone(),
            cons: r.cons.clone(),
            risk_level: r.risk_level,
            processing_time: r.processing_time.clone(),
        }
    }

    pub fn tab(&self) -> ReviewTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ReviewTab) {
        self.tab = tab;
    }

    pub fn comparison_rows(&self) -> &[ComparisonRow] {
        self.catalog.comparison_rows()
    }

    /// Reasoning for the current selection.
    pub fn reasoning(&self) -> &[String] {
        &self.selected().ai_reasoning
    }

    pub fn current_annual_premium(&self) -> u32 {
        self.catalog.current_annual_premium()
    }

    pub fn alternatives_visible(&self) -> bool {
        self.show_alternatives
    }

    /// Non-recommended entries, once revealed.
    pub fn alternatives(&self) -> Vec<&Recommendation> {
        if self.show_alternatives {
            self.catalog.alternatives()
        } else {
            Vec::new()
        }
    }

    /// Entries the user can currently pick from, in display order.
    pub fn selectable(&self) -> Vec<&Recommendation> {
        let mut out: Vec<&Recommendation> = self.catalog.recommended().into_iter().collect();
        out.extend(self.alternatives());
        out
    }

    pub fn explore_alternatives(&mut self) -> Notification {
        self.show_alternatives = true;
        Notification::info(
            "Exploring Alternatives",
            "AI is searching for additional options based on your feedback.",
        )
    }

    pub fn approve(&self) -> Notification {
        Notification::success(
            "Policy Approved!",
            format!(
                "Processing your {} policy application. You'll receive confirmation shortly.",
                self.selected().provider
            ),
        )
    }

    pub fn export(&self) -> Notification {
        Notification::info(
            "Report Downloaded",
            "Comprehensive analysis report has been saved to your downloads.",
        )
    }

    pub fn share(&self) -> Notification {
        Notification::info(
            "Share Link Copied",
            format!("A link to the {} analysis is ready to share.", self.selected().provider),
        )
    }

    pub fn print(&self) -> Notification {
        Notification::info("Preparing Print", "Your report is being formatted for printing.")
    }

    /// "Reject & Start Over".
    pub fn reject(&self) -> (Notification, Route) {
        (
            Notification::info("Starting Over", "Define a new goal to delegate another task."),
            Route::Goal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use std::sync::Arc;

    fn mounted() -> (Arc<StaticCatalog>, ReviewPage) {
        let catalog = Arc::new(StaticCatalog::demo());
        let page = ReviewPage::mount(catalog.clone()).unwrap();
        (catalog, page)
    }

    #[test]
    fn defaults_to_recommended() {
        let (_, p) = mounted();
        let s = p.summary();
        assert_eq!(s.id, "allstate");
        assert_eq!(s.annual_premium, 695);
        assert_eq!(s.annual_savings, 505);
        assert_eq!(s.stars, 4);
        assert_eq!(p.tab(), ReviewTab::Comparison);
    }

    #[test]
    fn selecting_switches_every_display_and_back() {
        let (catalog, mut p) = mounted();
        let original = p.summary();
        let original_reasoning = p.reasoning().to_vec();

        p.select("geico").unwrap();
        let s = p.summary();
        let geico = catalog.recommendation("geico").unwrap();
        assert_eq!(s.provider, "Geico");
        assert_eq!(s.annual_premium, geico.annual_premium);
        assert_eq!(s.monthly_savings_percent, geico.monthly_savings);
        assert_eq!(s.features, geico.features);
        assert_eq!(s.pros, geico.pros);
        assert_eq!(s.cons, geico.cons);
        assert_eq!(p.reasoning(), geico.ai_reasoning.as_slice());

        p.select("allstate").unwrap();
        assert_eq!(p.summary(), original);
        assert_eq!(p.reasoning(), original_reasoning.as_slice());
        assert_eq!(catalog.data(), &crate::fixtures::demo_catalog());
    }

    #[test]
    fn unknown_selection_keeps_current() {
        let (_, mut p) = mounted();
        assert_eq!(
            p.select("statefarm"),
            Err(DelegateError::UnknownRecommendation("statefarm".to_string()))
        );
        assert_eq!(p.selected_id(), "allstate");
    }

    #[test]
    fn alternatives_hidden_until_explored() {
        let (_, mut p) = mounted();
        assert!(p.alternatives().is_empty());
        assert_eq!(p.selectable().len(), 1);

        let n = p.explore_alternatives();
        assert_eq!(n.title, "Exploring Alternatives");
        let ids: Vec<&str> = p.alternatives().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["progressive", "geico"]);
        assert_eq!(p.selectable().len(), 3);
    }

    #[test]
    fn actions_only_notify() {
        let (catalog, mut p) = mounted();
        p.select("progressive").unwrap();
        assert!(p.approve().description.contains("Progressive"));
        assert_eq!(p.export().title, "Report Downloaded");
        assert!(p.share().description.contains("Progressive"));
        assert_eq!(p.print().title, "Preparing Print");
        assert_eq!(p.reject().1, Route::Goal);
        assert_eq!(catalog.data(), &crate::fixtures::demo_catalog());
    }

    #[test]
    fn mount_needs_a_recommended_entry() {
        let mut data = crate::fixtures::demo_catalog();
        for r in &mut data.recommendations {
            r.recommended = false;
        }
        let catalog = Arc::new(StaticCatalog::unchecked(data));
        assert!(matches!(
            ReviewPage::mount(catalog),
            Err(DelegateError::InvalidCatalog(_))
        ));

        let mut data = crate::fixtures::demo_catalog();
        data.recommendations.clear();
        assert!(ReviewPage::mount(Arc::new(StaticCatalog::unchecked(data))).is_err());
    }

    #[test]
    fn selection_holds_the_chosen_entry() {
        let (catalog, mut p) = mounted();
        p.select("geico").unwrap();
        assert_eq!(p.selected(), catalog.recommendation("geico").unwrap());
        assert_eq!(p.selected_id(), "geico");
    }

    #[test]
    fn tab_toggles() {
        let (_, mut p) = mounted();
        p.set_tab(p.tab().toggle());
        assert_eq!(p.tab(), ReviewTab::Reasoning);
    }
}
