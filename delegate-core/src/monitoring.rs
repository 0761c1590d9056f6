//! Live monitoring page state: the simulator plus the approval panel.

use tracing::debug;

use crate::catalog::{Catalog, SharedCatalog};
use crate::model::{ActivityLogEntry, Metric, ProgressStep, ReasoningEntry};
use crate::notify::Notification;
use crate::simulator::{SimEvent, SimPhase, SimulationState, Simulator, SimulatorConfig};

/// A canned option offered at the approval gate. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalChoice {
    pub provider: &'static str,
    pub annual_premium: u32,
    pub savings_percent: u8,
    pub coverage: &'static str,
}

pub const APPROVAL_CHOICES: [ApprovalChoice; 3] = [
    ApprovalChoice {
        provider: "Progressive",
        annual_premium: 780,
        savings_percent: 35,
        coverage: "excellent coverage",
    },
    ApprovalChoice {
        provider: "Geico",
        annual_premium: 720,
        savings_percent: 40,
        coverage: "good coverage",
    },
    ApprovalChoice {
        provider: "Allstate",
        annual_premium: 695,
        savings_percent: 42,
        coverage: "premium coverage",
    },
];

pub const APPROVAL_PROMPT: &str = "The AI found 3 insurance policies that meet your criteria with \
30-45% cost savings. Please select your preferred option to continue:";

pub struct MonitoringPage {
    catalog: SharedCatalog,
    simulator: Simulator,
    selected_choice: Option<usize>,
}

impl MonitoringPage {
    /// Mount the page; the simulator starts immediately.
    pub fn mount(catalog: SharedCatalog, config: SimulatorConfig) -> Self {
        let mut simulator = Simulator::new(config);
        simulator.start();
        Self {
            catalog,
            simulator,
            selected_choice: None,
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn state(&self) -> SimulationState {
        self.simulator.state()
    }

    pub fn activity_log(&self) -> &[ActivityLogEntry] {
        self.catalog.activity_log()
    }

    pub fn reasoning_log(&self) -> &[ReasoningEntry] {
        self.catalog.reasoning_log()
    }

    pub fn steps(&self) -> &[ProgressStep] {
        self.catalog.steps()
    }

    pub fn metrics(&self) -> &[Metric] {
        self.catalog.metrics()
    }

    /// Choices to show, only while the gate is open.
    pub fn approval_choices(&self) -> Option<&'static [ApprovalChoice]> {
        (self.simulator.phase() == SimPhase::AwaitingApproval).then_some(&APPROVAL_CHOICES[..])
    }

    pub fn selected_choice(&self) -> Option<&'static ApprovalChoice> {
        self.selected_choice.map(|i| &APPROVAL_CHOICES[i])
    }

    /// Highlight a choice. Ignored unless the gate is open and `index` exists.
    pub fn select_choice(&mut self, index: usize) -> bool {
        if self.approval_choices().is_none() || index >= APPROVAL_CHOICES.len() {
            return false;
        }
        self.selected_choice = Some(index);
        true
    }

    /// Advance `n` ticks, reporting anything worth a notification.
    pub fn on_ticks(&mut self, n: u32) -> Vec<Notification> {
        self.simulator
            .run_ticks(n)
            .into_iter()
            .filter_map(|ev| match ev {
                SimEvent::ApprovalRequired { .. } => Some(Notification::info(
                    "Approval Required",
                    "AI found multiple options and needs your input to proceed.",
                )),
                SimEvent::Completed => Some(Notification::success(
                    "Task Completed",
                    "AI agent has finished. Your recommendations are ready for review.",
                )),
                _ => None,
            })
            .collect()
    }

    /// "Approve Selection". The choice is not carried anywhere.
    pub fn approve(&mut self) -> Option<Notification> {
        self.simulator.approve()?;
        debug!(choice = ?self.selected_choice(), "approval panel approved");
        self.selected_choice = None;
        Some(Notification::success(
            "Processing Continued",
            "AI agent is proceeding with your approved selection.",
        ))
    }

    /// "Request Changes": clears the gate and leaves the run paused.
    pub fn request_changes(&mut self) -> Option<Notification> {
        self.simulator.request_changes()?;
        self.selected_choice = None;
        Some(Notification::info(
            "Changes Requested",
            "AI processing is paused. Resume when you're ready.",
        ))
    }

    /// The Pause/Resume button.
    pub fn toggle_running(&mut self) -> Option<Notification> {
        match self.simulator.phase() {
            SimPhase::Running => {
                self.simulator.pause()?;
                Some(Notification::info("Monitoring Paused", "AI processing has been paused."))
            }
            SimPhase::Paused | SimPhase::Idle => {
                self.simulator.resume()?;
                Some(Notification::info("Monitoring Resumed", "AI processing has resumed."))
            }
            SimPhase::AwaitingApproval | SimPhase::Completed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use std::sync::Arc;

    fn mounted() -> MonitoringPage {
        MonitoringPage::mount(Arc::new(StaticCatalog::demo()), SimulatorConfig::default())
    }

    #[test]
    fn mount_starts_the_simulator() {
        let p = mounted();
        assert!(p.state().running);
        assert_eq!(p.state().progress, 35);
        assert!(p.approval_choices().is_none());
        assert_eq!(p.activity_log().len(), 4);
        assert_eq!(p.reasoning_log().len(), 3);
    }

    #[test]
    fn gate_raises_one_notification_and_offers_choices() {
        let mut p = mounted();
        let notes = p.on_ticks(60);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Approval Required");
        assert_eq!(p.approval_choices().map(|c| c.len()), Some(3));
        assert!(p.toggle_running().is_none(), "gate needs an explicit decision");
    }

    #[test]
    fn approving_resumes_to_completion() {
        let mut p = mounted();
        p.on_ticks(25);
        assert!(p.select_choice(2));
        assert_eq!(p.selected_choice().map(|c| c.provider), Some("Allstate"));
        assert_eq!(p.approve().map(|n| n.title), Some("Processing Continued".to_string()));
        assert!(p.selected_choice().is_none());

        let notes = p.on_ticks(40);
        assert_eq!(notes.last().map(|n| n.title.as_str()), Some("Task Completed"));
        assert_eq!(p.state().progress, 100);
    }

    #[test]
    fn request_changes_pauses_and_resume_caps_at_ceiling() {
        let mut p = mounted();
        p.on_ticks(25);
        assert!(p.request_changes().is_some());
        assert!(!p.state().running);
        assert!(!p.state().approval_needed);

        assert_eq!(p.toggle_running().map(|n| n.title), Some("Monitoring Resumed".to_string()));
        p.on_ticks(500);
        assert_eq!(p.state().progress, 75);
    }

    #[test]
    fn selecting_outside_the_gate_is_ignored() {
        let mut p = mounted();
        assert!(!p.select_choice(0));
        p.on_ticks(25);
        assert!(!p.select_choice(3));
        assert!(p.select_choice(0));
    }

    #[test]
    fn pause_freezes_progress() {
        let mut p = mounted();
        assert_eq!(p.toggle_running().map(|n| n.title), Some("Monitoring Paused".to_string()));
        p.on_ticks(10);
        assert_eq!(p.state().progress, 35);
    }
}
