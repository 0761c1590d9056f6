//! Progress simulator for the live monitoring page.
//!
//! A finite-state machine advanced one tick at a time by an external tick
//! source (see `crate::clock`). It never fails: events that do not apply to
//! the current phase are ignored and return `None`.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DelegateError, Result};

pub const COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimPhase {
    Idle,
    Running,
    Paused,
    AwaitingApproval,
    Completed,
}

/// Fixed simulator constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub initial_progress: u8,
    pub step: u8,
    /// Progress at which the one-shot approval gate fires.
    pub approval_threshold: u8,
    /// Progress cap until the user approves.
    pub approval_ceiling: u8,
    #[serde(with = "millis")]
    pub tick_interval: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_progress: 35,
            step: 1,
            approval_threshold: 60,
            approval_ceiling: 75,
            tick_interval: Duration::from_secs(2),
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(DelegateError::InvalidSimulatorConfig(msg));
        if self.step == 0 {
            return bad("step must be at least 1".to_string());
        }
        if self.tick_interval.is_zero() {
            return bad("tick interval must be non-zero".to_string());
        }
        if self.initial_progress >= self.approval_threshold {
            return bad(format!(
                "initial progress {} must be below the approval threshold {}",
                self.initial_progress, self.approval_threshold
            ));
        }
        if self.approval_threshold > self.approval_ceiling || self.approval_ceiling >= COMPLETE {
            return bad(format!(
                "expected threshold <= ceiling < 100, got {} / {}",
                self.approval_threshold, self.approval_ceiling
            ));
        }
        if (self.approval_threshold - self.initial_progress) % self.step != 0 {
            return bad(format!(
                "a step of {} never lands exactly on the threshold {} from {}",
                self.step, self.approval_threshold, self.initial_progress
            ));
        }
        Ok(())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

/// Observable outcome of a simulator transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Started,
    Resumed,
    Paused,
    Advanced { progress: u8 },
    ApprovalRequired { progress: u8 },
    Approved,
    ChangesRequested,
    Completed,
}

/// Snapshot consumed by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub progress: u8,
    pub running: bool,
    pub approval_needed: bool,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    phase: SimPhase,
    progress: u8,
    approved: bool,
    gate_fired: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Build an idle simulator. Callers validate `config` first when it
    /// comes from user input.
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            phase: SimPhase::Idle,
            progress: config.initial_progress,
            approved: false,
            gate_fired: false,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            progress: self.progress,
            running: self.phase == SimPhase::Running,
            approval_needed: self.phase == SimPhase::AwaitingApproval,
        }
    }

    /// Current cap on progress.
    pub fn ceiling(&self) -> u8 {
        if self.approved {
            COMPLETE
        } else {
            self.config.approval_ceiling
        }
    }

    /// Whole minutes left, at the demo's nominal ten percent per minute.
    pub fn estimated_minutes_remaining(&self) -> u8 {
        (COMPLETE - self.progress).div_ceil(10)
    }

    /// Idle -> Running.
    pub fn start(&mut self) -> Option<SimEvent> {
        if self.phase != SimPhase::Idle {
            return None;
        }
        self.phase = SimPhase::Running;
        debug!(progress = self.progress, "simulator started");
        Some(SimEvent::Started)
    }

    /// Paused (or Idle) -> Running.
    pub fn resume(&mut self) -> Option<SimEvent> {
        match self.phase {
            SimPhase::Idle => self.start(),
            SimPhase::Paused => {
                self.phase = SimPhase::Running;
                debug!(progress = self.progress, "simulator resumed");
                Some(SimEvent::Resumed)
            }
            _ => None,
        }
    }

    /// Running -> Paused. Pausing a paused simulator is a no-op.
    pub fn pause(&mut self) -> Option<SimEvent> {
        if self.phase != SimPhase::Running {
            return None;
        }
        self.phase = SimPhase::Paused;
        debug!(progress = self.progress, "simulator paused");
        Some(SimEvent::Paused)
    }

    /// AwaitingApproval -> Running, lifting the pre-approval ceiling.
    pub fn approve(&mut self) -> Option<SimEvent> {
        if self.phase != SimPhase::AwaitingApproval {
            return None;
        }
        self.approved = true;
        self.phase = SimPhase::Running;
        info!(progress = self.progress, "approval granted");
        Some(SimEvent::Approved)
    }

    /// AwaitingApproval -> Paused. The ceiling stays in place.
    pub fn request_changes(&mut self) -> Option<SimEvent> {
        if self.phase != SimPhase::AwaitingApproval {
            return None;
        }
        self.phase = SimPhase::Paused;
        info!(progress = self.progress, "changes requested");
        Some(SimEvent::ChangesRequested)
    }

    /// Advance one tick. Only a running simulator moves; it stalls silently
    /// at the ceiling until approval.
    pub fn tick(&mut self) -> Option<SimEvent> {
        if self.phase != SimPhase::Running {
            return None;
        }

        let next = self.progress.saturating_add(self.config.step).min(self.ceiling());
        if next == self.progress {
            return None;
        }
        self.progress = next;

        if !self.gate_fired && self.progress == self.config.approval_threshold {
            self.gate_fired = true;
            self.phase = SimPhase::AwaitingApproval;
            info!(progress = self.progress, "approval required");
            return Some(SimEvent::ApprovalRequired {
                progress: self.progress,
            });
        }

        if self.progress >= COMPLETE {
            self.phase = SimPhase::Completed;
            info!("simulation completed");
            return Some(SimEvent::Completed);
        }

        Some(SimEvent::Advanced {
            progress: self.progress,
        })
    }

    /// Apply `n` ticks, collecting the events they produced.
    pub fn run_ticks(&mut self, n: u32) -> Vec<SimEvent> {
        (0..n).filter_map(|_| self.tick()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> Simulator {
        let mut s = Simulator::default();
        s.start();
        s
    }

    #[test]
    fn starts_idle_at_initial_progress() {
        let s = Simulator::default();
        assert_eq!(s.phase(), SimPhase::Idle);
        assert_eq!(s.progress(), 35);
        assert!(!s.state().running);
    }

    #[test]
    fn idle_and_paused_do_not_advance() {
        let mut s = Simulator::default();
        assert_eq!(s.run_ticks(10), vec![]);
        assert_eq!(s.progress(), 35);

        s.start();
        s.tick();
        s.pause();
        assert!(s.run_ticks(50).is_empty());
        assert_eq!(s.progress(), 36);
    }

    #[test]
    fn progress_is_monotonic_while_running() {
        let mut s = running();
        let mut last = s.progress();
        for _ in 0..200 {
            s.tick();
            assert!(s.progress() >= last);
            last = s.progress();
        }
    }

    #[test]
    fn gate_fires_exactly_once_at_threshold() {
        let mut s = running();
        let events = s.run_ticks(100);
        let gates: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SimEvent::ApprovalRequired { .. }))
            .collect();
        assert_eq!(gates, vec![&SimEvent::ApprovalRequired { progress: 60 }]);
        assert_eq!(s.phase(), SimPhase::AwaitingApproval);
        assert_eq!(s.progress(), 60);
        assert!(s.state().approval_needed);
        assert!(!s.state().running);

        // Resume after requesting changes: climbs past 60 without re-firing.
        s.request_changes();
        s.resume();
        let events = s.run_ticks(100);
        assert!(!events.iter().any(|e| matches!(e, SimEvent::ApprovalRequired { .. })));
    }

    #[test]
    fn never_exceeds_ceiling_before_approval() {
        let mut s = running();
        s.run_ticks(100);
        assert_eq!(s.request_changes(), Some(SimEvent::ChangesRequested));
        assert_eq!(s.phase(), SimPhase::Paused);
        s.resume();
        s.run_ticks(1_000);
        assert_eq!(s.progress(), 75);
        assert_eq!(s.phase(), SimPhase::Running);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn approval_lifts_ceiling_and_completes() {
        let mut s = running();
        s.run_ticks(25);
        assert_eq!(s.progress(), 60);
        assert_eq!(s.approve(), Some(SimEvent::Approved));

        let events = s.run_ticks(40);
        assert_eq!(events.last(), Some(&SimEvent::Completed));
        assert_eq!(s.progress(), 100);
        assert_eq!(s.phase(), SimPhase::Completed);

        assert!(s.run_ticks(10).is_empty());
        assert_eq!(s.progress(), 100);
        assert_eq!(s.resume(), None);
        assert_eq!(s.pause(), None);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut s = running();
        assert_eq!(s.pause(), Some(SimEvent::Paused));
        assert_eq!(s.pause(), None);
        assert_eq!(s.phase(), SimPhase::Paused);
    }

    #[test]
    fn decisions_only_apply_at_the_gate() {
        let mut s = running();
        assert_eq!(s.approve(), None);
        assert_eq!(s.request_changes(), None);
        assert!(!s.is_approved());
        assert_eq!(s.ceiling(), 75);
    }

    #[test]
    fn resume_cannot_bypass_the_gate() {
        let mut s = running();
        s.run_ticks(25);
        assert_eq!(s.resume(), None);
        assert_eq!(s.phase(), SimPhase::AwaitingApproval);
    }

    #[test]
    fn estimated_minutes_rounds_up() {
        let mut s = running();
        assert_eq!(s.estimated_minutes_remaining(), 7);
        s.tick();
        assert_eq!(s.estimated_minutes_remaining(), 7);
    }

    #[test]
    fn config_validation() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let mut c = SimulatorConfig::default();
        c.step = 0;
        assert!(c.validate().is_err());

        let mut c = SimulatorConfig::default();
        c.approval_ceiling = 50;
        assert!(c.validate().is_err());

        let mut c = SimulatorConfig::default();
        c.step = 2;
        assert!(c.validate().is_err(), "35 + 2k never equals 60");

        let mut c = SimulatorConfig::default();
        c.step = 5;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn ceiling_must_stay_below_completion() {
        let c = SimulatorConfig {
            approval_ceiling: COMPLETE,
            ..SimulatorConfig::default()
        };
        assert!(matches!(c.validate(), Err(DelegateError::InvalidSimulatorConfig(_))));

        let c = SimulatorConfig {
            approval_threshold: COMPLETE,
            approval_ceiling: COMPLETE,
            ..SimulatorConfig::default()
        };
        assert!(matches!(c.validate(), Err(DelegateError::InvalidSimulatorConfig(_))));

        let c = SimulatorConfig {
            approval_threshold: 99,
            approval_ceiling: 99,
            initial_progress: 98,
            ..SimulatorConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn highest_valid_gate_holds_until_approved() {
        let c = SimulatorConfig {
            initial_progress: 98,
            approval_threshold: 99,
            approval_ceiling: 99,
            ..SimulatorConfig::default()
        };
        c.validate().unwrap();
        let mut s = Simulator::new(c);
        s.start();

        assert_eq!(s.run_ticks(1), vec![SimEvent::ApprovalRequired { progress: 99 }]);
        s.request_changes();
        s.resume();
        assert!(s.run_ticks(100).is_empty());
        assert_eq!(s.progress(), 99);
        assert!(!s.is_approved());
        assert_ne!(s.phase(), SimPhase::Completed);

        let mut s = Simulator::new(c);
        s.start();
        s.run_ticks(1);
        s.approve();
        assert_eq!(s.run_ticks(1), vec![SimEvent::Completed]);
        assert_eq!(s.phase(), SimPhase::Completed);
    }

    #[test]
    fn config_serializes_interval_as_millis() {
        let v = serde_json::to_value(SimulatorConfig::default()).unwrap();
        assert_eq!(v["tick_interval"], 2000);
    }
}
