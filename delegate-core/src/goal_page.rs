//! Goal & constraint entry page state.
//!
//! The "AI interpretation" is template substitution of the goal text and
//! the constraint list; nothing here analyses anything.

use std::time::Duration;
use tracing::{debug, warn};

use crate::catalog::{suggest_tasks, Catalog, SharedCatalog};
use crate::error::{DelegateError, Result};
use crate::model::{ConstraintInstance, Task};
use crate::notify::Notification;
use crate::router::{Redirect, Route};

/// Upload size limit (10 MB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "png", "jpg", "jpeg", "gif", "webp",
];

/// Delay between "Task Initiated" and the jump to monitoring.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub size_bytes: u64,
}

/// The "Ready to Start?" checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checklist {
    pub goal_defined: bool,
    pub constraint_count: usize,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Redirect {
        notification: Notification,
        redirect: Redirect,
    },
    Rejected {
        notification: Notification,
        error: DelegateError,
    },
}

impl StartOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            StartOutcome::Redirect { notification, .. } => notification,
            StartOutcome::Rejected { notification, .. } => notification,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            StartOutcome::Redirect { redirect, .. } => Some(*redirect),
            StartOutcome::Rejected { .. } => None,
        }
    }
}

pub struct GoalPage {
    catalog: SharedCatalog,
    goal: String,
    constraints: Vec<ConstraintInstance>,
    documents: Vec<UploadedDocument>,
    interpretation: Option<String>,
    confirmed: bool,
    next_constraint_id: u64,
    redirect_delay: Duration,
}

impl GoalPage {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            goal: String::new(),
            constraints: Vec::new(),
            documents: Vec::new(),
            interpretation: None,
            confirmed: false,
            next_constraint_id: 1,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
    }

    pub fn constraints(&self) -> &[ConstraintInstance] {
        &self.constraints
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    pub fn interpretation(&self) -> Option<&str> {
        self.interpretation.as_deref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    fn goal_defined(&self) -> bool {
        !self.goal.trim().is_empty()
    }

    /// Goal entered and interpretation explicitly confirmed.
    pub fn is_ready(&self) -> bool {
        self.goal_defined() && self.confirmed
    }

    pub fn checklist(&self) -> Checklist {
        Checklist {
            goal_defined: self.goal_defined(),
            constraint_count: self.constraints.len(),
            confirmed: self.confirmed,
        }
    }

    /// Human label for a constraint's type, falling back to the raw id.
    pub fn constraint_label<'a>(&'a self, c: &'a ConstraintInstance) -> &'a str {
        self.catalog
            .constraint_type(&c.type_id)
            .map(|t| t.label.as_str())
            .unwrap_or(c.type_id.as_str())
    }

    pub fn add_constraint(&mut self, type_id: &str, value: &str) -> Result<u64> {
        let type_id = type_id.trim();
        if self.catalog.constraint_type(type_id).is_none() {
            warn!(type_id, "rejected constraint with unknown type");
            return Err(DelegateError::UnknownConstraintType(type_id.to_string()));
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(DelegateError::EmptyConstraintValue);
        }

        let id = self.next_constraint_id;
        self.next_constraint_id += 1;
        self.constraints.push(ConstraintInstance {
            id,
            type_id: type_id.to_string(),
            value: value.to_string(),
        });
        debug!(id, type_id, "constraint added");
        Ok(id)
    }

    pub fn remove_constraint(&mut self, id: u64) -> Result<ConstraintInstance> {
        let pos = self
            .constraints
            .iter()
            .position(|c| c.id == id)
            .ok_or(DelegateError::ConstraintNotFound(id))?;
        Ok(self.constraints.remove(pos))
    }

    /// Attach a supporting document (name and size only; contents are never read).
    pub fn add_document(&mut self, name: &str, size_bytes: u64) -> Result<()> {
        let name = name.trim();
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            return Err(DelegateError::UnsupportedDocument(name.to_string()));
        }
        if size_bytes > MAX_DOCUMENT_BYTES {
            return Err(DelegateError::DocumentTooLarge {
                name: name.to_string(),
                size_bytes,
                limit_bytes: MAX_DOCUMENT_BYTES,
            });
        }

        // Re-uploading a file replaces the earlier entry.
        self.documents.retain(|d| d.name != name);
        self.documents.push(UploadedDocument {
            name: name.to_string(),
            size_bytes,
        });
        Ok(())
    }

    pub fn remove_document(&mut self, name: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.name != name);
        self.documents.len() != before
    }

    /// Demo task templates that match the current goal text.
    pub fn suggestions(&self) -> Vec<Task> {
        suggest_tasks(self.catalog.as_ref(), &self.goal)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Replace the goal with a template's title.
    pub fn apply_template(&mut self, task_id: &str) -> Result<()> {
        let task = self
            .catalog
            .task(task_id)
            .ok_or_else(|| DelegateError::UnknownTask(task_id.to_string()))?;
        self.goal = task.title.clone();
        Ok(())
    }

    /// Build (or rebuild) the interpretation from the current inputs.
    ///
    /// Returns `None` when there is no goal. Constraint edits made after
    /// generating only show up after regenerating.
    pub fn generate_interpretation(&mut self) -> Option<&str> {
        if !self.goal_defined() {
            return None;
        }
        let text = self.render_interpretation();
        self.interpretation = Some(text);
        self.interpretation.as_deref()
    }

    fn render_interpretation(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("I understand your goal: \"{}\".\n\n", self.goal.trim()));

        if self.constraints.is_empty() {
            s.push_str("No constraints specified, so I will use sensible defaults.\n\n");
        } else {
            s.push_str("Based on your constraints:\n");
            for c in &self.constraints {
                s.push_str(&format!("• {}: {}\n", self.constraint_label(c), c.value));
            }
            s.push('\n');
        }

        if !self.documents.is_empty() {
            let names: Vec<&str> = self.documents.iter().map(|d| d.name.as_str()).collect();
            s.push_str(&format!("Supporting documents: {}\n\n", names.join(", ")));
        }

        s.push_str("I will:\n");
        s.push_str("1. Search for options that meet your budget requirements\n");
        s.push_str("2. Exclude any companies you've specified\n");
        s.push_str("3. Ensure all required features are included\n");
        s.push_str("4. Present you with 3-5 top recommendations with detailed comparisons\n\n");
        s.push_str("I'll need approximately 5-10 minutes to complete this analysis.");
        s
    }

    /// Flip the confirmation. Does nothing until an interpretation exists.
    pub fn toggle_confirmed(&mut self) -> bool {
        if self.interpretation.is_some() {
            self.confirmed = !self.confirmed;
        }
        self.confirmed
    }

    /// "Start AI Delegation". Nothing is submitted anywhere.
    pub fn start(&self) -> StartOutcome {
        if !self.goal_defined() {
            warn!("start rejected: no goal");
            return StartOutcome::Rejected {
                notification: Notification::destructive(
                    "Goal Required",
                    "Please enter your high-level goal before proceeding.",
                ),
                error: DelegateError::GoalRequired,
            };
        }
        if !self.confirmed {
            warn!("start rejected: interpretation not confirmed");
            return StartOutcome::Rejected {
                notification: Notification::destructive(
                    "Confirmation Required",
                    "Please review and confirm the AI interpretation before starting.",
                ),
                error: DelegateError::InterpretationNotConfirmed,
            };
        }

        debug!(constraints = self.constraints.len(), "task initiated");
        StartOutcome::Redirect {
            notification: Notification::success(
                "Task Initiated",
                "Your AI agent has started working on your task. You'll be redirected to monitoring.",
            ),
            redirect: Redirect {
                to: Route::Monitoring,
                after: self.redirect_delay,
            },
        }
    }

    /// Integrations are placeholders: the record never changes.
    pub fn connect_integration(&self, id: &str) -> Result<Notification> {
        let integration = self
            .catalog
            .integration(id)
            .ok_or_else(|| DelegateError::UnknownIntegration(id.to_string()))?;
        Ok(Notification::info(
            "Integration Unavailable",
            format!("Connecting {} is not available in the demo.", integration.name),
        ))
    }
}
