//! delegate-core: page state, mock catalogue and progress simulator for the Delegate dashboard

pub mod catalog;
pub mod clock;
pub mod error;
pub mod fixtures;
pub mod goal_page;
pub mod model;
pub mod monitoring;
pub mod notify;
pub mod review;
pub mod router;
pub mod simulator;

pub use catalog::{suggest_tasks, Catalog, CatalogData, SharedCatalog, StaticCatalog, TaskFilter};
pub use clock::{Clock, ManualClock, SystemClock, Ticker};
pub use error::{DelegateError, Result};
pub use goal_page::{Checklist, GoalPage, StartOutcome, UploadedDocument, MAX_DOCUMENT_BYTES};
pub use model::{
    ActivityLogEntry, ActivityStatus, Complexity, ComparisonRow, ConstraintInstance,
    ConstraintType, Integration, IntegrationCategory, Metric, MetricValue, ProgressStep,
    ReasoningEntry, Recommendation, RiskLevel, Task, TaskCategory,
};
pub use monitoring::{ApprovalChoice, MonitoringPage, APPROVAL_CHOICES};
pub use notify::{Notification, Notifications, Shown, Variant};
pub use review::{ReviewPage, ReviewSummary, ReviewTab};
pub use router::{Dashboard, DashboardSettings, Page, Redirect, Route};
pub use simulator::{SimEvent, SimPhase, SimulationState, Simulator, SimulatorConfig};
