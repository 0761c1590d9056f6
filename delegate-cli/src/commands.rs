//! Non-interactive subcommands.

use anyhow::{bail, Context, Result};
use delegate_catalog::{check_catalog, export_demo, FileCatalog};
use delegate_core::{
    Catalog, GoalPage, ReviewPage, SharedCatalog, SimEvent, SimPhase, Simulator, SimulatorConfig,
    StaticCatalog, TaskCategory, TaskFilter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;

/// What the headless simulation does when the approval gate opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Stop,
    Approve,
    RequestChanges,
}

/// The catalogue named on the command line, else the configured one, else the demo.
pub fn open_catalog(path: Option<&Path>, cfg: &Config) -> Result<SharedCatalog> {
    let path = path.or(cfg.dashboard.catalog.as_deref());
    let Some(path) = path else {
        return Ok(Arc::new(StaticCatalog::demo()));
    };
    let catalog = FileCatalog::load(path, cfg.dashboard.comparison_csv.as_deref())?;
    Ok(Arc::new(catalog))
}

pub fn list_tasks(catalog: &dyn Catalog, category: Option<&str>) -> Result<()> {
    let filter = match category {
        Some(c) => match TaskCategory::parse(c) {
            Some(cat) => TaskFilter::category(cat),
            None => bail!(
                "unknown category {c:?} (expected one of: {})",
                TaskCategory::ALL.map(|c| c.as_str()).join(", ")
            ),
        },
        None => TaskFilter::default(),
    };

    for t in catalog.tasks(&filter) {
        println!(
            "{:<14} {:<36} [{} | {:?} | {} | {}% success]",
            t.id, t.title, t.category, t.complexity, t.estimated_time, t.success_rate
        );
        println!("{:<14} {}", "", t.description);
    }
    Ok(())
}

fn parse_constraint(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .with_context(|| format!("constraint {raw:?} must look like type=value"))
}

pub fn interpret(
    catalog: SharedCatalog,
    goal: &str,
    constraints: &[String],
    documents: &[PathBuf],
) -> Result<()> {
    let mut page = GoalPage::new(catalog);
    page.set_goal(goal);
    for raw in constraints {
        let (type_id, value) = parse_constraint(raw)?;
        page.add_constraint(type_id, value)
            .with_context(|| format!("adding constraint {raw:?}"))?;
    }
    for doc in documents {
        let meta = std::fs::metadata(doc).with_context(|| format!("stat {}", doc.display()))?;
        let name = doc
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc.display().to_string());
        page.add_document(&name, meta.len())
            .with_context(|| format!("attaching {}", doc.display()))?;
    }

    let Some(text) = page.generate_interpretation() else {
        bail!("a goal is required");
    };
    println!("{text}\n");

    let suggestions = page.suggestions();
    if !suggestions.is_empty() {
        println!("Matching templates:");
        for t in &suggestions {
            println!("- {} ({})", t.title, t.id);
        }
        println!();
    }

    let c = page.checklist();
    let mark = |b: bool| if b { "x" } else { " " };
    println!("Ready to start?");
    println!("[{}] Goal defined", mark(c.goal_defined));
    println!("[{}] Constraints added ({})", mark(c.constraint_count > 0), c.constraint_count);
    println!("[{}] Interpretation confirmed", mark(c.confirmed));
    Ok(())
}

fn describe(ev: SimEvent) -> String {
    match ev {
        SimEvent::Started => "started".to_string(),
        SimEvent::Resumed => "resumed".to_string(),
        SimEvent::Paused => "paused".to_string(),
        SimEvent::Advanced { progress } => format!("progress {progress}%"),
        SimEvent::ApprovalRequired { progress } => format!("approval required at {progress}%"),
        SimEvent::Approved => "approved".to_string(),
        SimEvent::ChangesRequested => "changes requested; paused".to_string(),
        SimEvent::Completed => "completed".to_string(),
    }
}

/// Where a headless run stopped and every transition it went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRun {
    pub phase: SimPhase,
    pub progress: u8,
    pub events: Vec<SimEvent>,
}

impl SimRun {
    fn record(&mut self, ev: SimEvent) {
        println!("{}", describe(ev));
        self.events.push(ev);
    }

    fn finish(mut self, sim: &Simulator) -> Self {
        self.phase = sim.phase();
        self.progress = sim.progress();
        self
    }
}

/// Run the simulator on a real timer, printing each transition.
pub async fn simulate(config: SimulatorConfig, gate: GateAction) -> Result<SimRun> {
    config.validate().context("simulator config")?;
    let mut sim = Simulator::new(config);
    let mut run = SimRun {
        phase: sim.phase(),
        progress: sim.progress(),
        events: Vec::new(),
    };
    let mut interval = tokio::time::interval(config.tick_interval);
    // The first tick of a tokio interval fires immediately.
    interval.tick().await;

    if let Some(ev) = sim.start() {
        run.record(ev);
    }

    loop {
        interval.tick().await;
        let Some(ev) = sim.tick() else {
            continue;
        };
        run.record(ev);

        match ev {
            SimEvent::ApprovalRequired { .. } => {
                let decision = match gate {
                    GateAction::Approve => sim.approve(),
                    GateAction::RequestChanges => sim.request_changes(),
                    GateAction::Stop => {
                        println!("waiting for approval; rerun with --approve or --request-changes");
                        return Ok(run.finish(&sim));
                    }
                };
                if let Some(ev) = decision {
                    run.record(ev);
                }
                if sim.phase() == SimPhase::Paused {
                    return Ok(run.finish(&sim));
                }
            }
            SimEvent::Completed => {
                info!("simulation finished");
                return Ok(run.finish(&sim));
            }
            _ => {}
        }
    }
}

pub fn review(catalog: SharedCatalog, select: Option<&str>, alternatives: bool) -> Result<()> {
    let mut page = ReviewPage::mount(catalog).context("mounting review")?;
    if alternatives {
        page.explore_alternatives();
    }
    if let Some(id) = select {
        page.select(id).with_context(|| format!("selecting {id:?}"))?;
    }

    let s = page.summary();
    let badge = if s.recommended { " (AI recommended)" } else { "" };
    println!("{}{badge}", s.provider);
    println!(
        "  ${}/yr, saves ${}/yr vs current ${}, {}% monthly",
        s.annual_premium,
        s.annual_savings,
        page.current_annual_premium(),
        s.monthly_savings_percent
    );
    println!(
        "  rating {:.1} {}  coverage {}/100  risk {}  processed in {}",
        s.rating,
        "*".repeat(usize::from(s.stars)),
        s.coverage_score,
        s.risk_level.as_str(),
        s.processing_time
    );
    print_list("Features", &s.features);
    print_list("Pros", &s.pros);
    print_list("Cons", &s.cons);
    print_list("AI reasoning", page.reasoning());

    println!("\nComparison:");
    for row in page.comparison_rows() {
        println!(
            "  {:<22} {:<16} -> {:<16} {:?}/{:?}",
            row.feature, row.current, row.recommended, row.improvement, row.impact
        );
    }

    if page.alternatives_visible() {
        println!("\nAlternatives:");
        for r in page.alternatives() {
            println!("  {:<12} {:<12} ${}/yr", r.id, r.provider, r.annual_premium);
        }
    }
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!("\n{title}:");
    for i in items {
        println!("  - {i}");
    }
}

pub fn catalog_export() -> Result<()> {
    export_demo(std::io::stdout().lock())
}

pub fn catalog_check(path: &Path, comparison: Option<&Path>) -> Result<()> {
    let data = match comparison {
        Some(csv) => FileCatalog::load(path, Some(csv))?.data().clone(),
        None => check_catalog(path)?,
    };
    println!(
        "{}: ok ({} tasks, {} constraint types, {} recommendations, {} comparison rows)",
        path.display(),
        data.tasks.len(),
        data.constraint_types.len(),
        data.recommendations.len(),
        data.comparison.len()
    );
    Ok(())
}

pub fn interval_override(config: SimulatorConfig, interval_ms: Option<u64>) -> SimulatorConfig {
    match interval_ms {
        Some(ms) => SimulatorConfig {
            tick_interval: Duration::from_millis(ms),
            ..config
        },
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_arguments_split_on_first_equals() {
        assert_eq!(parse_constraint("budget=$150/month").unwrap(), ("budget", "$150/month"));
        assert_eq!(parse_constraint("quality=a=b").unwrap(), ("quality", "a=b"));
        assert!(parse_constraint("budget").is_err());
    }

    #[test]
    fn unknown_category_is_an_error() {
        let catalog = StaticCatalog::demo();
        assert!(list_tasks(&catalog, Some("gardening")).is_err());
        assert!(list_tasks(&catalog, Some("Travel")).is_ok());
    }

    #[test]
    fn catalog_defaults_to_demo() {
        let catalog = open_catalog(None, &Config::default()).unwrap();
        assert_eq!(catalog.all_tasks().len(), 5);
    }

    #[tokio::test]
    async fn headless_run_completes_when_approved() {
        let cfg = interval_override(SimulatorConfig::default(), Some(1));
        let run = simulate(cfg, GateAction::Approve).await.unwrap();
        assert_eq!(run.phase, SimPhase::Completed);
        assert_eq!(run.progress, 100);
        assert_eq!(run.events.first(), Some(&SimEvent::Started));
        assert!(run.events.contains(&SimEvent::ApprovalRequired { progress: 60 }));
        assert!(run.events.contains(&SimEvent::Approved));
        assert_eq!(run.events.last(), Some(&SimEvent::Completed));
    }

    #[tokio::test]
    async fn headless_run_stops_at_gate() {
        let cfg = interval_override(SimulatorConfig::default(), Some(1));
        let run = simulate(cfg, GateAction::Stop).await.unwrap();
        assert_eq!(run.phase, SimPhase::AwaitingApproval);
        assert_eq!(run.progress, 60);
        assert_eq!(run.events.last(), Some(&SimEvent::ApprovalRequired { progress: 60 }));
    }

    #[tokio::test]
    async fn requested_changes_leave_the_run_paused() {
        let cfg = interval_override(SimulatorConfig::default(), Some(1));
        let run = simulate(cfg, GateAction::RequestChanges).await.unwrap();
        assert_eq!(run.phase, SimPhase::Paused);
        assert_eq!(run.progress, 60);
        assert_eq!(run.events.last(), Some(&SimEvent::ChangesRequested));
        assert!(!run.events.contains(&SimEvent::Completed));
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let cfg = interval_override(SimulatorConfig::default(), Some(0));
        assert!(simulate(cfg, GateAction::Approve).await.is_err());
    }

    #[test]
    fn review_rejects_unknown_selection() {
        let catalog: SharedCatalog = Arc::new(StaticCatalog::demo());
        assert!(review(catalog.clone(), Some("geico"), true).is_ok());
        assert!(review(catalog, Some("statefarm"), false).is_err());
    }
}
