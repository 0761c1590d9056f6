//! Client-side routes and the dashboard shell that owns the mounted page.
//!
//! Exactly one page is mounted at a time. Navigating drops the old page's
//! state (constraints, simulator, selection) and builds the new one fresh.

use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::catalog::SharedCatalog;
use crate::error::Result;
use crate::goal_page::{GoalPage, StartOutcome, DEFAULT_REDIRECT_DELAY};
use crate::monitoring::MonitoringPage;
use crate::notify::{Notification, Notifications};
use crate::review::ReviewPage;
use crate::simulator::SimulatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Goal,
    Monitoring,
    Review,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Goal, Route::Monitoring, Route::Review];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Goal => "/",
            Route::Monitoring => "/monitoring",
            Route::Review => "/review",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let p = path.trim();
        let p = if p.len() > 1 { p.trim_end_matches('/') } else { p };
        Self::ALL.into_iter().find(|r| r.path() == p)
    }

    /// Navigation label.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Goal => "Task Delegation",
            Route::Monitoring => "Live Monitoring",
            Route::Review => "Final Review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Route::Goal => "Set goals and constraints",
            Route::Monitoring => "Track AI progress",
            Route::Review => "Approve decisions",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A navigation that should happen after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    pub simulator: SimulatorConfig,
    pub redirect_delay: Duration,
    pub notification_ttl: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            simulator: SimulatorConfig::default(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notification_ttl: Duration::from_secs(5),
        }
    }
}

pub enum Page {
    Goal(GoalPage),
    Monitoring(MonitoringPage),
    Review(ReviewPage),
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::Goal(_) => Route::Goal,
            Page::Monitoring(_) => Route::Monitoring,
            Page::Review(_) => Route::Review,
        }
    }
}

pub struct Dashboard {
    catalog: SharedCatalog,
    settings: DashboardSettings,
    page: Page,
    notifications: Notifications,
    pending: Option<(Route, Duration)>,
    now: Duration,
}

impl Dashboard {
    /// Open on the goal entry page.
    pub fn new(catalog: SharedCatalog, settings: DashboardSettings) -> Self {
        let page = Page::Goal(GoalPage::new(catalog.clone()).with_redirect_delay(settings.redirect_delay));
        Self {
            catalog,
            settings,
            page,
            notifications: Notifications::new(settings.notification_ttl, 3),
            pending: None,
            now: Duration::ZERO,
        }
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn pending_redirect(&self) -> Option<(Route, Duration)> {
        self.pending
    }

    pub fn notify(&mut self, notification: Notification) {
        debug!(title = %notification.title, "notification");
        self.notifications.push(notification, self.now);
    }

    /// Unmount the current page and mount `route`. Cancels any pending redirect.
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        let page = match route {
            Route::Goal => Page::Goal(
                GoalPage::new(self.catalog.clone()).with_redirect_delay(self.settings.redirect_delay),
            ),
            Route::Monitoring => Page::Monitoring(MonitoringPage::mount(
                self.catalog.clone(),
                self.settings.simulator,
            )),
            Route::Review => Page::Review(ReviewPage::mount(self.catalog.clone())?),
        };
        info!(from = %self.route(), to = %route, "navigate");
        self.page = page;
        self.pending = None;
        Ok(())
    }

    /// Run the goal page's start action, scheduling its redirect.
    pub fn start_task(&mut self) -> Option<StartOutcome> {
        let Page::Goal(goal) = &self.page else {
            return None;
        };
        let outcome = goal.start();
        if let Some(redirect) = outcome.redirect() {
            self.pending = Some((redirect.to, self.now + redirect.after));
        }
        self.notify(outcome.notification().clone());
        Some(outcome)
    }

    /// Deliver `n` timer ticks to the monitoring page, if mounted.
    pub fn tick(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        let Page::Monitoring(monitoring) = &mut self.page else {
            return;
        };
        let notes = monitoring.on_ticks(n);
        for note in notes {
            self.notify(note);
        }
    }

    /// Advance the shell's clock: expire notifications and fire a due redirect.
    pub fn poll(&mut self, now: Duration) -> Result<Option<Route>> {
        self.now = now;
        self.notifications.expire(now);
        match self.pending {
            Some((route, due)) if now >= due => {
                self.navigate(route)?;
                Ok(Some(route))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::clock::{Clock, ManualClock, Ticker};
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(StaticCatalog::demo()), DashboardSettings::default())
    }

    #[test]
    fn routes_round_trip_paths() {
        for r in Route::ALL {
            assert_eq!(Route::from_path(r.path()), Some(r));
        }
        assert_eq!(Route::from_path("/review/"), Some(Route::Review));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn start_redirects_after_delay() {
        let clock = ManualClock::new();
        let mut d = dashboard();
        if let Page::Goal(g) = d.page_mut() {
            g.set_goal("Find cheaper insurance");
            g.generate_interpretation();
            g.toggle_confirmed();
        }
        let outcome = d.start_task().unwrap();
        assert!(outcome.redirect().is_some());
        assert_eq!(d.notifications().latest().unwrap().notification.title, "Task Initiated");

        clock.advance(Duration::from_millis(1999));
        assert_eq!(d.poll(clock.elapsed()).unwrap(), None);
        assert_eq!(d.route(), Route::Goal);

        clock.advance(Duration::from_millis(1));
        assert_eq!(d.poll(clock.elapsed()).unwrap(), Some(Route::Monitoring));
        assert_eq!(d.route(), Route::Monitoring);
        assert!(d.pending_redirect().is_none());
    }

    #[test]
    fn rejected_start_stays_put() {
        let mut d = dashboard();
        let outcome = d.start_task().unwrap();
        assert!(outcome.redirect().is_none());
        assert!(d.pending_redirect().is_none());
        assert_eq!(d.notifications().latest().unwrap().notification.title, "Goal Required");
    }

    #[test]
    fn navigation_discards_page_state() {
        let mut d = dashboard();
        if let Page::Goal(g) = d.page_mut() {
            g.set_goal("something");
            g.add_constraint("budget", "$100").unwrap();
        }
        d.navigate(Route::Review).unwrap();
        d.navigate(Route::Goal).unwrap();
        let Page::Goal(g) = d.page() else {
            panic!("expected goal page");
        };
        assert_eq!(g.goal(), "");
        assert!(g.constraints().is_empty());
    }

    #[test]
    fn ticker_drives_monitoring_through_the_gate() {
        let clock = ManualClock::new();
        let mut d = dashboard();
        d.navigate(Route::Monitoring).unwrap();
        let mut ticker = Ticker::new(clock.clone(), d.settings.simulator.tick_interval);

        clock.advance(Duration::from_secs(50));
        d.tick(ticker.due());
        let Page::Monitoring(m) = d.page() else {
            panic!("expected monitoring page");
        };
        assert!(m.state().approval_needed);
        assert_eq!(m.state().progress, 60);
        assert_eq!(d.notifications().latest().unwrap().notification.title, "Approval Required");
    }

    #[test]
    fn leaving_monitoring_stops_and_forgets_the_run() {
        let mut d = dashboard();
        d.navigate(Route::Monitoring).unwrap();
        d.tick(25);
        let Page::Monitoring(m) = d.page() else {
            panic!("expected monitoring page");
        };
        assert!(m.state().approval_needed);
        let raised = d.notifications().len();

        d.navigate(Route::Review).unwrap();
        d.tick(100);
        assert_eq!(d.notifications().len(), raised);
        assert_eq!(d.route(), Route::Review);

        d.navigate(Route::Monitoring).unwrap();
        let Page::Monitoring(m) = d.page() else {
            panic!("expected monitoring page");
        };
        let state = m.state();
        assert_eq!(state.progress, 35);
        assert!(state.running);
        assert!(!state.approval_needed);
    }

    #[test]
    fn ticks_are_ignored_off_the_monitoring_page() {
        let mut d = dashboard();
        d.tick(100);
        assert!(d.notifications().is_empty());
        assert!(d.start_task().is_some());
        d.navigate(Route::Review).unwrap();
        assert!(d.start_task().is_none());
    }
}
