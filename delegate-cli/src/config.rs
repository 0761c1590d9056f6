use anyhow::{Context, Result};
use chrono_tz::Tz;
use delegate_core::{DashboardSettings, SimulatorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_delegate_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub simulator: SimulatorSection,
    pub dashboard: DashboardSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSection {
    pub tick_interval_ms: u64,
    pub initial_progress: u8,
    pub step: u8,
    pub approval_threshold: u8,
    pub approval_ceiling: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    pub redirect_delay_ms: u64,
    pub notification_ttl_ms: u64,
    /// IANA zone used when showing notification times.
    pub timezone: String,
    /// Catalogue JSON to use instead of the built-in demo data.
    pub catalog: Option<PathBuf>,
    /// Optional comparison table CSV, applied on top of `catalog`.
    pub comparison_csv: Option<PathBuf>,
}

impl Default for SimulatorSection {
    fn default() -> Self {
        let d = SimulatorConfig::default();
        Self {
            tick_interval_ms: d.tick_interval.as_millis() as u64,
            initial_progress: d.initial_progress,
            step: d.step,
            approval_threshold: d.approval_threshold,
            approval_ceiling: d.approval_ceiling,
        }
    }
}

impl Default for DashboardSection {
    fn default() -> Self {
        let d = DashboardSettings::default();
        Self {
            redirect_delay_ms: d.redirect_delay.as_millis() as u64,
            notification_ttl_ms: d.notification_ttl.as_millis() as u64,
            timezone: "UTC".to_string(),
            catalog: None,
            comparison_csv: None,
        }
    }
}

impl SimulatorSection {
    pub fn to_core(&self) -> Result<SimulatorConfig> {
        let cfg = SimulatorConfig {
            initial_progress: self.initial_progress,
            step: self.step,
            approval_threshold: self.approval_threshold,
            approval_ceiling: self.approval_ceiling,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
        };
        cfg.validate().context("invalid [simulator] section")?;
        Ok(cfg)
    }
}

impl Config {
    pub fn settings(&self) -> Result<DashboardSettings> {
        Ok(DashboardSettings {
            simulator: self.simulator.to_core()?,
            redirect_delay: Duration::from_millis(self.dashboard.redirect_delay_ms),
            notification_ttl: Duration::from_millis(self.dashboard.notification_ttl_ms),
        })
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.dashboard
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", self.dashboard.timezone))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_delegate_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Defaults when `path` does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    if !p.exists() {
        println!("# {} not found; showing defaults", p.display());
    }
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
