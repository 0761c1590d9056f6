use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.delegate`, or `$DELEGATE_HOME` when set.
pub fn delegate_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("DELEGATE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".delegate"))
}

pub fn ensure_delegate_home() -> Result<PathBuf> {
    let dir = delegate_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
