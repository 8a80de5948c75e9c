use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pawprint")]
#[command(about = "Turn-based virtual pet simulator for the terminal")]
pub struct Cli {
    /// Seed for illness rolls (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Force monochrome (no colors)
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Keep scrollback instead of clearing the screen each turn
    #[arg(long, default_value_t = false)]
    pub no_clear: bool,

    /// Log filter, e.g. "debug" or "pawprint=trace"
    #[arg(long = "log")]
    pub log_filter: Option<String>,

    /// Do not write a log file
    #[arg(long, default_value_t = false)]
    pub no_log: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long, default_value_t = false)]
    pub write_settings: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub seed: Option<u64>,
    pub enable_color: bool,
    pub clear_screen: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            enable_color: true,
            clear_screen: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Command-line flags win over the settings file.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.mono {
            self.enable_color = false;
        }
        if cli.no_clear {
            self.clear_screen = false;
        }
        if let Some(filter) = &cli.log_filter {
            self.log_filter = filter.clone();
        }
        self
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_dir: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "pawprint", "Pawprint")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("could not create data directory {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_dir: dir.join("logs"),
    })
}

/// Settings for this run: the settings file when there is a data
/// directory, defaults otherwise, with command-line flags on top.
pub fn effective_settings(paths: Option<&Paths>, cli: &Cli) -> Settings {
    paths
        .map(|p| load_settings(&p.settings_path))
        .unwrap_or_default()
        .with_cli(cli)
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(v) = serde_json::from_str::<Settings>(&s) {
            return v;
        }
    }
    Settings::default()
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("could not write {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename-over-existing fails on Windows
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("could not move {} to {}", from.display(), to.display()))?;
    Ok(())
}
