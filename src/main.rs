use anyhow::{Context, Result};
use clap::Parser;
use pawprint::config::{effective_settings, project_paths, save_settings_atomic, Cli};
use pawprint::{app, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = match project_paths() {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("warning: {e:#}; using default settings");
            None
        }
    };
    let settings = effective_settings(paths.as_ref(), &cli);

    if cli.write_settings {
        let paths = paths.context("no data directory to write settings to")?;
        save_settings_atomic(&paths.settings_path, &settings)?;
        println!("wrote {}", paths.settings_path.display());
        return Ok(());
    }

    let _guard = match (&paths, cli.no_log) {
        (Some(p), false) => match logging::init_file_logging(&p.log_dir, &settings.log_filter) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("warning: {e:#}; continuing without a log file");
                None
            }
        },
        _ => None,
    };

    app::run(&settings)?;
    Ok(())
}
