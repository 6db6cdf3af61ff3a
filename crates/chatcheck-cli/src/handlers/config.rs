//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show => handle_config_show(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(Config::default_init_path);

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    tracing::info!(path = %path.display(), "Wrote default configuration");

    output.success(&format!("Created config at {}", path.display()))?;
    output.info("Edit it to change the default mode, profile and output settings.")?;
    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.section("Effective Configuration")?;
    output.data(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use chatcheck_core::ValidationMode;
    use tempfile::TempDir;

    fn quiet_writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(std::io::sink()))
    }

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatcheck.yaml");

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: false,
        };
        handle_config_init(args, &mut quiet_writer()).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.validation.mode, ValidationMode::Test);
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatcheck.yaml");
        std::fs::write(&path, "validation:\n  mode: serving\n").unwrap();

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: false,
        };
        handle_config_init(args, &mut quiet_writer()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().validation.mode, ValidationMode::Serving);

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: true,
        };
        handle_config_init(args, &mut quiet_writer()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().validation.mode, ValidationMode::Test);
    }
}
