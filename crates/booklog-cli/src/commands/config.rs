//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use booklog_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "backend": config.backend.to_string(),
                    "storage_key": config.storage_key,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:    {}", config.data_dir.display());
            println!("  backend:     {}", config.backend);
            println!("  storage_key: {}", config.storage_key);
            println!(
                "  log_file:    {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one `key = value` change to a configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "backend" => {
            config.backend = value.parse()?;
        }
        "storage_key" => {
            if value.trim().is_empty() {
                bail!("storage_key cannot be empty");
            }
            config.storage_key = value.to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, backend, storage_key, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_core::Backend;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "backend", "sqlite").unwrap();
        assert_eq!(config.backend, Backend::Sqlite);

        apply(&mut config, "storage_key", "shelf.v2").unwrap();
        assert_eq!(config.storage_key, "shelf.v2");

        apply(&mut config, "log_file", "/tmp/booklog.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/booklog.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());

        apply(&mut config, "data_dir", "/srv/books").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/books"));
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "backend", "redis").is_err());
        assert!(apply(&mut config, "storage_key", "  ").is_err());
        assert!(apply(&mut config, "colour", "blue").is_err());
    }
}
