use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
}

/// Values handed to the time picker when it is mounted.
///
/// `hour` and `minute` are kept as the raw text the user supplied, the picker
/// decides whether they are usable.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct PickerConfig {
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub minute: Option<String>,
    #[serde(default)]
    pub exit_on_confirm: bool,
    #[serde(default)]
    pub print_json: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub picker: PickerConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    /// Sources from lowest to highest priority: defaults, `config.*` in the
    /// config directory, `TIME_PICKER_*` environment variables, the CLI.
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_file = get_config_dir().join("config");
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .add_source(config::File::from(config_file).required(false))
            .add_source(
                config::Environment::with_prefix(&PROJECT_NAME)
                    .prefix_separator("_")
                    .separator("__"),
            );

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

fn dir_from_env(suffix: &str) -> Option<PathBuf> {
    env::var(format!("{}_{}", PROJECT_NAME.clone(), suffix))
        .ok()
        .map(PathBuf::from)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = dir_from_env("DATA") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = dir_from_env("CONFIG") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "time-picker", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {

    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    fn env_key(suffix: &str) -> String {
        format!("{}_{}", PROJECT_NAME.clone(), suffix)
    }

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();
        let data_dir = temp_data.path().to_str().unwrap();

        temp_env::with_vars(
            [(env_key("DATA").as_str(), Some(data_dir))],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn picker_defaults() {
        let temp_config = tempdir_in(".").unwrap();
        let config_dir = temp_config.path().to_str().unwrap();
        temp_env::with_vars(
            [
                (env_key("CONFIG").as_str(), Some(config_dir)),
                (env_key("PICKER__HOUR").as_str(), None),
                (env_key("PICKER__MINUTE").as_str(), None),
            ],
            || {
                let args = Cli::parse_from(["test-config"]);
                let config =
                    Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
                assert_eq!(config.picker.hour, None);
                assert_eq!(config.picker.minute, None);
                assert!(!config.picker.exit_on_confirm);
                assert!(!config.picker.print_json);
            },
        );
    }

    #[test]
    fn picker_from_cli() {
        let args = Cli::parse_from([
            "test-config",
            "--hour",
            "7",
            "--minute",
            "30",
            "--exit-on-confirm",
            "-j",
        ]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.hour.as_deref(), Some("7"));
        assert_eq!(config.picker.minute.as_deref(), Some("30"));
        assert!(config.picker.exit_on_confirm);
        assert!(config.picker.print_json);
    }

    #[test]
    fn picker_from_config_file() {
        let temp_config = tempdir_in(".").unwrap();
        let config_dir = temp_config.path().to_str().unwrap();
        std::fs::write(
            temp_config.path().join("config.toml"),
            "[picker]\nhour = \"8\"\nminute = 45\nprint_json = true\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                (env_key("CONFIG").as_str(), Some(config_dir)),
                (env_key("PICKER__HOUR").as_str(), None),
                (env_key("PICKER__MINUTE").as_str(), None),
            ],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.picker.hour.as_deref(), Some("8"));
                assert_eq!(config.picker.minute.as_deref(), Some("45"));
                assert!(config.picker.print_json);
                assert!(!config.picker.exit_on_confirm);

                // CLI wins over the file
                let args = Cli::parse_from(["test-config", "--hour", "9"]);
                let config = Config::new(Some(ClapSource::new(&args))).unwrap();
                assert_eq!(config.picker.hour.as_deref(), Some("9"));
                assert!(config.picker.print_json);
            },
        );
    }

    #[test]
    fn picker_from_env() {
        let temp_config = tempdir_in(".").unwrap();
        let config_dir = temp_config.path().to_str().unwrap();
        temp_env::with_vars(
            [
                (env_key("CONFIG").as_str(), Some(config_dir)),
                (env_key("PICKER__MINUTE").as_str(), Some("12")),
            ],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.picker.minute.as_deref(), Some("12"));
            },
        );
    }
}
