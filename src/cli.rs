use clap::Parser;
use color_eyre::Result;
use config::Source;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Path to the data directory, where the log file is written
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Initial hour (1-23), anything else keeps 00
    #[arg(long, value_name = "HH")]
    pub hour: Option<String>,

    /// Initial minute (1-59), anything else keeps 00
    #[arg(long, value_name = "MM")]
    pub minute: Option<String>,

    /// Quit as soon as a time is confirmed
    #[arg(short = 'x', long)]
    pub exit_on_confirm: bool,

    /// Print the last confirmed time as JSON to stdout on exit
    #[arg(short = 'j', long)]
    pub print_json: bool,
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let data_dir_path = get_data_dir().display().to_string();
    let config_dir_path = get_config_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}

/// Command line values that take priority over every other config source.
///
/// Flags that were not given are left out, so they don't shadow the config
/// file or the environment.
#[derive(Debug, Clone)]
pub(crate) struct ClapSource {
    pub data_dir: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub exit_on_confirm: bool,
    pub print_json: bool,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            hour: cli.hour.clone(),
            minute: cli.minute.clone(),
            exit_on_confirm: cli.exit_on_confirm,
            print_json: cli.print_json,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        let strings = [
            ("data_dir", &self.data_dir),
            ("picker.hour", &self.hour),
            ("picker.minute", &self.minute),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.to_string(), config::Value::new(None, value.clone()));
            }
        }
        let flags = [
            ("picker.exit_on_confirm", self.exit_on_confirm),
            ("picker.print_json", self.print_json),
        ];
        for (key, set) in flags {
            if set {
                map.insert(key.to_string(), config::Value::new(None, true));
            }
        }
        Ok(map)
    }
}
