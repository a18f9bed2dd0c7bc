use std::path::Path;

use color_eyre::{Result, eyre::Context};
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

use crate::config::PROJECT_NAME;

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Send tracing events to `<data_dir>/time_picker.log`.
///
/// The filter comes from `RUST_LOG`, then `TIME_PICKER_LOGLEVEL`, and
/// defaults to `info` for this crate.
pub fn init(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Unable to create data directory {}", data_dir.display()))?;
    let log_path = data_dir.join(LOG_FILE.clone());
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Unable to create log file {}", log_path.display()))?;

    let env_filter = EnvFilter::builder().with_default_directive(default_directive()?);
    let env_filter = env_filter
        .try_from_env()
        .or_else(|_| env_filter.with_env_var(LOG_ENV.clone()).from_env())?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

/// Other crates stay quiet unless asked for through the environment.
fn default_directive() -> Result<Directive> {
    Ok(concat!(env!("CARGO_PKG_NAME"), "=info").parse()?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_directive_is_scoped_to_crate() {
        let directive = default_directive().unwrap();
        assert_eq!(directive.to_string().to_lowercase(), "time_picker=info");
    }
}
