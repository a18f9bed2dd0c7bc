//! Helpers shared by the whole application.
//!
//! ```text
//! utils/
//! ├── errors.rs     - color-eyre hooks and the panic hook
//! ├── help_msg.rs   - key binding hints
//! ├── key_events.rs - printable key events
//! └── logging.rs    - tracing subscriber writing to the log file
//! ```

#[cfg(not(tarpaulin_include))]
pub(crate) mod errors;
pub(crate) mod help_msg;
pub(crate) mod key_events;
#[cfg(not(tarpaulin_include))]
pub(crate) mod logging;
