//! Logging utilities with colored output and an injectable diagnostic sink.
//!
//! This module provides:
//! - `log!` and `debug!` macros for formatted terminal output with colored
//!   module prefixes
//! - [`DiagnosticSink`], the seam through which the processor and the link
//!   helpers report non-fatal problems, so callers can capture diagnostics
//!   in tests instead of scraping process-wide output
//!
//! # Example
//!
//! ```ignore
//! log!("assets"; "processed {} files", count);
//!
//! let sink = ConsoleSink;
//! sink.report("assetLink", "asset \"main.css\" not found");
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by the host build tool)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when verbose mode is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_yellow().bold().to_string(),
        _ => prefix.bright_blue().bold().to_string(),
    }
}

// ============================================================================
// Diagnostic Sink
// ============================================================================

/// Destination for non-fatal diagnostics.
///
/// The link helpers degrade to an empty string on lookup misses rather than
/// aborting template rendering; the miss is reported here instead. Tests
/// inject a recording sink to assert on the diagnostics.
pub trait DiagnosticSink {
    /// Report a problem from the named scope (e.g. `"assetLink"`).
    fn report(&self, scope: &str, message: &str);
}

/// Default sink: colored stderr output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&self, scope: &str, message: &str) {
        let prefix = format!("[{scope}]").bright_red().bold().to_string();
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
    }
}

/// Sink that drops every diagnostic. Useful when the caller only cares
/// about the returned value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _scope: &str, _message: &str) {}
}
