//! Output configuration and formatting

mod formatter;

pub use formatter::Formatter;

/// Output behavior selected by the global CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit strict JSON instead of human-readable text
    pub json: bool,
    /// Suppress everything except errors
    pub quiet: bool,
    /// Disable ANSI styling
    pub no_color: bool,
}
