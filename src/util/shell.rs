//! Centralized shell output.
//!
//! The Shell owns every user-facing line qub prints:
//! - Transcript lines (`Publishing me/app@1...`) on stdout
//! - `ERROR: <message>` lines, also on stdout
//! - Status messages with consistent formatting on stderr
//! - JSON events for machine-readable output
//!
//! Human and JSON modes are mutually exclusive: in JSON mode transcript and
//! status lines are suppressed and only JSON events are written.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON output only.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
        }
    }
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    /// Default: transcript lines and warnings
    #[default]
    Normal,
    /// --verbose: every status line
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for stderr status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // In-progress statuses (cyan)
    Packing,
    Resolving,
    Copying,
    Writing,
    Scanning,

    // Success statuses (green)
    Published,

    // Warning status (yellow)
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Packing => "Packing",
            Status::Resolving => "Resolving",
            Status::Copying => "Copying",
            Status::Writing => "Writing",
            Status::Scanning => "Scanning",
            Status::Published => "Published",
            Status::Warning => "Warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Packing
            | Status::Resolving
            | Status::Copying
            | Status::Writing
            | Status::Scanning => "\x1b[1;36m",
            Status::Published => "\x1b[1;32m",
            Status::Warning => "\x1b[1;33m",
        }
    }

    fn is_warning(&self) -> bool {
        matches!(self, Status::Warning)
    }

    /// Width for right alignment.
    fn width(&self) -> usize {
        12
    }
}

/// Central shell for all CLI output.
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("mode", &self.mode)
            .field("use_color", &self.use_color)
            .finish()
    }
}

impl Shell {
    /// Create a new shell writing to stdout.
    pub fn new(mode: ShellMode) -> Self {
        Shell::with_output(mode, Box::new(io::stdout()))
    }

    /// Create a shell writing transcript and JSON output to `out`.
    pub fn with_output(mode: ShellMode, out: Box<dyn Write + Send>) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell {
            mode,
            use_color,
            out: Mutex::new(out),
        }
    }

    /// Create a shell from CLI flags with proper precedence.
    ///
    /// JSON mode takes precedence over quiet/verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        let mode = if json {
            ShellMode::Json
        } else {
            let verbosity = if quiet {
                Verbosity::Quiet
            } else if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity, color }
        };

        Shell::new(mode)
    }

    /// Check if shell is in quiet mode.
    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet,
                ..
            }
        )
    }

    /// Check if shell is in verbose mode.
    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose,
                ..
            }
        )
    }

    /// Check if shell is in JSON mode.
    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    fn write_out(&self, text: &str) {
        // A broken pipe on stdout must not abort a publish half-way.
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }

    /// Print a transcript line. Suppressed in quiet and JSON modes.
    pub fn line(&self, msg: impl Display) {
        if self.is_json() || self.is_quiet() {
            return;
        }
        self.write_out(&msg.to_string());
    }

    /// Print an `ERROR: <message>` line, or an error event in JSON mode.
    pub fn error(&self, msg: impl Display) {
        if self.is_json() {
            let event = serde_json::json!({
                "reason": "error",
                "message": msg.to_string()
            });
            self.json_event(&event);
        } else {
            self.write_out(&format!("ERROR: {}", msg));
        }
    }

    /// Print a status message to stderr.
    ///
    /// Format: `{status:>12} {message}`. Warnings print in normal mode;
    /// everything else only in verbose mode.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() || self.is_quiet() {
            return;
        }
        if !self.is_verbose() && !status.is_warning() {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print a warning status.
    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print a JSON event. Only works in JSON mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }
        self.write_out(&event.to_string());
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            format!("{}{:>width$}\x1b[0m", status.color_code(), text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ShellMode::default())
    }
}

/// Format a duration as seconds with one decimal, e.g. `1.5`.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.1}", duration.as_secs_f64())
}
