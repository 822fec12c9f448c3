//! Non-interactive run reporting.
//!
//! Everything the tool says goes through a [Reporter] so components never
//! print ad hoc and verbosity is decided in one place from configuration.

use console::style;
use std::str::FromStr;

/// Reporting threshold, lowest to highest severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Verbosity::Debug),
            "info" => Ok(Verbosity::Info),
            "warning" | "warn" => Ok(Verbosity::Warning),
            "error" => Ok(Verbosity::Error),
            other => Err(format!("Unknown log level: '{}'", other)),
        }
    }
}

/// Writes run progress to the terminal, filtered by verbosity
#[derive(Debug, Clone)]
pub struct Reporter {
    verbosity: Verbosity,
}

impl Reporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Reporter { verbosity }
    }

    /// Low-level detail, shown only at debug verbosity
    pub fn debug(&self, message: &str) {
        if self.verbosity <= Verbosity::Debug {
            println!("{} {}", style("·").dim(), style(message).dim());
        }
    }

    /// Progress of the current step
    pub fn status(&self, message: &str) {
        if self.verbosity <= Verbosity::Info {
            println!("{} {}", style("→").yellow(), message);
        }
    }

    /// A completed step
    pub fn success(&self, message: &str) {
        if self.verbosity <= Verbosity::Info {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// A non-fatal anomaly the operator should see
    pub fn warning(&self, message: &str) {
        if self.verbosity <= Verbosity::Warning {
            println!("{} {}", style("WARNING:").yellow().bold(), message);
        }
    }

    /// A fatal condition; the run terminates after reporting it
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("ERROR:").red().bold(), message);
    }
}
