//! Configuration for event timers: output file names and console layout

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{TimerError, TimerResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Aggregate time per event, written by `write_time`
    pub time_file: String,
    /// One line per step, written by `write_time_step`
    pub step_file: String,
    /// Event names, written at teardown
    pub legend_file: String,
    /// Create the output directory if it does not exist
    pub create_dir: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            time_file: "time".to_string(),
            step_file: "profiling".to_string(),
            legend_file: "profiling_legend".to_string(),
            create_dir: false,
        }
    }
}

/// Layout of the time table printed by `print_all_time`.
///
/// The rule above the `TOTAL` row is `key_width + value_width` dashes wide,
/// which is 37 with the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub key_width: usize,
    pub value_width: usize,
    pub precision: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            key_width: 24,
            value_width: 13,
            precision: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub output: OutputConfig,
    pub console: ConsoleConfig,
    /// Initial value of the timer's `print_now` flag
    pub print_now: bool,
}

impl TimerConfig {
    pub fn load_from_file(path: &Path) -> TimerResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TimerError::io_error(path, &e))?;

        let config: TimerConfig = serde_json::from_str(&content)
            .map_err(|e| TimerError::ConfigurationError(format!("Failed to parse config file {}: {}", path.display(), e)))?;
        config.validate()?;

        tracing::info!("Timer configuration loaded from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> TimerResult<()> {
        let content = serde_json::to_string_pretty(self)?;

        std::fs::write(path, content)
            .map_err(|e| TimerError::io_error(path, &e))?;

        tracing::info!("Timer configuration saved to {:?}", path);
        Ok(())
    }

    /// Reject layouts that would make the output files collide or the table unreadable.
    pub fn validate(&self) -> TimerResult<()> {
        let names = [
            ("time_file", &self.output.time_file),
            ("step_file", &self.output.step_file),
            ("legend_file", &self.output.legend_file),
        ];

        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(TimerError::ConfigurationError(format!("{} must not be empty", field)));
            }
        }

        for (i, (field_a, a)) in names.iter().enumerate() {
            for (field_b, b) in &names[i + 1..] {
                if a == b {
                    return Err(TimerError::ConfigurationError(format!(
                        "{} and {} both point to '{}'",
                        field_a, field_b, a
                    )));
                }
            }
        }

        if self.console.key_width == 0 || self.console.value_width == 0 {
            return Err(TimerError::ConfigurationError(
                "console column widths must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for timer configurations
pub struct ConfigBuilder {
    config: TimerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TimerConfig::default(),
        }
    }

    pub fn output(mut self, f: impl FnOnce(&mut OutputConfig)) -> Self {
        f(&mut self.config.output);
        self
    }

    pub fn console(mut self, f: impl FnOnce(&mut ConsoleConfig)) -> Self {
        f(&mut self.config.console);
        self
    }

    pub fn print_now(mut self, print_now: bool) -> Self {
        self.config.print_now = print_now;
        self
    }

    pub fn build(self) -> TimerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
