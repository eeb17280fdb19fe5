use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::config::OutputConfig;
use crate::error::{TimerError, TimerResult};
use super::report;

/// One output file and the path it was opened at.
#[derive(Debug)]
struct Sink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Sink {
    fn create(path: PathBuf) -> TimerResult<Self> {
        let file = File::create(&path).map_err(|e| TimerError::io_error(&path, &e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Write whole lines and flush, so the file is readable while the run goes on.
    fn write_lines<I, S>(&mut self, lines: I) -> TimerResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.writer, "{}", line.as_ref())
                .map_err(|e| TimerError::io_error(&self.path, &e))?;
        }
        self.flush()
    }

    fn flush(&mut self) -> TimerResult<()> {
        self.writer
            .flush()
            .map_err(|e| TimerError::io_error(&self.path, &e))
    }
}

/// The aggregate-time, per-step and legend files of one run.
#[derive(Debug)]
pub struct OutputSinks {
    dir: PathBuf,
    time: Sink,
    step: Sink,
    legend: Sink,
}

impl OutputSinks {
    /// Create (or truncate) the three files under `dir`.
    pub fn open(dir: &Path, config: &OutputConfig) -> TimerResult<Self> {
        if config.create_dir {
            std::fs::create_dir_all(dir).map_err(|e| TimerError::io_error(dir, &e))?;
        }

        let sinks = Self {
            dir: dir.to_path_buf(),
            time: Sink::create(dir.join(&config.time_file))?,
            step: Sink::create(dir.join(&config.step_file))?,
            legend: Sink::create(dir.join(&config.legend_file))?,
        };

        tracing::debug!("Opened timer output files in {:?}", sinks.dir);
        Ok(sinks)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_time<'a>(&mut self, totals: impl IntoIterator<Item = (&'a String, &'a f64)>) -> TimerResult<()> {
        self.time
            .write_lines(totals.into_iter().map(|(event, seconds)| report::time_line(event, *seconds)))
    }

    pub fn write_time_step<'a>(&mut self, step: i64, values: impl IntoIterator<Item = &'a f64>) -> TimerResult<()> {
        self.step.write_lines([report::step_line(step, values)])
    }

    pub fn write_legend<'a>(&mut self, events: impl IntoIterator<Item = &'a String>) -> TimerResult<()> {
        self.legend.write_lines(events)
    }

    /// Flush every file; the files close when the sinks are dropped.
    pub fn flush(&mut self) -> TimerResult<()> {
        self.time.flush()?;
        self.step.flush()?;
        self.legend.flush()?;
        tracing::debug!("Flushed timer output files in {:?}", self.dir);
        Ok(())
    }
}
