use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use crate::config::{ConsoleConfig, TimerConfig};
use crate::error::{TimerError, TimerResult};
use crate::memory::MemoryLedger;
use super::clock::{Clock, SystemClock};
use super::report;
use super::scope::{ScopedAllocation, ScopedTimer};
use super::sinks::OutputSinks;

/// Whether an event currently has an open start mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    NotStarted,
    Running,
}

/// Wall-clock timers and memory balances for named events.
///
/// Every map is ordered by event name, so the legend, the time file and the
/// columns of the per-step file always list events in the same order.
///
/// Stopping an event that was never started measures from `0.0`, i.e. from
/// the Unix epoch with [`SystemClock`]; use [`EventTimer::try_stop_timer`]
/// to reject that instead.
///
/// The legend is written and the files are closed when the timer is dropped.
#[derive(Debug)]
pub struct EventTimer<C: Clock = SystemClock> {
    clock: C,
    start_times: BTreeMap<String, f64>,
    running: BTreeSet<String>,
    total_elapsed: BTreeMap<String, f64>,
    step_elapsed: BTreeMap<String, f64>,
    memory: MemoryLedger,
    sinks: Option<OutputSinks>,
    console: ConsoleConfig,
    print_now: bool,
}

impl EventTimer<SystemClock> {
    /// Timer writing `time`, `profiling` and `profiling_legend` under `dir`.
    pub fn create(dir: impl AsRef<Path>) -> TimerResult<Self> {
        Self::with_config(dir, &TimerConfig::default())
    }

    pub fn with_config(dir: impl AsRef<Path>, config: &TimerConfig) -> TimerResult<Self> {
        Self::with_clock(dir, config, SystemClock)
    }

    /// Timer without output files; the `write_*` operations do nothing.
    pub fn detached() -> Self {
        Self::detached_with_clock(SystemClock)
    }
}

impl<C: Clock> EventTimer<C> {
    pub fn with_clock(dir: impl AsRef<Path>, config: &TimerConfig, clock: C) -> TimerResult<Self> {
        config.validate()?;
        let sinks = OutputSinks::open(dir.as_ref(), &config.output)?;

        let mut timer = Self::detached_with_clock(clock);
        timer.sinks = Some(sinks);
        timer.console = config.console.clone();
        timer.print_now = config.print_now;
        Ok(timer)
    }

    pub fn detached_with_clock(clock: C) -> Self {
        Self {
            clock,
            start_times: BTreeMap::new(),
            running: BTreeSet::new(),
            total_elapsed: BTreeMap::new(),
            step_elapsed: BTreeMap::new(),
            memory: MemoryLedger::new(),
            sinks: None,
            console: ConsoleConfig::default(),
            print_now: false,
        }
    }

    /// Record the current time as the start of `event`. A second start
    /// before the stop replaces the first.
    pub fn start_timer(&mut self, event: &str) {
        let tic = self.clock.now();
        self.start_times.insert(event.to_string(), tic);
        self.running.insert(event.to_string());
    }

    /// Add the time since the last start of `event` to its step and total
    /// counters and return that delta. With `echo`, print the new total.
    pub fn stop_timer(&mut self, event: &str, echo: bool) -> f64 {
        let toc = self.clock.now();
        let tic = *self.start_times.entry(event.to_string()).or_insert(0.0);
        let delta = toc - tic;

        *self.step_elapsed.entry(event.to_string()).or_insert(0.0) += delta;
        *self.total_elapsed.entry(event.to_string()).or_insert(0.0) += delta;
        self.running.remove(event);

        if echo {
            println!("{}", self.time_report(event));
        }
        delta
    }

    /// Like [`EventTimer::stop_timer`], but only for an event that is running.
    pub fn try_stop_timer(&mut self, event: &str, echo: bool) -> TimerResult<f64> {
        if !self.running.contains(event) {
            tracing::debug!("Rejected stop for event '{}' without a start", event);
            return Err(TimerError::not_started(event));
        }
        Ok(self.stop_timer(event, echo))
    }

    pub fn state(&self, event: &str) -> TimerState {
        if self.running.contains(event) {
            TimerState::Running
        } else {
            TimerState::NotStarted
        }
    }

    /// Forget the total of `event`. Its start, step time and memory balance stay.
    pub fn erase_timer(&mut self, event: &str) {
        self.total_elapsed.remove(event);
    }

    pub fn reset_timer(&mut self) {
        self.total_elapsed.values_mut().for_each(|seconds| *seconds = 0.0);
    }

    pub fn reset_time_step(&mut self) {
        self.step_elapsed.values_mut().for_each(|seconds| *seconds = 0.0);
    }

    pub fn alloc_memory(&mut self, event: &str, bytes: f64) {
        self.memory.alloc(event, bytes);
    }

    pub fn free_memory(&mut self, event: &str, bytes: f64) {
        self.memory.free(event, bytes);
    }

    /// Print `"<event> : <total seconds>"`. An unknown event is registered with zero.
    pub fn print_time(&mut self, event: &str) {
        self.total_elapsed.entry(event.to_string()).or_insert(0.0);
        println!("{}", self.time_report(event));
    }

    /// Print `"<event> : <bytes>"`. An unknown event is registered with zero.
    pub fn print_memory(&mut self, event: &str) {
        self.memory.touch(event);
        println!("{}", self.memory_report(event));
    }

    /// The line printed by [`EventTimer::print_time`] and by an echoing stop.
    /// Reads an unknown event as zero without registering it.
    pub fn time_report(&self, event: &str) -> String {
        report::event_line(event, self.total(event).unwrap_or(0.0))
    }

    /// The line printed by [`EventTimer::print_memory`].
    pub fn memory_report(&self, event: &str) -> String {
        report::event_line(event, self.memory(event).unwrap_or(0.0))
    }

    pub fn print_all_time(&self) {
        print!("{}", self.time_summary());
    }

    /// The table printed by [`EventTimer::print_all_time`].
    pub fn time_summary(&self) -> String {
        report::render_time_table(&self.total_elapsed, &self.console)
    }

    pub fn write_legend(&mut self) -> TimerResult<()> {
        match self.sinks.as_mut() {
            Some(sinks) => sinks.write_legend(self.total_elapsed.keys()),
            None => Ok(()),
        }
    }

    pub fn write_time(&mut self) -> TimerResult<()> {
        match self.sinks.as_mut() {
            Some(sinks) => sinks.write_time(&self.total_elapsed),
            None => Ok(()),
        }
    }

    /// Append `step` and every step time to the per-step file. Step times
    /// are not reset; call [`EventTimer::reset_time_step`] for that.
    pub fn write_time_step(&mut self, step: i64) -> TimerResult<()> {
        match self.sinks.as_mut() {
            Some(sinks) => sinks.write_time_step(step, self.step_elapsed.values()),
            None => Ok(()),
        }
    }

    pub fn total(&self, event: &str) -> Option<f64> {
        self.total_elapsed.get(event).copied()
    }

    pub fn step(&self, event: &str) -> Option<f64> {
        self.step_elapsed.get(event).copied()
    }

    pub fn memory(&self, event: &str) -> Option<f64> {
        self.memory.usage(event)
    }

    pub fn start_time(&self, event: &str) -> Option<f64> {
        self.start_times.get(event).copied()
    }

    pub fn total_elapsed(&self) -> &BTreeMap<String, f64> {
        &self.total_elapsed
    }

    pub fn step_elapsed(&self) -> &BTreeMap<String, f64> {
        &self.step_elapsed
    }

    pub fn memory_usage(&self) -> &BTreeMap<String, f64> {
        self.memory.entries()
    }

    /// Events with a total, in legend order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.total_elapsed.keys().map(String::as_str)
    }

    pub fn print_now(&self) -> bool {
        self.print_now
    }

    pub fn set_print_now(&mut self, print_now: bool) {
        self.print_now = print_now;
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.sinks.as_ref().map(OutputSinks::dir)
    }

    /// Start `event` now and stop it when the returned guard is dropped.
    pub fn scoped(&mut self, event: &str) -> ScopedTimer<'_, C> {
        ScopedTimer::new(self, event)
    }

    /// Allocate `bytes` for `event` now and free them when the returned guard is dropped.
    pub fn scoped_allocation(&mut self, event: &str, bytes: f64) -> ScopedAllocation<'_, C> {
        ScopedAllocation::new(self, event, bytes)
    }

    /// Write the legend and close the files, reporting any failure.
    pub fn finish(mut self) -> TimerResult<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> TimerResult<()> {
        if let Some(mut sinks) = self.sinks.take() {
            sinks.write_legend(self.total_elapsed.keys())?;
            sinks.flush()?;
            tracing::debug!("Closed timer output in {:?} ({} events)", sinks.dir(), self.total_elapsed.len());
        }
        Ok(())
    }
}

impl<C: Clock> Drop for EventTimer<C> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            tracing::warn!("Failed to finish timer output: {}", e);
        }
    }
}
