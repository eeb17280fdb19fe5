//! tictoc - wall-clock timers and memory accounting for simulation loops
//!
//! An [`EventTimer`] tracks, per named event:
//! - the time of the last start ("tic")
//! - the total elapsed time over the run
//! - the elapsed time within the current step of the host loop
//! - a signed memory balance fed by explicit alloc/free calls
//!
//! and writes three text files into the run's output directory:
//! `time` (total per event), `profiling` (one line per step) and
//! `profiling_legend` (event names, written when the timer is dropped).
//!
//! ```no_run
//! use tictoc::EventTimer;
//!
//! let mut timer = EventTimer::create("output")?;
//! for step in 0..10 {
//!     timer.start_timer("step");
//!     // ... advance the simulation ...
//!     timer.stop_timer("step", false);
//!     timer.write_time_step(step)?;
//!     timer.reset_time_step();
//! }
//! timer.write_time()?;
//! timer.print_all_time();
//! # Ok::<(), tictoc::TimerError>(())
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod profiling;

pub use config::{ConfigBuilder, ConsoleConfig, OutputConfig, TimerConfig};
pub use error::{ErrorCode, TimerError, TimerResult};
pub use memory::MemoryLedger;
pub use profiling::{
    Clock, EventTimer, ManualClock, OutputSinks, ScopedAllocation, ScopedTimer, SystemClock,
    TimerState,
};

/// Install a `tracing` subscriber that prints to stdout.
///
/// Does nothing if a global subscriber is already set.
pub fn init() -> TimerResult<()> {
    if tracing_subscriber::fmt::try_init().is_ok() {
        tracing::info!("tictoc {} initialized", version());
    }
    Ok(())
}

/// Get the current crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
