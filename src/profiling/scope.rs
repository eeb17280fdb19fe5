//! Guards that close a timer or release an allocation when they go out of scope.

use std::ops::{Deref, DerefMut};
use super::clock::Clock;
use super::timer::EventTimer;

/// Starts an event on creation and stops it (without echo) on drop.
///
/// Derefs to the timer, so other events can be measured inside the scope.
pub struct ScopedTimer<'a, C: Clock> {
    timer: &'a mut EventTimer<C>,
    event: String,
}

impl<'a, C: Clock> ScopedTimer<'a, C> {
    pub fn new(timer: &'a mut EventTimer<C>, event: &str) -> Self {
        timer.start_timer(event);
        Self {
            timer,
            event: event.to_string(),
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

impl<C: Clock> Deref for ScopedTimer<'_, C> {
    type Target = EventTimer<C>;

    fn deref(&self) -> &Self::Target {
        self.timer
    }
}

impl<C: Clock> DerefMut for ScopedTimer<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.timer
    }
}

impl<C: Clock> Drop for ScopedTimer<'_, C> {
    fn drop(&mut self) {
        self.timer.stop_timer(&self.event, false);
    }
}

/// Allocates bytes for an event on creation and frees the same amount on drop.
pub struct ScopedAllocation<'a, C: Clock> {
    timer: &'a mut EventTimer<C>,
    event: String,
    bytes: f64,
}

impl<'a, C: Clock> ScopedAllocation<'a, C> {
    pub fn new(timer: &'a mut EventTimer<C>, event: &str, bytes: f64) -> Self {
        timer.alloc_memory(event, bytes);
        Self {
            timer,
            event: event.to_string(),
            bytes,
        }
    }

    pub fn bytes(&self) -> f64 {
        self.bytes
    }
}

impl<C: Clock> Deref for ScopedAllocation<'_, C> {
    type Target = EventTimer<C>;

    fn deref(&self) -> &Self::Target {
        self.timer
    }
}

impl<C: Clock> DerefMut for ScopedAllocation<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.timer
    }
}

impl<C: Clock> Drop for ScopedAllocation<'_, C> {
    fn drop(&mut self) {
        self.timer.free_memory(&self.event, self.bytes);
    }
}
