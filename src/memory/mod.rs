use std::collections::BTreeMap;

/// Signed byte counts per event.
///
/// There is no underflow protection: freeing more than was allocated
/// leaves a negative balance for that event.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    usage: BTreeMap<String, f64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            usage: BTreeMap::new(),
        }
    }

    pub fn alloc(&mut self, event: &str, bytes: f64) {
        *self.entry(event) += bytes;
    }

    pub fn free(&mut self, event: &str, bytes: f64) {
        *self.entry(event) -= bytes;
    }

    pub fn usage(&self, event: &str) -> Option<f64> {
        self.usage.get(event).copied()
    }

    /// Current balance for `event`, creating a zero entry if it is unknown.
    pub fn touch(&mut self, event: &str) -> f64 {
        *self.entry(event)
    }

    pub fn entries(&self) -> &BTreeMap<String, f64> {
        &self.usage
    }

    fn entry(&mut self, event: &str) -> &mut f64 {
        self.usage.entry(event.to_string()).or_insert(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_then_free() {
        let mut ledger = MemoryLedger::new();
        ledger.alloc("mesh", 100.0);
        ledger.free("mesh", 40.0);
        assert_eq!(ledger.usage("mesh"), Some(60.0));
    }

    #[test]
    fn test_balance_can_go_negative() {
        let mut ledger = MemoryLedger::new();
        ledger.free("particles", 16.0);
        assert_eq!(ledger.usage("particles"), Some(-16.0));
    }

    #[test]
    fn test_touch_creates_entry() {
        let mut ledger = MemoryLedger::new();
        assert_eq!(ledger.usage("fields"), None);
        assert_eq!(ledger.touch("fields"), 0.0);
        assert_eq!(ledger.usage("fields"), Some(0.0));
    }

    #[test]
    fn test_entries_are_sorted() {
        let mut ledger = MemoryLedger::new();
        ledger.alloc("b", 2048.0);
        ledger.alloc("a", 1024.0);
        ledger.free("a", 24.0);
        assert_eq!(ledger.entries().keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ledger.usage("a"), Some(1000.0));
    }
}
