use rust_decimal::Decimal;
use serde::Serialize;

/// Counters and failure reasons accumulated over one run.
///
/// `total == passed + failed` holds after every recorded case.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    /// Ordered `name: reason` entries, one per failed case
    pub failures: Vec<String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a case as attempted, before any validation runs
    pub fn begin_case(&mut self) {
        self.total += 1;
    }

    pub fn record_pass(&mut self) {
        self.passed += 1;
    }

    pub fn record_failure(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        self.failures.push(format!("{}: {}", name, reason));
    }

    /// Percentage of passed cases, rounded to two decimals; 0 when nothing ran
    pub fn pass_rate(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.passed) * Decimal::from(100) / Decimal::from(self.total)).round_dp(2)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_balance() {
        let mut stats = RunStats::new();
        for i in 0..5 {
            stats.begin_case();
            if i % 2 == 0 {
                stats.record_pass();
            } else {
                stats.record_failure("case", "reason");
            }
        }
        assert_eq!(stats.total, 5);
        assert_eq!(stats.passed + stats.failed, stats.total);
        assert_eq!(stats.failures.len(), stats.failed as usize);
    }

    #[test]
    fn test_pass_rate_zero_when_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.pass_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_pass_rate_rounding() {
        let mut stats = RunStats::new();
        for _ in 0..3 {
            stats.begin_case();
        }
        stats.record_pass();
        stats.record_pass();
        stats.record_failure("x", "y");

        let rate = stats.pass_rate();
        assert_eq!(rate.to_string(), "66.67");
        assert!(rate >= Decimal::ZERO && rate <= Decimal::from(100));
    }

    #[test]
    fn test_failure_reasons_keep_order() {
        let mut stats = RunStats::new();
        stats.begin_case();
        stats.record_failure("first", "a");
        stats.begin_case();
        stats.record_failure("second", "b");
        assert_eq!(stats.failures, vec!["first: a", "second: b"]);
    }
}
