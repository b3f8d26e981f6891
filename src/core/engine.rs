use crate::core::enumerator::PrimeEnumerator;
use crate::core::{ConfigProvider, EnumerationSummary, MilestoneSink};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use std::time::Instant;

pub struct EnumerationEngine<S: MilestoneSink> {
    sink: S,
    monitor: SystemMonitor,
}

impl<S: MilestoneSink> EnumerationEngine<S> {
    pub fn new(sink: S) -> Self {
        Self::new_with_monitoring(sink, false)
    }

    pub fn new_with_monitoring(sink: S, monitor_enabled: bool) -> Self {
        Self {
            sink,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn run<C: ConfigProvider + ?Sized>(&mut self, config: &C) -> Result<EnumerationSummary> {
        let enumerator = PrimeEnumerator::new(config)?;

        tracing::info!(
            upper_bound = enumerator.upper_bound(),
            milestone_interval = enumerator.milestone_interval(),
            "Starting prime enumeration"
        );
        self.monitor.log_stats("Start");

        let started_at = Utc::now();
        let clock = Instant::now();
        let mut milestones_emitted = 0usize;

        let sink = &mut self.sink;
        let monitor = &mut self.monitor;
        let primes = enumerator.for_each_milestone(|milestone| {
            tracing::debug!(count = milestone.count, prime = milestone.prime, "Milestone reached");
            sink.notify(&milestone)?;
            milestones_emitted += 1;
            monitor.log_stats(&format!("Milestone {}", milestone.count));
            Ok(())
        })?;

        self.sink.finish()?;

        let summary = EnumerationSummary {
            upper_bound: config.upper_bound(),
            milestone_interval: config.milestone_interval(),
            primes_found: primes.len(),
            largest_prime: primes.last(),
            milestones_emitted,
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: clock.elapsed().as_millis(),
        };

        tracing::info!(
            primes_found = summary.primes_found,
            largest_prime = ?summary.largest_prime,
            milestones = summary.milestones_emitted,
            elapsed_ms = summary.elapsed_ms as u64,
            "Enumeration finished"
        );
        self.monitor.log_final_stats();

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::CollectingSink;
    use crate::core::Milestone;

    struct Bounds(u64, u64);

    impl ConfigProvider for Bounds {
        fn upper_bound(&self) -> u64 {
            self.0
        }

        fn milestone_interval(&self) -> u64 {
            self.1
        }
    }

    #[test]
    fn test_run_forwards_milestones() {
        let mut engine = EnumerationEngine::new(CollectingSink::default());
        let summary = engine.run(&Bounds(100, 5)).unwrap();

        // 24 odd primes below 100
        assert_eq!(summary.primes_found, 24);
        assert_eq!(summary.largest_prime, Some(97));
        assert_eq!(summary.milestones_emitted, 4);
        assert_eq!(
            engine.sink().milestones(),
            &[
                Milestone { count: 5, prime: 13 },
                Milestone { count: 10, prime: 31 },
                Milestone { count: 15, prime: 53 },
                Milestone { count: 20, prime: 73 },
            ]
        );
        assert!(engine.sink().is_finished());
    }

    #[test]
    fn test_run_rejects_zero_interval_before_notifying() {
        let mut engine = EnumerationEngine::new(CollectingSink::default());
        assert!(engine.run(&Bounds(100, 0)).is_err());
        assert!(engine.sink().milestones().is_empty());
        assert!(!engine.sink().is_finished());
    }
}
