use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// First value of every enumeration, placed before any candidate is tested.
pub const SEED_PRIME: u64 = 3;

/// Ordered, append-only list of primes found so far.
///
/// Elements are strictly increasing. The enumerator is the only writer; once a
/// run finishes the list is handed out by value or borrowed as a slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrimeList {
    primes: Vec<u64>,
}

impl PrimeList {
    pub fn new() -> Self {
        Self { primes: Vec::new() }
    }

    pub(crate) fn push(&mut self, prime: u64) {
        debug_assert!(
            self.primes.last().map_or(true, |&last| last < prime),
            "prime list must stay strictly increasing"
        );
        self.primes.push(prime);
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn last(&self) -> Option<u64> {
        self.primes.last().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.primes
    }

    pub fn contains(&self, value: u64) -> bool {
        self.primes.binary_search(&value).is_ok()
    }

    /// Number of listed primes that are `<= value`.
    pub fn count_up_to(&self, value: u64) -> usize {
        self.primes.partition_point(|&p| p <= value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.primes.iter()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.primes
    }
}

impl<'a> IntoIterator for &'a PrimeList {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

/// One element of the lazy prime sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    /// Zero-based position in the sequence; the seed is index 0.
    pub index: usize,
    pub prime: u64,
    pub milestone: bool,
}

impl Discovery {
    pub fn count(&self) -> usize {
        self.index + 1
    }

    pub fn as_milestone(&self) -> Option<Milestone> {
        self.milestone.then(|| Milestone {
            count: self.count(),
            prime: self.prime,
        })
    }
}

/// Progress notification: `count` primes have been found and `prime` is the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub count: usize,
    pub prime: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationSummary {
    pub upper_bound: u64,
    pub milestone_interval: u64,
    pub primes_found: usize,
    pub largest_prime: Option<u64>,
    pub milestones_emitted: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u128,
}
