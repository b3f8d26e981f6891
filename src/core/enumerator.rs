use crate::core::ConfigProvider;
use crate::domain::model::{Discovery, Milestone, PrimeList, SEED_PRIME};
use crate::utils::error::Result;
use crate::utils::validation::validate_at_least;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratorState {
    Running,
    Done,
}

/// Trial-division test of an odd `candidate` against the ascending `primes`.
///
/// Stops at the first prime whose square exceeds the candidate. An overflowing
/// square is treated as exceeding it.
pub fn is_prime_by_trial(primes: &[u64], candidate: u64) -> bool {
    for &p in primes {
        if p.checked_mul(p).map_or(true, |square| square > candidate) {
            return true;
        }
        if candidate % p == 0 {
            return false;
        }
    }
    true
}

/// Lazy, finite enumeration of odd primes starting at 3.
///
/// Each pull tests odd candidates until one is prime or the next candidate
/// would pass `upper_bound`. After that the enumerator is `Done` for good.
#[derive(Debug)]
pub struct PrimeEnumerator {
    primes: PrimeList,
    candidate: u64,
    upper_bound: u64,
    milestone_interval: u64,
    state: EnumeratorState,
}

impl PrimeEnumerator {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_bounds(config.upper_bound(), config.milestone_interval())
    }

    pub fn with_bounds(upper_bound: u64, milestone_interval: u64) -> Result<Self> {
        validate_at_least("upper_bound", upper_bound, SEED_PRIME)?;
        validate_at_least("milestone_interval", milestone_interval, 1)?;

        Ok(Self {
            primes: PrimeList::new(),
            candidate: SEED_PRIME,
            upper_bound,
            milestone_interval,
            state: EnumeratorState::Running,
        })
    }

    pub fn state(&self) -> EnumeratorState {
        self.state
    }

    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    pub fn milestone_interval(&self) -> u64 {
        self.milestone_interval
    }

    /// Primes found so far.
    pub fn primes(&self) -> &PrimeList {
        &self.primes
    }

    pub fn into_primes(self) -> PrimeList {
        self.primes
    }

    /// Drains the enumerator and returns every prime it found.
    pub fn collect_all(mut self) -> PrimeList {
        while self.next().is_some() {}
        self.primes
    }

    /// Drains the enumerator, calling `on_milestone` for each milestone as it
    /// is reached. The first error from the callback ends the run.
    pub fn for_each_milestone<F>(mut self, mut on_milestone: F) -> Result<PrimeList>
    where
        F: FnMut(Milestone) -> Result<()>,
    {
        while let Some(discovery) = self.next() {
            if let Some(milestone) = discovery.as_milestone() {
                on_milestone(milestone)?;
            }
        }
        Ok(self.primes)
    }

    fn record(&mut self, prime: u64) -> Discovery {
        self.primes.push(prime);
        let count = self.primes.len();
        Discovery {
            index: count - 1,
            prime,
            milestone: count as u64 % self.milestone_interval == 0,
        }
    }
}

impl Iterator for PrimeEnumerator {
    type Item = Discovery;

    fn next(&mut self) -> Option<Discovery> {
        if self.primes.is_empty() {
            return Some(self.record(SEED_PRIME));
        }

        while self.state == EnumeratorState::Running {
            let candidate = match self.candidate.checked_add(2) {
                Some(next) if next <= self.upper_bound => next,
                _ => {
                    self.state = EnumeratorState::Done;
                    break;
                }
            };
            self.candidate = candidate;

            if is_prime_by_trial(self.primes.as_slice(), candidate) {
                return Some(self.record(candidate));
            }
        }
        None
    }
}

impl std::iter::FusedIterator for PrimeEnumerator {}
