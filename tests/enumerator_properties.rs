use proptest::prelude::*;
use trial_primes::core::enumerator::is_prime_by_trial;
use trial_primes::{CollectingSink, EnumerationEngine, EnumerationSettings, PrimeEnumerator};

fn is_prime_naive(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

proptest! {
    #[test]
    fn sequence_is_strictly_increasing_and_prime(bound in 3u64..20_000) {
        let primes = PrimeEnumerator::with_bounds(bound, 1).unwrap().collect_all();

        prop_assert_eq!(primes.as_slice()[0], 3);
        prop_assert!(primes.as_slice().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(primes.iter().all(|&p| is_prime_naive(p) && p <= bound));
    }

    #[test]
    fn no_odd_prime_is_skipped(bound in 3u64..5_000) {
        let primes = PrimeEnumerator::with_bounds(bound, 1).unwrap().collect_all();
        let expected: Vec<u64> = (3..=bound).filter(|&n| is_prime_naive(n)).collect();
        prop_assert_eq!(primes.into_vec(), expected);
    }

    #[test]
    fn milestones_fire_at_exact_multiples(bound in 3u64..20_000, interval in 1u64..200) {
        let discoveries: Vec<_> = PrimeEnumerator::with_bounds(bound, interval).unwrap().collect();

        for (index, discovery) in discoveries.iter().enumerate() {
            prop_assert_eq!(discovery.index, index);
            prop_assert_eq!(discovery.milestone, (index as u64 + 1) % interval == 0);
        }

        let mut engine = EnumerationEngine::new(CollectingSink::default());
        engine.run(&EnumerationSettings::new(bound, interval)).unwrap();
        let expected: Vec<u64> = discoveries
            .iter()
            .filter(|d| d.milestone)
            .map(|d| d.prime)
            .collect();
        prop_assert_eq!(engine.sink().primes(), expected);
    }

    #[test]
    fn trial_division_agrees_with_naive_test(candidate in (2u64..500_000).prop_map(|n| n * 2 + 1)) {
        let divisors = PrimeEnumerator::with_bounds(1_000, 1).unwrap().collect_all();
        prop_assert_eq!(is_prime_by_trial(divisors.as_slice(), candidate), is_prime_naive(candidate));
    }
}

#[test]
fn seed_only_when_bound_is_three() {
    for interval in 2..10 {
        let mut engine = EnumerationEngine::new(CollectingSink::default());
        let summary = engine.run(&EnumerationSettings::new(3, interval)).unwrap();
        assert_eq!(summary.primes_found, 1);
        assert!(engine.sink().milestones().is_empty());
    }
}
