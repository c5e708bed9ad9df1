use heavy_hitters_sketch::{HeavyHittersSketch, Threshold};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Skewed workload: key `hot-{i}` for small `i` appears far more often than
/// the long tail, roughly zipfian over `distinct` keys.
fn skewed_keys(inserts: usize, distinct: usize, rng: &mut StdRng) -> Vec<String> {
    (0..inserts)
        .map(|_| {
            // Squaring a uniform draw biases toward low indices.
            let u: f64 = rng.gen();
            let index = ((u * u) * distinct as f64) as usize;
            format!("hot-{}", index.min(distinct - 1))
        })
        .collect()
}

fn exact_counts(keys: &[String]) -> HashMap<&str, u64> {
    let mut exact: HashMap<&str, u64> = HashMap::new();
    for key in keys {
        *exact.entry(key).or_insert(0) += 1;
    }
    exact
}

#[test]
fn estimates_never_undercount() {
    let mut rng = StdRng::seed_from_u64(1337);
    let keys = skewed_keys(20_000, 500, &mut rng);
    let exact = exact_counts(&keys);

    let mut sketch = HeavyHittersSketch::with_seed(0.01, 0.01, 42).unwrap();
    for key in &keys {
        sketch.add(key);
    }

    assert_eq!(sketch.total(), 20_000);
    assert_eq!(sketch.observed_keys(), exact.len());
    for (key, &count) in &exact {
        let estimate = sketch.estimate(key);
        assert!(
            estimate >= count,
            "key {key} undercounted: estimate {estimate}, exact {count}"
        );
    }
}

#[test]
fn above_queries_never_miss_a_truly_heavy_key() {
    let mut rng = StdRng::seed_from_u64(2024);
    let keys = skewed_keys(30_000, 300, &mut rng);
    let exact = exact_counts(&keys);

    let mut sketch = HeavyHittersSketch::with_seed(0.005, 0.01, 7).unwrap();
    for key in &keys {
        sketch.add(key);
    }

    // Estimates only ever exceed true counts, so any key truly above the
    // cutoff must also estimate above it.
    let cutoff = 500;
    let hot = sketch.keys_by_value(cutoff, Threshold::Above);
    for (key, &count) in &exact {
        if count > cutoff {
            assert!(hot.contains(*key), "heavy key {key} ({count}) missing");
        }
    }
}

#[test]
fn below_query_results_are_truly_light() {
    let mut rng = StdRng::seed_from_u64(99);
    let keys = skewed_keys(15_000, 400, &mut rng);
    let exact = exact_counts(&keys);

    let mut sketch = HeavyHittersSketch::with_seed(0.01, 0.01, 5).unwrap();
    for key in &keys {
        sketch.add(key);
    }

    // estimate < cutoff and exact <= estimate, so every returned key's true
    // count sits under the cutoff too.
    let cutoff = 200;
    for key in sketch.keys_by_value(cutoff, Threshold::Below) {
        let count = exact[key.as_str()];
        assert!(count < cutoff, "key {key} ({count}) is not below {cutoff}");
    }
}

#[test]
fn percentage_and_value_queries_agree_at_scale() {
    let mut rng = StdRng::seed_from_u64(4242);
    let keys = skewed_keys(10_000, 250, &mut rng);

    let mut sketch = HeavyHittersSketch::with_seed(0.01, 0.05, 11).unwrap();
    for key in &keys {
        sketch.add(key);
    }

    for fraction in [0.001, 0.01, 0.05, 0.2] {
        let cutoff = (fraction * sketch.total() as f64).ceil() as u64;
        assert_eq!(
            sketch.keys_by_percentage(fraction, Threshold::Above),
            sketch.keys_by_value(cutoff, Threshold::Above)
        );
        assert_eq!(
            sketch.keys_by_percentage(fraction, Threshold::Below),
            sketch.keys_by_value(cutoff, Threshold::Below)
        );
    }
}

#[test]
fn seeded_sketches_replay_identically() {
    let mut rng = StdRng::seed_from_u64(8);
    let keys = skewed_keys(5_000, 100, &mut rng);

    let mut first = HeavyHittersSketch::with_expected_inserts_seeded(0.02, 5_000, 31).unwrap();
    let mut second = HeavyHittersSketch::with_expected_inserts_seeded(0.02, 5_000, 31).unwrap();
    for key in &keys {
        first.add(key);
        second.add(key);
    }

    for i in 0..100 {
        let key = format!("hot-{i}");
        assert_eq!(first.estimate(&key), second.estimate(&key));
    }
    for threshold in [Threshold::Above, Threshold::Below] {
        assert_eq!(
            first.keys_by_value(50, threshold),
            second.keys_by_value(50, threshold)
        );
        assert_eq!(
            first.keys_by_percentage(0.01, threshold),
            second.keys_by_percentage(0.01, threshold)
        );
    }
}

#[test]
fn overcount_stays_within_the_configured_bound() {
    let mut rng = StdRng::seed_from_u64(77);
    let keys = skewed_keys(20_000, 200, &mut rng);
    let exact = exact_counts(&keys);

    // epsilon = 0.005 bounds the overcount by epsilon * total = 100 per key,
    // with failure probability gamma = 0.01 per key. Allow a few outliers
    // rather than asserting the probabilistic bound holds everywhere.
    let mut sketch = HeavyHittersSketch::with_seed(0.005, 0.01, 21).unwrap();
    for key in &keys {
        sketch.add(key);
    }

    let bound = (0.005 * sketch.total() as f64) as u64;
    let mut violations = 0;
    for (key, &count) in &exact {
        if sketch.estimate(key) > count + bound {
            violations += 1;
        }
    }
    assert!(
        violations <= exact.len() / 20,
        "{violations} of {} keys exceeded the error bound",
        exact.len()
    );
}
