use heavy_hitters_sketch::{HeavyHittersSketch, Threshold};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut sketch = HeavyHittersSketch::with_seed(0.001, 0.01, 123).unwrap();

    // Simulate skewed key-value traffic: a handful of keys dominate the
    // stream, the rest form a long tail.
    for _ in 0..100_000 {
        let key = if rng.gen_bool(0.4) {
            format!("user:{}", rng.gen_range(0..5))
        } else {
            format!("user:{}", rng.gen_range(5..10_000))
        };
        sketch.add(&key);
    }

    println!(
        "saw {} insertions over {} distinct keys",
        sketch.total(),
        sketch.observed_keys()
    );

    // Keys estimated above 1% of all traffic are cache-promotion candidates.
    let mut hot: Vec<String> = sketch
        .keys_by_percentage(0.01, Threshold::Above)
        .into_iter()
        .collect();
    hot.sort_by_key(|key| std::cmp::Reverse(sketch.estimate(key)));

    println!("hot keys (>1% of traffic):");
    for key in hot {
        println!("  {:<12} ~{}", key, sketch.estimate(&key));
    }
}
