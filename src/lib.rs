//! Count-min heavy-hitters sketch.
//!
//! This crate tracks, in bounded counter memory, approximately how often each
//! distinct key has been seen in a stream of insertions, and answers batch
//! queries of the form "which keys have an estimated frequency above (or
//! below) this threshold?". It is intended as a building block for key-value
//! stores that want to spot hot keys for caching or load-balancing decisions
//! without keeping an exact counter per key.
//!
//! The estimator is the classic count-min rule: each insertion increments one
//! counter per row (rows hash independently via a pairwise-independent hash
//! family), and a key's estimate is the minimum over its row counters.
//! Estimates never undercount; collisions only ever inflate them, with the
//! overcount governed by the accuracy parameters chosen at construction.
//!
//! ```
//! use heavy_hitters_sketch::{HeavyHittersSketch, Threshold};
//!
//! let mut sketch = HeavyHittersSketch::with_seed(0.01, 0.01, 42).unwrap();
//! for _ in 0..100 {
//!     sketch.add("popular");
//! }
//! sketch.add("rare");
//!
//! assert_eq!(sketch.total(), 101);
//! assert!(sketch.keys_by_value(50, Threshold::Above).contains("popular"));
//! ```
//!
//! The sketch remembers every distinct key ever inserted so that threshold
//! queries can enumerate candidates; the counter matrix is bounded but the
//! observed-key set is not. See [`HeavyHittersSketch`] for details.

mod error;
mod hash;
mod sketch;

pub use error::SketchError;
pub use hash::RowHash;
pub use sketch::{HeavyHittersSketch, Threshold};
