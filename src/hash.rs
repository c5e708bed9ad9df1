use rand::Rng;

/// Smallest prime above 2^32, the modulus of the row hash family.
pub(crate) const LARGE_PRIME: u64 = 4_294_967_311;

/// DJB2 rolling hash over the key's bytes.
///
/// Fixed seed 5381, fold each byte in via `h = h * 33 + byte`, wrapping.
/// Deterministic for a given byte sequence, so the same key always lands in
/// the same column of every row.
pub(crate) fn hash_key(key: &str) -> u64 {
    let mut hash: u64 = 5381;
    for &byte in key.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
    }
    hash
}

/// Coefficients of one row's hash function.
///
/// A row maps a 64-bit key hash `h` to the column `((a*h + b) mod P) mod
/// width` where `P` is a fixed prime just above 2^32. Drawing `a` and `b`
/// uniformly at random gives a pairwise-independent family: any two distinct
/// key hashes collide in a row with probability about `1/width`.
///
/// Rows are normally drawn internally from the sketch's seed. Constructing
/// them explicitly (via [`RowHash::new`]) pins the column mapping exactly,
/// which is how reproducible setups and forced-collision tests are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowHash {
    a: u64,
    b: u64,
}

impl RowHash {
    /// Creates a row with explicit coefficients.
    pub fn new(a: u64, b: u64) -> Self {
        Self { a, b }
    }

    /// Draws a row uniformly from the family: `a` in `[1, P)`, `b` in `[0, P)`.
    pub(crate) fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            a: rng.gen_range(1..LARGE_PRIME),
            b: rng.gen_range(0..LARGE_PRIME),
        }
    }

    /// Column for the given key hash in a row of `width` counters.
    ///
    /// The product `a * h` can exceed 64 bits, so the reduction runs in
    /// 128-bit arithmetic.
    pub(crate) fn column(&self, hash: u64, width: usize) -> usize {
        let folded = (u128::from(self.a) * u128::from(hash) + u128::from(self.b))
            % u128::from(LARGE_PRIME);
        (folded % width as u128) as usize
    }
}
