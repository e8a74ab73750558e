//! Random selection helpers.
//!
//! RULE: the renderer never calls the platform RNG. Both caches draw from
//! their own deterministic stream, derived from the single master seed the
//! owner passes at construction. Two streams, two stable slots:
//!   - Sampling which buildings show markers never perturbs which marker
//!     each building shows, and vice versa.
//!   - A given seed replays the exact same marker choreography, which is
//!     what makes the randomized behavior assertable in tests.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stream slot for the visible-sample cache.
pub const SAMPLER_STREAM: u64 = 0;
/// Stream slot for the zot-choice cache.
pub const CHOOSER_STREAM: u64 = 1;

/// Derive a stream from the master seed and a stable slot index. The slot
/// assignments above must never be reordered.
pub fn stream(master_seed: u64, slot: u64) -> Pcg64Mcg {
    let derived = master_seed ^ slot.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    Pcg64Mcg::seed_from_u64(derived)
}

/// Up to `k` items drawn uniformly WITHOUT replacement (shuffle-and-take,
/// never repeated independent picks, which could duplicate). Returns all
/// items when `k >= items.len()`; order is arbitrary.
pub fn random_sample<T, R>(items: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng,
{
    items.choose_multiple(rng, k).cloned().collect()
}

/// One item uniformly at random, or `None` from an empty slice.
pub fn random_choice<T, R>(items: &[T], rng: &mut R) -> Option<T>
where
    T: Copy,
    R: Rng,
{
    items.choose(rng).copied()
}
