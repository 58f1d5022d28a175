//! Lazy enumeration of the complete orderings compatible with a partial
//! order over majorities: the cartesian product, in tier order, of every
//! permutation of each tie tier.

use crate::Majority;

/// The number of complete orderings for the given tie-tier sizes, i.e. the
/// product of the factorials of the sizes. Saturates at `u128::MAX`.
pub(crate) fn total_orderings(tier_sizes: impl Iterator<Item = usize>) -> u128 {
    let mut total: u128 = 1;
    for n in tier_sizes {
        total = total.saturating_mul(factorial(n));
    }
    total
}

fn factorial(n: usize) -> u128 {
    let mut f: u128 = 1;
    for k in 2..=n as u128 {
        f = f.saturating_mul(k);
    }
    f
}

/// Iterator over every complete ordering: one permutation of each tier,
/// concatenated in tier order. Exactly `total_orderings` items are produced,
/// one at a time, so a caller can stop early without having materialized
/// anything else.
///
/// An empty tier list yields exactly one, empty, ordering.
pub(crate) struct CompleteOrderings<'a> {
    tiers: &'a [Vec<Majority>],
    // Odometer over per-tier permutation indices, each in [0, n_i!).
    counters: Vec<u128>,
    limits: Vec<u128>,
    done: bool,
}

impl<'a> CompleteOrderings<'a> {
    pub fn new(tiers: &'a [Vec<Majority>]) -> CompleteOrderings<'a> {
        let limits: Vec<u128> = tiers.iter().map(|t| factorial(t.len())).collect();
        CompleteOrderings {
            tiers,
            counters: vec![0; tiers.len()],
            limits,
            done: false,
        }
    }
}

impl<'a> Iterator for CompleteOrderings<'a> {
    type Item = Vec<Majority>;

    fn next(&mut self) -> Option<Vec<Majority>> {
        if self.done {
            return None;
        }
        let total_len: usize = self.tiers.iter().map(|t| t.len()).sum();
        let mut ordering: Vec<Majority> = Vec::with_capacity(total_len);
        for (tier, &k) in self.tiers.iter().zip(self.counters.iter()) {
            append_nth_permutation(tier, k, &mut ordering);
        }
        // Advance the odometer, last tier fastest.
        self.done = true;
        for i in (0..self.counters.len()).rev() {
            self.counters[i] += 1;
            if self.counters[i] < self.limits[i] {
                self.done = false;
                break;
            }
            self.counters[i] = 0;
        }
        Some(ordering)
    }
}

// Decodes `k` (in [0, n!)) through the factorial number system into the k-th
// permutation of `items` and appends it to `out`.
fn append_nth_permutation(items: &[Majority], mut k: u128, out: &mut Vec<Majority>) {
    let mut pool: Vec<Majority> = items.to_vec();
    for remaining in (1..=items.len()).rev() {
        let f = factorial(remaining - 1);
        let idx = (k / f) as usize;
        k %= f;
        out.push(pool.remove(idx));
    }
}
