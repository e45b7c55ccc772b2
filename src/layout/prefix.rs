//! Fenwick tree (Binary Indexed Tree) for prefix sums over pixel sizes.
//!
//! Stored 1-indexed in a contiguous `Vec<f64>` of length `n + 1` (index 0
//! unused). Sums are accumulated in `f64` so integral pixel sizes stay exact
//! well past any realistic sheet height.
//!
//! | Operation | Time |
//! |-----------|------|
//! | `from_values` / `rebuild` | O(n) |
//! | `add` / `set` | O(log n) |
//! | `sum_before` | O(log n) |
//! | `locate` | O(log n) |

/// Prefix-sum tree over item sizes.
#[derive(Debug, Clone, Default)]
pub struct PrefixSums {
    /// 1-indexed tree storage. `tree[0]` is unused.
    tree: Vec<f64>,
    /// Number of elements.
    n: usize,
}

impl PrefixSums {
    /// Build from an initial array of sizes in O(n).
    pub fn from_values(values: &[f32]) -> Self {
        let mut sums = Self {
            tree: Vec::new(),
            n: 0,
        };
        sums.rebuild(values);
        sums
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Rebuild the tree from fresh values using parent propagation.
    pub fn rebuild(&mut self, values: &[f32]) {
        self.n = values.len();
        self.tree.clear();
        self.tree.push(0.0);
        self.tree.extend(values.iter().map(|&v| f64::from(v)));

        for i in 1..=self.n {
            let parent = i + lowbit(i);
            if parent > self.n {
                continue;
            }
            let child = self.tree.get(i).copied().unwrap_or(0.0);
            if let Some(slot) = self.tree.get_mut(parent) {
                *slot += child;
            }
        }
    }

    /// Add `delta` to element `i` (0-indexed). Out-of-range indices are ignored.
    pub fn add(&mut self, i: usize, delta: f64) {
        if i >= self.n {
            return;
        }
        let mut idx = i + 1;
        while idx <= self.n {
            if let Some(slot) = self.tree.get_mut(idx) {
                *slot += delta;
            }
            idx += lowbit(idx);
        }
    }

    /// Sum of elements `[0, count)`. `count` is clamped to `len()`.
    pub fn sum_before(&self, count: usize) -> f64 {
        let mut sum = 0.0;
        let mut idx = count.min(self.n);
        while idx > 0 {
            sum += self.tree.get(idx).copied().unwrap_or(0.0);
            idx -= lowbit(idx);
        }
        sum
    }

    /// Sum of all elements.
    pub fn total(&self) -> f64 {
        self.sum_before(self.n)
    }

    /// Number of leading elements whose total is `<= target`.
    ///
    /// For a scroll offset this is the index of the item under the offset
    /// (items are half-open spans `[start, start + size)`), or `len()` when
    /// the offset lies past the end.
    pub fn locate(&self, target: f64) -> usize {
        if self.n == 0 || target < 0.0 {
            return 0;
        }
        let mut pos = 0usize;
        let mut remaining = target;
        let mut bit_mask = most_significant_bit(self.n);

        while bit_mask > 0 {
            let next = pos + bit_mask;
            if next <= self.n {
                let node = self.tree.get(next).copied().unwrap_or(f64::INFINITY);
                if node <= remaining {
                    remaining -= node;
                    pos = next;
                }
            }
            bit_mask >>= 1;
        }
        pos
    }
}

/// Lowest set bit of `x`. E.g., `lowbit(6) = 2`, `lowbit(4) = 4`.
#[inline]
fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Most significant bit that fits within `n`.
#[inline]
fn most_significant_bit(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << (usize::BITS - 1 - n.leading_zeros())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn sums_match_naive_prefixes() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let sums = PrefixSums::from_values(&values);
        let mut naive = 0.0;
        for i in 0..=values.len() {
            assert_eq!(sums.sum_before(i), naive, "prefix mismatch at {i}");
            if let Some(v) = values.get(i) {
                naive += f64::from(*v);
            }
        }
        assert_eq!(sums.total(), 31.0);
    }

    #[test]
    fn add_updates_later_prefixes_only() {
        let mut sums = PrefixSums::from_values(&[10.0; 6]);
        sums.add(2, 5.0);
        assert_eq!(sums.sum_before(2), 20.0);
        assert_eq!(sums.sum_before(3), 35.0);
        assert_eq!(sums.total(), 65.0);
        sums.add(99, 1.0);
        assert_eq!(sums.total(), 65.0);
    }

    #[test]
    fn locate_finds_item_under_offset() {
        // Spans: [0,20) [20,50) [50,60) [60,100) [100,125)
        let sums = PrefixSums::from_values(&[20.0, 30.0, 10.0, 40.0, 25.0]);
        assert_eq!(sums.locate(0.0), 0);
        assert_eq!(sums.locate(19.5), 0);
        assert_eq!(sums.locate(20.0), 1);
        assert_eq!(sums.locate(59.0), 2);
        assert_eq!(sums.locate(60.0), 3);
        assert_eq!(sums.locate(124.0), 4);
        assert_eq!(sums.locate(125.0), 5);
        assert_eq!(sums.locate(-3.0), 0);
    }

    #[test]
    fn empty_tree_is_inert() {
        let sums = PrefixSums::from_values(&[]);
        assert!(sums.is_empty());
        assert_eq!(sums.total(), 0.0);
        assert_eq!(sums.locate(10.0), 0);
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut sums = PrefixSums::from_values(&[1.0, 2.0, 3.0]);
        sums.rebuild(&[5.0, 5.0]);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums.total(), 10.0);
    }
}
