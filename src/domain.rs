//! Per-node color domains stored as bitset rows.
//!
//! Row `v` holds the colors still allowed for node `v`, one bit per color. All rows
//! share the same width (the number of colors the search started with) and live in
//! one flat `Vec<u64>`, so snapshotting a domain for a new search frame is a single
//! allocation plus `memcpy`.

use thiserror::Error;

const WORD_BITS: usize = 64;

#[inline(always)]
const fn words_for(colors: usize) -> usize {
    colors.div_ceil(WORD_BITS)
}

/// Some node has no color left: the partial assignment cannot be completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("domain wipe-out")]
pub struct Infeasible;

// ============================================================================
// Domain
// ============================================================================

/// Node → set of still-allowed colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    bits: Vec<u64>,
    words: usize,
    nodes: usize,
    colors: usize,
}

impl Domain {
    /// Every node may take any color in `0..colors`.
    pub fn full(nodes: usize, colors: usize) -> Self {
        let words = words_for(colors);
        let mut row = vec![u64::MAX; words];
        if let Some(last) = row.last_mut() {
            *last = low_mask(colors - (words - 1) * WORD_BITS);
        }
        let mut bits = Vec::with_capacity(nodes * words);
        for _ in 0..nodes {
            bits.extend_from_slice(&row);
        }
        Self {
            bits,
            words,
            nodes,
            colors,
        }
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Row width: colors are drawn from `0..color_capacity()`.
    #[inline(always)]
    pub fn color_capacity(&self) -> usize {
        self.colors
    }

    #[inline(always)]
    fn row(&self, node: usize) -> &[u64] {
        debug_assert!(node < self.nodes);
        &self.bits[node * self.words..(node + 1) * self.words]
    }

    #[inline(always)]
    fn row_mut(&mut self, node: usize) -> &mut [u64] {
        debug_assert!(node < self.nodes);
        &mut self.bits[node * self.words..(node + 1) * self.words]
    }

    /// Returns whether `color` is still allowed for `node`.
    #[inline]
    pub fn contains(&self, node: usize, color: usize) -> bool {
        color < self.colors && (self.row(node)[color / WORD_BITS] >> (color % WORD_BITS)) & 1 != 0
    }

    /// Number of colors left for `node`.
    #[inline]
    pub fn size(&self, node: usize) -> usize {
        self.row(node).iter().map(|w| w.count_ones() as usize).sum()
    }

    /// The only color left for `node`, if exactly one remains.
    #[inline]
    pub fn single(&self, node: usize) -> Option<usize> {
        let mut found = None;
        for (i, &w) in self.row(node).iter().enumerate() {
            if w == 0 {
                continue;
            }
            if found.is_some() || w.count_ones() != 1 {
                return None;
            }
            found = Some(i * WORD_BITS + w.trailing_zeros() as usize);
        }
        found
    }

    /// Iterates the colors left for `node` in ascending order.
    pub fn colors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(node)
            .iter()
            .enumerate()
            .flat_map(|(i, &w)| Bits(w).map(move |b| i * WORD_BITS + b))
    }

    /// Removes `color` from `node`; returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, node: usize, color: usize) -> bool {
        if color >= self.colors {
            return false;
        }
        let mask = 1u64 << (color % WORD_BITS);
        let word = &mut self.row_mut(node)[color / WORD_BITS];
        let present = *word & mask != 0;
        *word &= !mask;
        present
    }

    /// Forces `node` to the singleton `{color}`.
    pub fn assign(&mut self, node: usize, color: usize) {
        debug_assert!(color < self.colors);
        let row = self.row_mut(node);
        row.fill(0);
        row[color / WORD_BITS] = 1u64 << (color % WORD_BITS);
    }

    /// Drops every color `>= bound` from every row.
    ///
    /// # Errors
    /// Returns [`Infeasible`] if some row ends up empty.
    pub fn restrict_below(&mut self, bound: usize) -> Result<(), Infeasible> {
        if bound >= self.colors {
            return if (0..self.nodes).any(|v| self.size(v) == 0) {
                Err(Infeasible)
            } else {
                Ok(())
            };
        }

        let full_words = bound / WORD_BITS;
        let tail = low_mask(bound % WORD_BITS);
        let mut feasible = true;
        for row in self.bits.chunks_exact_mut(self.words) {
            if let Some(w) = row.get_mut(full_words) {
                *w &= tail;
            }
            for w in row.iter_mut().skip(full_words + 1) {
                *w = 0;
            }
            feasible &= row.iter().any(|&w| w != 0);
        }
        if feasible { Ok(()) } else { Err(Infeasible) }
    }

    /// Marks every color that is some node's only remaining color.
    ///
    /// These are the colors already committed somewhere in the graph.
    pub fn committed_colors(&self) -> Vec<bool> {
        let mut used = vec![false; self.colors];
        for v in 0..self.nodes {
            if let Some(c) = self.single(v) {
                used[c] = true;
            }
        }
        used
    }

    /// Returns the coloring if every node is down to a single color.
    pub fn assignment(&self) -> Option<Vec<usize>> {
        (0..self.nodes).map(|v| self.single(v)).collect()
    }
}

/// Mask with the lowest `n` bits set (`n <= 64`).
#[inline(always)]
const fn low_mask(n: usize) -> u64 {
    if n >= WORD_BITS { u64::MAX } else { (1u64 << n) - 1 }
}

/// Iterator over set bit positions of a word, lowest first.
struct Bits(u64);

impl Iterator for Bits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let b = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(b)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_domain_allows_every_color() {
        for colors in [0, 1, 5, 63, 64, 65, 130] {
            let d = Domain::full(3, colors);
            for v in 0..3 {
                assert_eq!(d.size(v), colors);
                assert_eq!(d.colors(v).collect::<Vec<_>>(), (0..colors).collect::<Vec<_>>());
            }
            assert!(!d.contains(0, colors));
        }
    }

    #[test]
    fn assign_makes_singleton() {
        let mut d = Domain::full(2, 100);
        d.assign(1, 70);
        assert_eq!(d.single(1), Some(70));
        assert_eq!(d.size(1), 1);
        assert_eq!(d.single(0), None);
        assert_eq!(d.size(0), 100);
    }

    #[test]
    fn single_handles_colors_across_words() {
        let mut d = Domain::full(1, 128);
        for c in 0..128 {
            if c != 3 && c != 90 {
                d.remove(0, c);
            }
        }
        assert_eq!(d.single(0), None);
        d.remove(0, 3);
        assert_eq!(d.single(0), Some(90));
        d.remove(0, 90);
        assert_eq!(d.single(0), None);
        assert_eq!(d.size(0), 0);
    }

    #[test]
    fn remove_reports_presence() {
        let mut d = Domain::full(1, 4);
        assert!(d.remove(0, 2));
        assert!(!d.remove(0, 2));
        assert!(!d.remove(0, 9));
        assert_eq!(d.colors(0).collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn restrict_below_trims_every_row() {
        let mut d = Domain::full(3, 70);
        d.restrict_below(66).unwrap();
        assert_eq!(d.size(0), 66);
        assert!(d.contains(2, 65));
        assert!(!d.contains(2, 66));

        d.restrict_below(3).unwrap();
        assert_eq!(d.colors(1).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn restrict_below_detects_wipe_out() {
        let mut d = Domain::full(2, 5);
        d.assign(1, 4);
        assert_eq!(d.restrict_below(4), Err(Infeasible));

        let mut d = Domain::full(2, 5);
        assert_eq!(d.restrict_below(0), Err(Infeasible));
    }

    #[test]
    fn restrict_below_at_capacity_is_noop() {
        let mut d = Domain::full(2, 5);
        let before = d.clone();
        d.restrict_below(5).unwrap();
        d.restrict_below(50).unwrap();
        assert_eq!(d, before);
    }

    #[test]
    fn committed_colors_and_assignment() {
        let mut d = Domain::full(3, 4);
        d.assign(0, 2);
        d.assign(2, 0);
        assert_eq!(d.committed_colors(), vec![true, false, true, false]);
        assert_eq!(d.assignment(), None);
        d.assign(1, 1);
        assert_eq!(d.assignment(), Some(vec![2, 1, 0]));
    }
}
