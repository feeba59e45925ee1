//! Selection of the eigenpairs with the smallest non-zero magnitude.

/// Number of eigenvectors kept for the embedding. The third and fourth are blended into the
/// first two on request; unsigned graphs often need the third to separate their layout.
pub const EMBEDDING_COMPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedEigenpair {
    /// Index of the eigenpair in the decomposition.
    pub index: usize,
    /// `|eigenvalue|`.
    pub magnitude: f64,
}

/// Selected eigenpairs sorted by ascending magnitude; trailing slots stay `None` when the
/// decomposition has fewer non-zero eigenvalues than slots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EigenSelection {
    pub slots: [Option<SelectedEigenpair>; EMBEDDING_COMPONENTS],
}

impl EigenSelection {
    pub fn indices(&self) -> [Option<usize>; EMBEDDING_COMPONENTS] {
        self.slots.map(|s| s.map(|p| p.index))
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn offer(&mut self, mut candidate: SelectedEigenpair) {
        for slot in &mut self.slots {
            match slot {
                None => {
                    // Slots are sorted at every step, so the candidate can only land in the
                    // first free slot; carrying on would place it a second time.
                    *slot = Some(candidate);
                    return;
                }
                Some(held) if held.magnitude > candidate.magnitude => {
                    // Displace and keep cascading the previous holder to the right.
                    candidate = std::mem::replace(held, candidate);
                }
                // Ties keep the first-seen eigenpair.
                Some(_) => {}
            }
        }
    }
}

/// Absolute zero threshold for a matrix whose largest diagonal entry is `max_diagonal`.
///
/// Rounding noise on the trivial eigenvalue grows with the norm of the Laplacian, so the
/// tolerance is scaled by `max(1, max_diagonal)`. A tolerance of `0.0` stays `0.0`.
pub fn zero_threshold(zero_tolerance: f64, max_diagonal: f64) -> f64 {
    let scale = if max_diagonal.is_finite() {
        max_diagonal.max(1.0)
    } else {
        1.0
    };
    zero_tolerance * scale
}

/// Picks the [`EMBEDDING_COMPONENTS`] eigenpairs with the smallest `|eigenvalue|`, skipping
/// eigenvalues with `|eigenvalue| <= threshold`. Exact zeros are skipped whatever the
/// threshold. Candidates are scanned in index order and equal magnitudes never displace each
/// other, so the result is deterministic.
pub fn select_smallest_nonzero(values: &[f64], threshold: f64) -> EigenSelection {
    let mut selection = EigenSelection::default();
    for (index, value) in values.iter().enumerate() {
        let magnitude = value.abs();
        if magnitude == 0.0 || magnitude <= threshold {
            continue;
        }
        selection.offer(SelectedEigenpair { index, magnitude });
    }
    tracing::trace!(?selection, "selected eigenpairs");
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitudes(sel: &EigenSelection) -> Vec<f64> {
        sel.slots.iter().flatten().map(|p| p.magnitude).collect()
    }

    #[test]
    fn selects_smallest_non_zero_magnitudes_with_first_seen_ties() {
        let sel = select_smallest_nonzero(&[0.0, 0.1, 0.1, 0.05, 3.0, -2.0], 0.0);
        assert_eq!(magnitudes(&sel), vec![0.05, 0.1, 0.1, 2.0]);
        // 0.05 pushes the first 0.1 (index 1) past the equal index 2, which never moves.
        assert_eq!(sel.indices(), [Some(3), Some(2), Some(1), Some(5)]);
    }

    #[test]
    fn never_selects_an_index_twice() {
        let sel = select_smallest_nonzero(&[0.5, 0.4, 0.3, 0.2, 0.1, 0.05], 0.0);
        assert_eq!(sel.indices(), [Some(5), Some(4), Some(3), Some(2)]);
    }

    #[test]
    fn leaves_trailing_slots_empty_when_short_of_candidates() {
        let sel = select_smallest_nonzero(&[0.0, 2.0, 0.0], 0.0);
        assert_eq!(sel.indices(), [Some(1), None, None, None]);
        assert_eq!(sel.filled(), 1);

        let empty = select_smallest_nonzero(&[], 0.0);
        assert_eq!(empty.filled(), 0);
    }

    #[test]
    fn zero_tolerance_skips_numerical_noise() {
        let values = [1e-15, -3e-16, 2.0, 2.0, 4.0];
        let exact = select_smallest_nonzero(&values, 0.0);
        assert_eq!(exact.indices(), [Some(1), Some(0), Some(2), Some(3)]);

        let tolerant = select_smallest_nonzero(&values, 1e-9);
        assert_eq!(tolerant.indices(), [Some(2), Some(3), Some(4), None]);
    }

    #[test]
    fn exact_zeros_are_skipped_even_with_a_negative_threshold() {
        let sel = select_smallest_nonzero(&[0.0, -0.0, 3.0, 1e-17], -1.0);
        assert_eq!(sel.indices(), [Some(3), Some(2), None, None]);
    }

    #[test]
    fn zero_threshold_grows_with_the_largest_degree() {
        assert_eq!(zero_threshold(1e-9, 0.0), 1e-9);
        assert_eq!(zero_threshold(1e-9, 0.5), 1e-9);
        assert_eq!(zero_threshold(1e-9, 2e9), 2.0);
        assert_eq!(zero_threshold(0.0, 2e9), 0.0);
        assert_eq!(zero_threshold(1e-9, f64::INFINITY), 1e-9);

        // Trivial eigenvalue noise of a path weighted 1e9 against its smallest real eigenvalue.
        let values = [3.35e-7, 6.165e6, 2.46e7, 5.5e7, 9.8e7];
        let sel = select_smallest_nonzero(&values, zero_threshold(1e-9, 2e9));
        assert_eq!(sel.indices(), [Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn slots_stay_sorted_by_magnitude() {
        let values = [9.0, -1.0, 7.0, 3.0, 0.0, -2.0, 8.0, 1.0, 5.0];
        let sel = select_smallest_nonzero(&values, 0.0);
        let m = magnitudes(&sel);
        assert!(m.windows(2).all(|w| w[0] <= w[1]), "unsorted: {m:?}");
        assert_eq!(sel.indices(), [Some(1), Some(7), Some(5), Some(3)]);
    }
}
