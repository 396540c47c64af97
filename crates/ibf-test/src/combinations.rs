//! Combination helpers.

use ibf_core::{SopCombination, SopId};

/// Builds a combination from the SOP chosen on each leg.
pub fn comb(sops: &[SopId]) -> SopCombination {
    SopCombination::from_sops(sops.iter().copied())
}

/// Every combination of `sops_per_leg[leg]` SOPs per leg, in lexicographic
/// order of SOP indices.
///
/// ```
/// use ibf_test::{comb, grid};
///
/// let all = grid(&[2, 2]);
/// assert_eq!(all, vec![comb(&[0, 0]), comb(&[0, 1]), comb(&[1, 0]), comb(&[1, 1])]);
/// ```
pub fn grid(sops_per_leg: &[usize]) -> Vec<SopCombination> {
    let mut rows: Vec<Vec<SopId>> = vec![Vec::new()];
    for &count in sops_per_leg {
        rows = rows
            .into_iter()
            .flat_map(|row| {
                (0..count).map(move |sop| {
                    let mut next = row.clone();
                    next.push(sop);
                    next
                })
            })
            .collect();
    }
    if sops_per_leg.is_empty() {
        return Vec::new();
    }
    rows.iter().map(|row| comb(row)).collect()
}
