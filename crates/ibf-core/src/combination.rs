//! SOP combinations and the parts they decompose into.

use std::fmt;

use smallvec::SmallVec;

/// Index of a leg within the trip.
pub type LegId = usize;

/// Index of a scheduling option within its leg.
pub type SopId = usize;

/// One scheduling option on one leg; the atomic unit of usage tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SopPart {
    pub leg: LegId,
    pub sop: SopId,
}

impl SopPart {
    #[inline]
    pub const fn new(leg: LegId, sop: SopId) -> Self {
        SopPart { leg, sop }
    }
}

impl fmt::Display for SopPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.leg, self.sop)
    }
}

/// A full itinerary candidate: one SOP index per leg.
///
/// The empty combination is the reserved sentinel and never enters the
/// swapper.
///
/// # Examples
///
/// ```
/// use ibf_core::{SopCombination, SopPart};
///
/// let comb = SopCombination::from_sops([3, 7]);
/// assert_eq!(comb.legs_count(), 2);
///
/// let parts: Vec<SopPart> = comb.parts().collect();
/// assert_eq!(parts, vec![SopPart::new(0, 3), SopPart::new(1, 7)]);
/// assert!(SopCombination::default().is_empty());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SopCombination {
    sops: SmallVec<[SopId; 4]>,
}

impl SopCombination {
    /// Creates a combination from the SOP chosen on each leg, in leg order.
    pub fn from_sops(sops: impl IntoIterator<Item = SopId>) -> Self {
        SopCombination {
            sops: sops.into_iter().collect(),
        }
    }

    /// Returns the SOP chosen on the given leg, if the leg exists.
    pub fn sop(&self, leg: LegId) -> Option<SopId> {
        self.sops.get(leg).copied()
    }

    pub fn legs_count(&self) -> usize {
        self.sops.len()
    }

    /// Returns true for the sentinel combination.
    pub fn is_empty(&self) -> bool {
        self.sops.is_empty()
    }

    /// SOP indices in leg order.
    pub fn sops(&self) -> &[SopId] {
        &self.sops
    }

    /// Decomposes the combination into its `(leg, sop)` parts.
    pub fn parts(&self) -> impl Iterator<Item = SopPart> + '_ {
        self.sops
            .iter()
            .enumerate()
            .map(|(leg, &sop)| SopPart::new(leg, sop))
    }
}

impl fmt::Debug for SopCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SopCombination{}", self)
    }
}

impl fmt::Display for SopCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, sop) in self.sops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", sop)?;
        }
        f.write_str(")")
    }
}

impl From<Vec<SopId>> for SopCombination {
    fn from(sops: Vec<SopId>) -> Self {
        SopCombination::from_sops(sops)
    }
}

impl<const N: usize> From<[SopId; N]> for SopCombination {
    fn from(sops: [SopId; N]) -> Self {
        SopCombination::from_sops(sops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parts_follow_leg_order() {
        let comb = SopCombination::from([4, 0, 2]);
        let parts: Vec<_> = comb.parts().collect();
        assert_eq!(
            parts,
            vec![SopPart::new(0, 4), SopPart::new(1, 0), SopPart::new(2, 2)]
        );
    }

    #[test]
    fn test_value_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(SopCombination::from([1, 2]));
        assert!(set.contains(&SopCombination::from(vec![1, 2])));
        assert!(!set.contains(&SopCombination::from([2, 1])));
    }

    #[test]
    fn test_sentinel() {
        assert!(SopCombination::default().is_empty());
        assert!(!SopCombination::from([0]).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SopCombination::from([3, 11])), "(3, 11)");
        assert_eq!(format!("{}", SopPart::new(1, 5)), "1:5");
    }

    #[test]
    fn test_sop_lookup() {
        let comb = SopCombination::from([9, 8]);
        assert_eq!(comb.sop(1), Some(8));
        assert_eq!(comb.sop(2), None);
    }
}
