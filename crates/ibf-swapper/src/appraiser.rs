//! Appraiser capability and the blackboard used for cascading rescoring.

use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::marker::PhantomData;

use ibf_core::BasicAppraiserScore;

/// Bound for items tracked by the swapper.
///
/// `Default::default()` is the reserved sentinel and is never admitted.
pub trait SwapperItem: Clone + Eq + Hash + Debug + Default + 'static {}

impl<T> SwapperItem for T where T: Clone + Eq + Hash + Debug + Default + 'static {}

/// Upcast to `Any` so registered appraisers can be reached by concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A pluggable policy scoring items against one requirement.
///
/// The mediator calls [`rate`](Appraiser::rate) exactly once when an item is
/// admitted and [`retract`](Appraiser::retract) exactly once when it leaves.
/// Both may push new scores for *other* tracked items onto the blackboard;
/// the mediator applies them as soon as the call returns.
///
/// # Implementation Notes
///
/// - Rating an item twice, or retracting an item that was never rated, is a
///   programmer error: implementations panic.
/// - Never push a blackboard update for the item being rated or retracted.
/// - `is_satisfied` must be a pure query.
pub trait Appraiser<I: SwapperItem>: AsAny + Debug {
    /// Rates a newly admitted item.
    fn rate(&mut self, item: &I, blackboard: &mut Blackboard<I>) -> BasicAppraiserScore;

    /// Reacts to an item leaving the tracked set.
    fn retract(&mut self, item: &I, blackboard: &mut Blackboard<I>);

    /// Returns true when the requirement is met by the current items.
    fn is_satisfied(&self) -> bool;

    /// Human-readable description.
    fn describe(&self) -> String;
}

/// Stable index of a registered appraiser, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppraiserId(usize);

impl AppraiserId {
    pub(crate) const fn new(index: usize) -> Self {
        AppraiserId(index)
    }

    /// Registration index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AppraiserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed handle to an appraiser owned by a mediator.
pub struct AppraiserHandle<A> {
    id: AppraiserId,
    _marker: PhantomData<fn() -> A>,
}

impl<A> AppraiserHandle<A> {
    pub(crate) const fn new(id: AppraiserId) -> Self {
        AppraiserHandle {
            id,
            _marker: PhantomData,
        }
    }

    pub const fn id(&self) -> AppraiserId {
        self.id
    }
}

impl<A> Clone for AppraiserHandle<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for AppraiserHandle<A> {}

impl<A> Debug for AppraiserHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppraiserHandle")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<A>())
            .finish()
    }
}

/// Score edits one appraiser requests for other tracked items.
///
/// Each blackboard is bound to the appraiser whose call it was handed to,
/// so every edit is tagged with its origin.
#[derive(Debug)]
pub struct Blackboard<I> {
    appraiser: AppraiserId,
    updates: Vec<(I, BasicAppraiserScore)>,
}

impl<I> Blackboard<I> {
    pub(crate) fn new(appraiser: AppraiserId) -> Self {
        Blackboard {
            appraiser,
            updates: Vec::new(),
        }
    }

    /// Requests a new score for an already tracked item.
    pub fn update_value(&mut self, item: I, score: BasicAppraiserScore) {
        self.updates.push((item, score));
    }

    /// The appraiser this blackboard belongs to.
    pub fn appraiser(&self) -> AppraiserId {
        self.appraiser
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub(crate) fn into_updates(self) -> Vec<(I, BasicAppraiserScore)> {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackboard_collects_in_order() {
        let mut board: Blackboard<i32> = Blackboard::new(AppraiserId::new(2));
        assert!(board.is_empty());

        board.update_value(7, BasicAppraiserScore::must_have(1));
        board.update_value(9, BasicAppraiserScore::ignore());

        assert_eq!(board.appraiser().index(), 2);
        assert_eq!(board.len(), 2);
        assert_eq!(
            board.into_updates(),
            vec![
                (7, BasicAppraiserScore::must_have(1)),
                (9, BasicAppraiserScore::ignore())
            ]
        );
    }

    #[test]
    fn test_handle_is_copy() {
        let handle: AppraiserHandle<String> = AppraiserHandle::new(AppraiserId::new(1));
        let copy = handle;
        assert_eq!(handle.id(), copy.id());
        assert_eq!(format!("{}", copy.id()), "#1");
    }
}
