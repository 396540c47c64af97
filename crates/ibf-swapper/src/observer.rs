//! Observers notified of swapper membership changes.

use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::appraiser::SwapperItem;

/// Listener for items entering and leaving a swapper.
///
/// Notifications are delivered synchronously in registration order, after
/// the swapper state is consistent. On a swap the observer sees the added
/// item first, then the evicted one. A rejected item produces no
/// notification.
pub trait SwapperObserver<I: SwapperItem>: Debug {
    /// Called when an item became a member.
    fn item_added(&self, item: &I);

    /// Called when a member was evicted or removed.
    fn item_removed(&self, item: &I);
}

/// Registration token returned by `Swapper::add_observer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Registered observers in registration order.
pub(crate) struct ObserverList<I: SwapperItem> {
    observers: Vec<(ObserverId, Rc<dyn SwapperObserver<I>>)>,
    next_id: u64,
}

impl<I: SwapperItem> ObserverList<I> {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, observer: Rc<dyn SwapperObserver<I>>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn fire_added(&self, item: &I) {
        for (_, observer) in &self.observers {
            observer.item_added(item);
        }
    }

    pub(crate) fn fire_removed(&self, item: &I) {
        for (_, observer) in &self.observers {
            observer.item_removed(item);
        }
    }
}

impl<I: SwapperItem> Debug for ObserverList<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|(id, _)| id))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl SwapperObserver<i32> for Recorder {
        fn item_added(&self, item: &i32) {
            self.events.borrow_mut().push(format!("+{}", item));
        }

        fn item_removed(&self, item: &i32) {
            self.events.borrow_mut().push(format!("-{}", item));
        }
    }

    #[test]
    fn test_fire_in_registration_order() {
        let first = Rc::new(Recorder::default());
        let second = Rc::new(Recorder::default());
        let mut list: ObserverList<i32> = ObserverList::new();
        list.add(first.clone());
        list.add(second.clone());

        list.fire_added(&4);
        list.fire_removed(&2);

        assert_eq!(*first.events.borrow(), vec!["+4", "-2"]);
        assert_eq!(*second.events.borrow(), vec!["+4", "-2"]);
    }

    #[test]
    fn test_remove_stops_notifications() {
        let recorder = Rc::new(Recorder::default());
        let mut list: ObserverList<i32> = ObserverList::new();
        let id = list.add(recorder.clone());

        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert_eq!(list.len(), 0);

        list.fire_added(&1);
        assert!(recorder.events.borrow().is_empty());
    }
}
