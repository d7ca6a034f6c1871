//! Weak-reference slots that distinguish "never set" from "reclaimed".
//!
//! A [`std::sync::Weak`] on its own cannot tell a caller whether it never pointed anywhere or
//! whether its target has since been dropped. [`WeakRef`] records which, so that
//! [`get_target`](WeakRef::get_target) can treat the first as an ordinary empty answer and the
//! second as an error:
//!
//! ```
//! use std::sync::Arc;
//! use tuplet::{Error, WeakRef};
//!
//! let empty = WeakRef::<String>::empty();
//! assert_eq!(empty.get_target(), Ok(None));
//!
//! let target = Arc::new(String::from("alive"));
//! let slot = WeakRef::from(&target);
//! assert_eq!(slot.get_target(), Ok(Some(target.clone())));
//!
//! drop(target);
//! assert_eq!(slot.get_target(), Err(Error::TargetReclaimed));
//! ```
//!
//! The free functions in this module accept the slot (and the factory, where there is one) as an
//! [`Option`], for callers that hold a slot which may itself be missing. A missing slot or factory
//! is reported as [`Error::MissingArgument`] before anything else happens.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::Error;

/// An owned weak slot: empty, or pointing at a target that may or may not still be alive.
///
/// Holding a `WeakRef` never keeps its target alive. The target lives exactly as long as some
/// [`Arc`] to it does.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), Default(bound = ""))]
pub struct WeakRef<T: ?Sized> {
    slot: Slot<T>,
}

#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), Default(bound = ""))]
enum Slot<T: ?Sized> {
    #[derivative(Default)]
    Empty,
    Set(Weak<T>),
}

/// A snapshot of what a [`WeakRef`] points at.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = "T: std::fmt::Debug"))]
pub enum WeakState<T: ?Sized> {
    /// The slot was never given a target, or was cleared.
    Empty,
    /// The target is alive; this holds a strong reference to it.
    Live(Arc<T>),
    /// The slot was given a target, which has since been dropped.
    Reclaimed,
}

impl<T: ?Sized> WeakState<T> {
    /// The live target, if there is one.
    pub fn live(self) -> Option<Arc<T>> {
        match self {
            WeakState::Live(target) => Some(target),
            WeakState::Empty | WeakState::Reclaimed => None,
        }
    }
}

impl<T: ?Sized> WeakRef<T> {
    /// Create a slot pointing at `target`, or an empty slot if there is no target.
    pub fn new(target: Option<&Arc<T>>) -> Self {
        match target {
            Some(target) => WeakRef::from(target),
            None => WeakRef::empty(),
        }
    }

    /// Create an empty slot.
    pub fn empty() -> Self {
        WeakRef { slot: Slot::Empty }
    }

    /// What this slot currently points at.
    pub fn state(&self) -> WeakState<T> {
        match &self.slot {
            Slot::Empty => WeakState::Empty,
            Slot::Set(weak) => match weak.upgrade() {
                Some(target) => WeakState::Live(target),
                None => WeakState::Reclaimed,
            },
        }
    }

    /// Whether the slot has a live target.
    pub fn is_alive(&self) -> bool {
        match &self.slot {
            Slot::Empty => false,
            Slot::Set(weak) => weak.strong_count() > 0,
        }
    }

    /// The target, if the slot has a live one. Never fails.
    pub fn try_get_target(&self) -> Option<Arc<T>> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Set(weak) => weak.upgrade(),
        }
    }

    /// The target of this slot.
    ///
    /// Returns `Ok(None)` for an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetReclaimed`] if the slot was given a target that has since been
    /// dropped.
    pub fn get_target(&self) -> Result<Option<Arc<T>>, Error> {
        match self.state() {
            WeakState::Empty => Ok(None),
            WeakState::Live(target) => Ok(Some(target)),
            WeakState::Reclaimed => {
                tracing::debug!("weak reference target requested after it was reclaimed");
                Err(Error::TargetReclaimed)
            }
        }
    }

    /// The live target of this slot, or else a new target from `factory`, which is stored back
    /// into this slot.
    ///
    /// `factory` is called only if there is no live target, and then exactly once. It may return
    /// either a `T` or an `Arc<T>`. The slot only holds the new target weakly: keep the returned
    /// [`Arc`] to keep it cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use tuplet::WeakRef;
    ///
    /// let mut slot = WeakRef::<Vec<i32>>::empty();
    /// let first = slot.get_or_set_target(|| vec![1, 2, 3]);
    /// let second = slot.get_or_set_target(|| -> Vec<i32> { unreachable!() });
    /// assert!(std::sync::Arc::ptr_eq(&first, &second));
    /// ```
    pub fn get_or_set_target<F, V>(&mut self, factory: F) -> Arc<T>
    where
        F: FnOnce() -> V,
        V: Into<Arc<T>>,
    {
        if let Some(target) = self.try_get_target() {
            return target;
        }
        tracing::trace!(
            reclaimed = matches!(self.slot, Slot::Set(_)),
            "creating target for weak reference"
        );
        let target = factory().into();
        self.set_target(&target);
        target
    }

    /// Point this slot at `target`, replacing whatever it pointed at before.
    pub fn set_target(&mut self, target: &Arc<T>) {
        self.slot = Slot::Set(Arc::downgrade(target));
    }

    /// Empty this slot.
    pub fn clear(&mut self) {
        self.slot = Slot::Empty;
    }
}

impl<T: ?Sized> From<&Arc<T>> for WeakRef<T> {
    fn from(target: &Arc<T>) -> Self {
        WeakRef {
            slot: Slot::Set(Arc::downgrade(target)),
        }
    }
}

/// A [`WeakRef`] that can be shared between threads.
///
/// Every operation locks the slot for its duration. In particular,
/// [`get_or_set_target`](SharedWeakRef::get_or_set_target) runs its factory while holding the
/// lock, so concurrent callers that all find the slot without a live target still produce only one
/// new target between them.
///
/// # Deadlocks
///
/// The lock is not re-entrant. A factory passed to
/// [`get_or_set_target`](SharedWeakRef::get_or_set_target) must not call any method of the same
/// `SharedWeakRef`: doing so blocks forever. Other slots, including other `SharedWeakRef`s, may be
/// used freely.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Default(bound = ""))]
pub struct SharedWeakRef<T: ?Sized> {
    inner: Mutex<WeakRef<T>>,
}

impl<T: ?Sized> SharedWeakRef<T> {
    /// Create a shared slot pointing at `target`, or an empty one if there is no target.
    pub fn new(target: Option<&Arc<T>>) -> Self {
        SharedWeakRef::from(WeakRef::new(target))
    }

    /// What this slot currently points at.
    pub fn state(&self) -> WeakState<T> {
        self.inner.lock().state()
    }

    /// See [`WeakRef::try_get_target`].
    pub fn try_get_target(&self) -> Option<Arc<T>> {
        self.inner.lock().try_get_target()
    }

    /// See [`WeakRef::get_target`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetReclaimed`] if the slot's target has been dropped.
    pub fn get_target(&self) -> Result<Option<Arc<T>>, Error> {
        self.inner.lock().get_target()
    }

    /// See [`WeakRef::get_or_set_target`]. The factory runs at most once across all threads
    /// racing on this slot.
    ///
    /// # Deadlocks
    ///
    /// `factory` runs while this slot is locked, so it must not use this slot again, not even to
    /// read it. It may use any other slot:
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tuplet::SharedWeakRef;
    ///
    /// let base = Arc::new(10u32);
    /// let neighbour = SharedWeakRef::new(Some(&base));
    /// let slot = SharedWeakRef::<u32>::default();
    ///
    /// let derived = slot.get_or_set_target(|| {
    ///     neighbour.try_get_target().map_or(0, |base| *base + 1)
    /// });
    /// assert_eq!(*derived, 11);
    /// ```
    pub fn get_or_set_target<F, V>(&self, factory: F) -> Arc<T>
    where
        F: FnOnce() -> V,
        V: Into<Arc<T>>,
    {
        self.inner.lock().get_or_set_target(factory)
    }

    /// See [`WeakRef::set_target`].
    pub fn set_target(&self, target: &Arc<T>) {
        self.inner.lock().set_target(target)
    }

    /// See [`WeakRef::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Take the slot back out of its lock.
    pub fn into_inner(self) -> WeakRef<T> {
        self.inner.into_inner()
    }
}

impl<T: ?Sized> From<WeakRef<T>> for SharedWeakRef<T> {
    fn from(slot: WeakRef<T>) -> Self {
        SharedWeakRef {
            inner: Mutex::new(slot),
        }
    }
}

/// Create a slot pointing at `target`, or an empty slot if there is no target.
pub fn create<T: ?Sized>(target: Option<&Arc<T>>) -> WeakRef<T> {
    WeakRef::new(target)
}

/// The live target of `reference`, if `reference` is present and has one. Never fails.
pub fn try_get_target<T: ?Sized>(reference: Option<&WeakRef<T>>) -> Option<Arc<T>> {
    reference.and_then(WeakRef::try_get_target)
}

/// The target of `reference`; see [`WeakRef::get_target`].
///
/// # Errors
///
/// Returns [`Error::MissingArgument`] if `reference` is `None`, and [`Error::TargetReclaimed`] if
/// its target has been dropped.
pub fn get_target<T: ?Sized>(reference: Option<&WeakRef<T>>) -> Result<Option<Arc<T>>, Error> {
    reference
        .ok_or(Error::MissingArgument("reference"))?
        .get_target()
}

/// The live target of `reference`, or else a new one from `factory` stored back into it; see
/// [`WeakRef::get_or_set_target`].
///
/// # Errors
///
/// Returns [`Error::MissingArgument`] if either `reference` or `factory` is `None`. Both are
/// checked before the slot is looked at.
pub fn get_or_set_target<T, F, V>(
    reference: Option<&mut WeakRef<T>>,
    factory: Option<F>,
) -> Result<Arc<T>, Error>
where
    T: ?Sized,
    F: FnOnce() -> V,
    V: Into<Arc<T>>,
{
    let reference = reference.ok_or(Error::MissingArgument("reference"))?;
    let factory = factory.ok_or(Error::MissingArgument("factory"))?;
    Ok(reference.get_or_set_target(factory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_slot_is_empty_not_reclaimed() {
        let target = Arc::new(5);
        let mut slot = WeakRef::from(&target);
        slot.clear();
        assert!(matches!(slot.state(), WeakState::Empty));
        assert_eq!(slot.get_target(), Ok(None));
    }

    #[test]
    fn refilled_slot_reports_new_target() {
        let mut slot = WeakRef::from(&Arc::new(1));
        assert!(matches!(slot.state(), WeakState::Reclaimed));
        let replacement = Arc::new(2);
        slot.set_target(&replacement);
        assert_eq!(slot.state().live(), Some(replacement));
    }

    #[test]
    fn unsized_targets() {
        let target: Arc<str> = Arc::from("unsized");
        let mut slot = WeakRef::from(&target);
        assert_eq!(slot.try_get_target().as_deref(), Some("unsized"));
        drop(target);
        let made = slot.get_or_set_target(|| Arc::<str>::from("remade"));
        assert_eq!(&*made, "remade");
    }
}
