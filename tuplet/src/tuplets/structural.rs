use std::{
    any::Any,
    hash::{Hash, Hasher},
};

use super::{flatten::Elements, Tuplet};

/// An equality and hashing policy applied to tuplet elements one at a time.
///
/// Tuplets already implement [`PartialEq`] and [`Hash`] using each element's own impls. An
/// `ElementComparer` replaces those impls when comparing through
/// [`StructuralEquatable`], for instance to compare strings case-insensitively. Elements arrive
/// type-erased, so a comparer typically downcasts the element types it knows about.
///
/// The two methods must agree: elements the comparer considers equal must hash identically.
pub trait ElementComparer {
    /// Whether two elements in the same slot are equal.
    fn equals(&self, left: &dyn Any, right: &dyn Any) -> bool;

    /// Feed one element into `state`.
    fn hash(&self, element: &dyn Any, state: &mut dyn Hasher);
}

/// Equality and hashing of a tuplet under a caller-supplied [`ElementComparer`].
///
/// Elements are visited in flattened order, so extension slots are transparent here as everywhere
/// else.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use std::hash::{Hash, Hasher};
/// use tuplet::{tuplet, ElementComparer, StructuralEquatable};
///
/// struct IgnoreCase;
///
/// impl ElementComparer for IgnoreCase {
///     fn equals(&self, left: &dyn Any, right: &dyn Any) -> bool {
///         match (left.downcast_ref::<&str>(), right.downcast_ref::<&str>()) {
///             (Some(l), Some(r)) => l.eq_ignore_ascii_case(r),
///             _ => false,
///         }
///     }
///
///     fn hash(&self, element: &dyn Any, mut state: &mut dyn Hasher) {
///         if let Some(s) = element.downcast_ref::<&str>() {
///             s.to_ascii_lowercase().hash(&mut state);
///         }
///     }
/// }
///
/// assert!(tuplet!("Hello", "World").structural_eq(&tuplet!("hello", "WORLD"), &IgnoreCase));
/// ```
pub trait StructuralEquatable {
    /// References to every element, in flattened order.
    fn elements(&self) -> Vec<&dyn Any>;

    /// Whether every pair of corresponding elements is equal under `comparer`.
    fn structural_eq<C: ElementComparer + ?Sized>(&self, other: &Self, comparer: &C) -> bool;

    /// Hash every element through `comparer`, in order.
    fn structural_hash<C: ElementComparer + ?Sized, H: Hasher>(&self, comparer: &C, state: &mut H);
}

impl<T: Tuplet + Elements> StructuralEquatable for T {
    fn elements(&self) -> Vec<&dyn Any> {
        let mut out = Vec::with_capacity(T::ARITY);
        self.push_elements(&mut out);
        out
    }

    fn structural_eq<C: ElementComparer + ?Sized>(&self, other: &Self, comparer: &C) -> bool {
        self.elements()
            .into_iter()
            .zip(other.elements())
            .all(|(left, right)| ElementComparer::equals(comparer, left, right))
    }

    fn structural_hash<C: ElementComparer + ?Sized, H: Hasher>(&self, comparer: &C, state: &mut H) {
        T::ARITY.hash(state);
        for element in self.elements() {
            ElementComparer::hash(comparer, element, state);
        }
    }
}
