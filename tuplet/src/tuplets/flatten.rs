//! Element-wise views of a tuplet, used to see through extension slots.
//!
//! Each trait here walks a tuplet's elements *without* the framing its standalone impl would add
//! (parentheses, a debug name, a sequence header). A tuplet in an extension slot is asked for its
//! elements through these traits, so it contributes them to the outer tuplet's list. These traits
//! are implemented by `impl_tuplets!` and are not meant to be used directly.

use std::{any::Any, fmt};

#[cfg(feature = "serde")]
use {
    serde_crate::de::{self, Deserialize, SeqAccess, Visitor},
    serde_crate::ser::SerializeTuple,
    std::marker::PhantomData,
};

#[cfg(feature = "serde")]
use super::Tuplet;

/// Write the elements as a `", "`-separated list, with no enclosing parentheses.
pub trait DisplayElements {
    /// Write the elements to `f`.
    fn fmt_elements(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Add the elements as fields of an enclosing debug tuple.
pub trait DebugElements {
    /// Add each element to `tuple`.
    fn debug_elements(&self, tuple: &mut fmt::DebugTuple<'_, '_>);
}

/// Collect references to the elements, in order.
pub trait Elements {
    /// Push a reference to each element onto `out`.
    fn push_elements<'a>(&'a self, out: &mut Vec<&'a dyn Any>);
}

/// Serialize the elements into an enclosing tuple.
#[cfg(feature = "serde")]
pub trait SerializeElements {
    /// Serialize each element into `seq`.
    fn serialize_elements<S: SerializeTuple>(&self, seq: &mut S) -> Result<(), S::Error>;
}

/// Deserialize the elements from an enclosing sequence.
#[cfg(feature = "serde")]
pub trait DeserializeElements<'de>: Sized {
    /// Read this tuplet's elements from `seq`. `offset` is the index of the first of them within
    /// the whole sequence, and `arity` the length of the whole sequence; both are only used to
    /// report a short sequence.
    fn deserialize_elements<A: SeqAccess<'de>>(
        seq: &mut A,
        offset: usize,
        arity: usize,
    ) -> Result<Self, A::Error>;
}

/// Read the element at `index`, failing with `invalid_length` if the sequence ended early.
#[cfg(feature = "serde")]
pub fn next_element<'de, A, T>(seq: &mut A, index: usize, arity: usize) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, &ExpectedArity(arity)))
}

#[cfg(feature = "serde")]
struct ExpectedArity(usize);

#[cfg(feature = "serde")]
impl de::Expected for ExpectedArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a tuplet of {} elements", self.0)
    }
}

/// The visitor behind every tuplet's `Deserialize` impl.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy)]
pub struct TupletVisitor<T>(PhantomData<T>);

#[cfg(feature = "serde")]
impl<T> TupletVisitor<T> {
    /// Create a visitor for the tuplet type `T`.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        TupletVisitor(PhantomData)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> Visitor<'de> for TupletVisitor<T>
where
    T: Tuplet + DeserializeElements<'de>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        de::Expected::fmt(&ExpectedArity(T::ARITY), f)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
        T::deserialize_elements(&mut seq, 0, T::ARITY)
    }
}
