//! The tuplet family: immutable, fixed-arity, heterogeneous containers.
//!
//! Rust has no variadic generics, so the family is closed: [`Tuplet1`] through [`Tuplet16`] hold
//! that many elements directly, and [`Tuplet17`] holds sixteen elements followed by an *extension
//! slot* containing another tuplet. Nesting through the extension slot represents any arity.
//!
//! The extension slot is transparent. A tuplet of thirty-three elements built as
//! `Tuplet17<.., Tuplet17<.., Tuplet1<_>>>` displays, debugs, hashes and serializes exactly as a
//! flat list of thirty-three elements would. A tuplet stored in an ordinary slot is an opaque
//! element and keeps its own parentheses.
//!
//! The [`tuplet!`](crate::tuplet!) macro picks the right shape for any number of elements:
//!
//! ```
//! use tuplet::tuplet;
//!
//! let t = tuplet!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18);
//! assert_eq!(t.to_string(), "(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18)");
//! assert_eq!(t.rest().item2(), &18);
//! ```
//!
//! A seventeenth element that is not itself a tuplet is rejected at compile time:
//!
//! ```compile_fail
//! use tuplet::Tuplet17;
//!
//! let _: Tuplet17<i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32> =
//!     Tuplet17::new(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17);
//! ```
//!
//! At runtime, homogeneous tuplets can be built from a `Vec`, which fails with
//! [`Error::Arity`](crate::Error::Arity) when the length is wrong:
//!
//! ```
//! use std::convert::TryFrom;
//! use tuplet::{Error, Tuplet3};
//!
//! assert_eq!(
//!     Tuplet3::<char, char, char>::try_from(vec!['a', 'b', 'c']),
//!     Ok(Tuplet3::new('a', 'b', 'c')),
//! );
//! assert_eq!(
//!     Tuplet3::<char, char, char>::try_from(vec!['a']),
//!     Err(Error::Arity { expected: 3, found: 1 }),
//! );
//! ```

#[doc(hidden)]
pub mod flatten;
mod structural;

pub use structural::{ElementComparer, StructuralEquatable};

/// The number of elements a tuplet can hold directly. Past this, the last slot must be the
/// extension slot.
pub const MAX_FLAT_ARITY: usize = 16;

/// Every member of the tuplet family.
///
/// This trait is sealed: it is implemented for [`Tuplet1`] through [`Tuplet17`] and cannot be
/// implemented outside this crate.
pub trait Tuplet: sealed::Sealed + Sized {
    /// The number of elements, counting through extension slots.
    const ARITY: usize;

    /// The number of direct slots, counting an extension slot as one.
    const FLAT_ARITY: usize;
}

tuplet_macro::impl_tuplets!(16);

include!(concat!(env!("OUT_DIR"), "/ceiling.rs"));

/// Build a tuplet of any length from a list of expressions.
///
/// Up to [`MAX_FLAT_ARITY`] elements produce the flat tuplet of that arity. Longer lists produce a
/// [`Tuplet17`] whose extension slot holds a tuplet of the remaining elements, recursively.
///
/// # Examples
///
/// ```
/// use tuplet::{tuplet, Tuplet, Tuplet2};
///
/// assert_eq!(tuplet!("a", 1), Tuplet2::new("a", 1));
///
/// let long = tuplet!(
///     1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
///     17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32,
///     33,
/// );
/// fn arity<T: Tuplet>(_: &T) -> usize {
///     T::ARITY
/// }
/// assert_eq!(arity(&long), 33);
/// ```
#[macro_export]
macro_rules! tuplet {
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr, $t13:expr, $t14:expr, $t15:expr, $t16:expr, $($rest:expr),+ $(,)?) => {
        $crate::Tuplet17::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12, $t13, $t14, $t15, $t16, $crate::tuplet!($($rest),+))
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr, $t13:expr, $t14:expr, $t15:expr, $t16:expr $(,)?) => {
        $crate::Tuplet16::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12, $t13, $t14, $t15, $t16)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr, $t13:expr, $t14:expr, $t15:expr $(,)?) => {
        $crate::Tuplet15::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12, $t13, $t14, $t15)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr, $t13:expr, $t14:expr $(,)?) => {
        $crate::Tuplet14::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12, $t13, $t14)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr, $t13:expr $(,)?) => {
        $crate::Tuplet13::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12, $t13)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr, $t12:expr $(,)?) => {
        $crate::Tuplet12::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11, $t12)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr, $t11:expr $(,)?) => {
        $crate::Tuplet11::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10, $t11)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr, $t10:expr $(,)?) => {
        $crate::Tuplet10::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9, $t10)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr, $t9:expr $(,)?) => {
        $crate::Tuplet9::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8, $t9)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr, $t8:expr $(,)?) => {
        $crate::Tuplet8::new($t1, $t2, $t3, $t4, $t5, $t6, $t7, $t8)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr, $t7:expr $(,)?) => {
        $crate::Tuplet7::new($t1, $t2, $t3, $t4, $t5, $t6, $t7)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr, $t6:expr $(,)?) => {
        $crate::Tuplet6::new($t1, $t2, $t3, $t4, $t5, $t6)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr, $t5:expr $(,)?) => {
        $crate::Tuplet5::new($t1, $t2, $t3, $t4, $t5)
    };
    ($t1:expr, $t2:expr, $t3:expr, $t4:expr $(,)?) => {
        $crate::Tuplet4::new($t1, $t2, $t3, $t4)
    };
    ($t1:expr, $t2:expr, $t3:expr $(,)?) => {
        $crate::Tuplet3::new($t1, $t2, $t3)
    };
    ($t1:expr, $t2:expr $(,)?) => {
        $crate::Tuplet2::new($t1, $t2)
    };
    ($t1:expr $(,)?) => {
        $crate::Tuplet1::new($t1)
    };
}

mod sealed {
    pub trait Sealed {}
}
