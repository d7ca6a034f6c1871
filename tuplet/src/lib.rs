/*!
Three small, independent utilities:

- **[Tuplets](tuplets)**: immutable fixed-arity containers [`Tuplet1`] through [`Tuplet16`], plus
  the extension shape [`Tuplet17`] whose last slot holds another tuplet. Nesting through that slot
  represents any arity, and is transparent to formatting, hashing, structural comparison and
  serialization. The [`tuplet!`] macro builds the right shape from any number of elements.
- **[Weak-reference slots](weak)**: [`WeakRef`] tells apart a slot that was never given a target
  from one whose target has been reclaimed, and offers a get-or-create operation that caches the
  created value back into the slot. [`SharedWeakRef`] does the same for a slot shared between
  threads.
- **[Typed service lookup](service)**: [`ServiceProviderExt::service`] turns a lookup keyed by
  [`TypeId`](std::any::TypeId) into one keyed by a type parameter.

## Quick reference

| You have | You want | Use |
| :------- | :------- | :-- |
| Values `a, b, c, …` | A tuplet of them | [`tuplet!(a, b, c, …)`](tuplet!) |
| A tuplet `t` | Its *i*th element | `t.item1()` … `t.item16()`, then `t.rest()` |
| A tuplet `t` | `(a, b, c, …)` as a string | `t.to_string()` |
| An `Arc<T>` | A weak slot for it | [`WeakRef::from(&arc)`](WeakRef) |
| A `WeakRef<T>` | Its target, if alive | [`try_get_target`](WeakRef::try_get_target) |
| A `WeakRef<T>` | Its target, or a new one cached in the slot | [`get_or_set_target`](WeakRef::get_or_set_target) |
| A [`ServiceProvider`] | The service of type `T` | [`provider.service::<T>()`](ServiceProviderExt::service) |

## Logging

Weak-slot refills, reclaimed-target failures and service lookup misses are reported through
[`tracing`](https://docs.rs/tracing) at `trace` and `debug` level. The crate never installs a
subscriber.

## Features

- `serde`: implement `Serialize` and `Deserialize` for every tuplet, as one flat tuple of all its
  elements.
*/

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
// Documentation configuration
#![forbid(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate derivative;

pub mod service;
pub mod tuplets;
pub mod weak;

mod error;

pub use error::Error;
pub use service::{ServiceProvider, ServiceProviderExt, ServiceRegistry};
pub use tuplets::*;
pub use weak::{SharedWeakRef, WeakRef, WeakState};

/// The prelude module for quickly getting started.
///
/// This module is designed to be imported as `use tuplet::prelude::*;`, which brings into scope
/// the traits whose methods callers need and the macro for building tuplets.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::service::{ServiceProvider, ServiceProviderExt};
    #[doc(no_inline)]
    pub use crate::tuplet;
    #[doc(no_inline)]
    pub use crate::tuplets::{StructuralEquatable, Tuplet};
    #[doc(no_inline)]
    pub use crate::weak::WeakRef;
}
