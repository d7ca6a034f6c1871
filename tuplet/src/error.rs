use thiserror::Error;

#[allow(unused_imports)] // To link with documentation
use crate::{weak::WeakRef, Tuplet};

/// The errors produced by this crate.
///
/// Every variant describes a contract violation by the caller. Nothing here is retried or
/// recovered from internally: the error is returned as soon as the violation is detected, before
/// any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// A required argument was not supplied. The payload names the argument.
    #[error("required argument `{0}` was not supplied")]
    MissingArgument(&'static str),
    /// A [`WeakRef`] was asked for its target after that target had been reclaimed.
    #[error("the target of the weak reference has been reclaimed")]
    TargetReclaimed,
    /// A [`Tuplet`] was built from a sequence whose length does not match its arity.
    #[error("a tuplet of arity {expected} cannot be built from {found} elements")]
    Arity {
        /// The flattened arity of the tuplet being built.
        expected: usize,
        /// The number of elements supplied.
        found: usize,
    },
}
