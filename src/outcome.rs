//! # Per-task outcome records.
//!
//! [`Settled`] is the tagged result stored for every index under the settle-all policy:
//! either the produced value or the failure reason, never an unset state.
//!
//! ## Example
//! ```rust
//! use taskclamp::Settled;
//!
//! let ok: Settled<u32, &str> = Ok(1).into();
//! let err: Settled<u32, &str> = Err("boom").into();
//!
//! assert!(ok.is_fulfilled());
//! assert_eq!(err.reason(), Some(&"boom"));
//! assert_eq!(ok.as_label(), "fulfilled");
//! ```

/// Terminal outcome of one task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settled<T, E> {
    /// Task produced a value.
    Fulfilled(T),
    /// Task failed with a reason.
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    /// Returns `true` for [`Settled::Fulfilled`].
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    /// Returns `true` for [`Settled::Rejected`].
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settled::Rejected(_))
    }

    /// Returns the value, if fulfilled.
    pub fn value(&self) -> Option<&T> {
        match self {
            Settled::Fulfilled(v) => Some(v),
            Settled::Rejected(_) => None,
        }
    }

    /// Returns the failure reason, if rejected.
    pub fn reason(&self) -> Option<&E> {
        match self {
            Settled::Fulfilled(_) => None,
            Settled::Rejected(e) => Some(e),
        }
    }

    /// Converts into a plain `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Settled::Fulfilled(v) => Ok(v),
            Settled::Rejected(e) => Err(e),
        }
    }

    /// Returns the status tag (`"fulfilled"` / `"rejected"`) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Settled::Fulfilled(_) => "fulfilled",
            Settled::Rejected(_) => "rejected",
        }
    }
}

impl<T, E> From<Result<T, E>> for Settled<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Settled::Fulfilled(v),
            Err(e) => Settled::Rejected(e),
        }
    }
}
