// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types shared by scales, binning, calendar bucketing and drag sessions.

use thiserror::Error;

/// Errors reported by `vizlet_charts`.
///
/// Scale and geometry builders recover from most of these locally (returning a midpoint,
/// an empty band set, or an empty path) and only log a warning; calendar range errors are
/// propagated to the caller.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A continuous domain has zero width (`min == max`).
    #[error("degenerate domain: min and max are both {0}")]
    DegenerateDomain(DomainValue),
    /// A band scale was built over an empty key set.
    #[error("band scale requires at least one key")]
    EmptyKeySet,
    /// A date range ends before it starts.
    #[error("invalid date range: end date is before start date")]
    InvalidRange,
    /// Binning was requested over an empty (or entirely non-finite) sample set, or over a
    /// domain with a non-finite end.
    #[error("cannot bin: no finite samples or a non-finite domain")]
    EmptyBinDomain,
    /// A drag gesture was started while another one is still active.
    #[error("a drag gesture is already in progress")]
    DragInProgress,
}

/// A domain endpoint carried by [`Error::DegenerateDomain`].
///
/// Wraps an `f64` so the error type can stay `Eq` (the payload is compared bitwise).
#[derive(Clone, Copy, Debug)]
pub struct DomainValue(pub f64);

impl PartialEq for DomainValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for DomainValue {}

impl core::fmt::Display for DomainValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result alias for fallible `vizlet_charts` operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
