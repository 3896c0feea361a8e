// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Histogram binning.
//!
//! Thresholds are a uniform subdivision of the domain (not data-driven quantiles), so the same
//! domain and bin count always produce the same bin boundaries.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{Error, Result};

/// A single histogram bucket.
///
/// Bins are left-inclusive and right-exclusive, except the last bin of a histogram which also
/// includes its upper bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Inclusive lower bound.
    pub lower_bound: f64,
    /// Upper bound (exclusive unless this is the last bin).
    pub upper_bound: f64,
    /// Number of samples in the bin.
    pub count: usize,
}

impl Bin {
    /// Midpoint of the bin bounds.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower_bound + self.upper_bound)
    }
}

/// Returns the `(min, max)` of the finite values in `values`.
///
/// Returns [`Error::EmptyBinDomain`] if there are no finite values.
pub fn sample_domain(values: &[f64]) -> Result<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Ok((min, max))
    } else {
        Err(Error::EmptyBinDomain)
    }
}

/// Partitions `values` into `bin_count` contiguous bins spanning `domain`.
///
/// - `bin_count` is clamped to at least 1.
/// - Values outside `domain` and non-finite values are dropped.
/// - A degenerate domain yields zero-width bins; every in-domain value lands in the first bin.
///
/// Returns [`Error::EmptyBinDomain`] if `values` holds no finite samples or either end of
/// `domain` is not finite.
pub fn bin(values: &[f64], domain: (f64, f64), bin_count: usize) -> Result<Vec<Bin>> {
    if !values.iter().any(|v| v.is_finite()) {
        return Err(Error::EmptyBinDomain);
    }
    if !domain.0.is_finite() || !domain.1.is_finite() {
        log::warn!("cannot bin over non-finite domain [{}, {}]", domain.0, domain.1);
        return Err(Error::EmptyBinDomain);
    }
    let (lo, hi) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    let n = bin_count.max(1);
    let step = (hi - lo) / n as f64;

    // An overflowing span still has finite thresholds when interpolated from the ends.
    let thresholds: Vec<f64> = (0..=n)
        .map(|k| {
            if k == n {
                hi
            } else if step.is_finite() {
                lo + step * k as f64
            } else {
                let f = k as f64 / n as f64;
                lo * (1.0 - f) + hi * f
            }
        })
        .collect();
    let mut bins: Vec<Bin> = thresholds
        .windows(2)
        .map(|w| Bin {
            lower_bound: w[0],
            upper_bound: w[1],
            count: 0,
        })
        .collect();

    let mut dropped = 0_usize;
    for &v in values {
        if !v.is_finite() || v < lo || v > hi {
            dropped += 1;
            continue;
        }
        let index = bin_index(v, lo, step, &thresholds);
        bins[index].count += 1;
    }
    if dropped > 0 {
        log::debug!("binning dropped {dropped} samples outside [{lo}, {hi}]");
    }
    Ok(bins)
}

/// Finds the bin for an in-domain value, reconciling the arithmetic guess with the thresholds
/// so boundary values follow the left-inclusive rule exactly.
fn bin_index(v: f64, lo: f64, step: f64, thresholds: &[f64]) -> usize {
    let last = thresholds.len() - 2;
    if step <= 0.0 {
        return 0;
    }
    let guess = ((v - lo) / step).floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "v is inside the domain, so the guess is finite and non-negative"
    )]
    let mut index = (guess.max(0.0) as usize).min(last);
    while index > 0 && v < thresholds[index] {
        index -= 1;
    }
    while index < last && v >= thresholds[index + 1] {
        index += 1;
    }
    index
}

/// Returns the largest bin count (0 for an empty slice).
pub fn max_count(bins: &[Bin]) -> usize {
    bins.iter().map(|b| b.count).max().unwrap_or(0)
}
