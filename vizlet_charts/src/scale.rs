// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Scales convert data values into screen coordinates:
//! - [`ScaleLinear`] maps a continuous domain onto a pixel range, optionally inverted for
//!   y axes where screen y grows downward.
//! - [`ScaleBand`] splits a pixel range into equal-width bands, one per category key.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{DomainValue, Error, Result};

/// Axis direction of a [`ScaleLinear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisDirection {
    /// `domain.0` maps to `range.0` (typical for x axes).
    Normal,
    /// `domain.0` maps to `range.1` (typical for y axes, where larger values are drawn higher).
    Inverted,
}

/// A linear mapping from a continuous domain to a continuous range.
///
/// A degenerate domain (`min == max`) maps every input to the midpoint of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    direction: AxisDirection,
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
    /// Axis direction used when instantiating.
    pub direction: AxisDirection,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::with_direction(domain, range, AxisDirection::Normal)
    }

    /// Creates a new inverted scale: `domain.0` maps to `range.1` and `domain.1` to `range.0`.
    pub fn inverted(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::with_direction(domain, range, AxisDirection::Inverted)
    }

    /// Creates a new scale with an explicit direction.
    pub fn with_direction(domain: (f64, f64), range: (f64, f64), direction: AxisDirection) -> Self {
        if domain.0 == domain.1 {
            log::warn!(
                "degenerate scale domain [{}, {}], mapping every value to the range midpoint",
                domain.0,
                domain.1
            );
        }
        Self {
            domain,
            range,
            direction,
        }
    }

    /// Creates a new scale, refusing degenerate domains.
    pub fn try_new(
        domain: (f64, f64),
        range: (f64, f64),
        direction: AxisDirection,
    ) -> Result<Self> {
        if domain.0 == domain.1 {
            return Err(Error::DegenerateDomain(DomainValue(domain.0)));
        }
        Ok(Self {
            domain,
            range,
            direction,
        })
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return self.range_midpoint();
        }
        let t = unit_fraction(x, d0, d1);
        if t.is_nan() {
            return self.range_midpoint();
        }
        let t = match self.direction {
            AxisDirection::Normal => t,
            AxisDirection::Inverted => 1.0 - t,
        };
        if t == 1.0 {
            return r1;
        }
        let y = r0 + t * (r1 - r0);
        // Keep in-domain values inside the range despite rounding, so the endpoints stay exact.
        if (0.0..=1.0).contains(&t) {
            y.clamp(r0.min(r1), r0.max(r1))
        } else {
            y
        }
    }

    /// Maps a value from range space back into domain space.
    ///
    /// For a degenerate domain this returns the domain value itself.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if d1 == d0 || span == 0.0 {
            return d0;
        }
        let t = (px - r0) / span;
        let t = match self.direction {
            AxisDirection::Normal => t,
            AxisDirection::Inverted => 1.0 - t,
        };
        let span = d1 - d0;
        if span.is_finite() {
            d0 + t * span
        } else {
            d0 * (1.0 - t) + d1 * t
        }
    }

    /// Returns the midpoint of the output range.
    pub fn range_midpoint(&self) -> f64 {
        0.5 * (self.range.0 + self.range.1)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the axis direction.
    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    /// Returns “nice-ish” tick values that fall inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = 1e-9 * (hi - lo).abs().max(1.0);
        let mut ticks = nice_ticks(lo, hi, count);
        ticks.retain(|t| *t >= lo - eps && *t <= hi + eps);
        ticks
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec with a normal direction.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
            direction: AxisDirection::Normal,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Sets the axis direction.
    pub fn with_direction(mut self, direction: AxisDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        match (ticks.first(), ticks.last()) {
            (Some(&first), Some(&last)) if ticks.len() >= 2 => (first, last),
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::with_direction(self.domain, range, self.direction)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::with_direction(self.resolved_domain(tick_count), range, self.direction)
    }
}

pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Position of `x` in `[d0, d1]` as a fraction, halving the operands when the span overflows.
fn unit_fraction(x: f64, d0: f64, d1: f64) -> f64 {
    let span = d1 - d0;
    if span.is_finite() {
        (x - d0) / span
    } else {
        (0.5 * x - 0.5 * d0) / (0.5 * d1 - 0.5 * d0)
    }
}

/// One band of a [`ScaleBand`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Start of the unpadded band.
    pub start: f64,
    /// Width of the unpadded band.
    pub width: f64,
    /// Padding in band units (`0..=1`).
    pub padding: f64,
}

impl Band {
    /// Center of the band; tick marks and labels sit here regardless of padding.
    pub fn center(&self) -> f64 {
        self.start + 0.5 * self.width
    }

    /// End of the unpadded band.
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// Returns the visible `(start, width)` after insetting `padding * width / 2` on each side.
    pub fn visible(&self) -> (f64, f64) {
        let inset = 0.5 * self.padding * self.width;
        (self.start + inset, self.width - 2.0 * inset)
    }
}

/// A discrete band scale for categorical charts.
///
/// Bands are equal width: `|range| / keys.len()`. Padding only shrinks the visible shape;
/// band centers are unaffected.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    keys: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl ScaleBand {
    /// Creates a band scale covering `keys` over `range`.
    ///
    /// Returns [`Error::EmptyKeySet`] if `keys` is empty.
    pub fn new<I, S>(keys: I, range: (f64, f64)) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(Error::EmptyKeySet);
        }
        Ok(Self {
            keys,
            range,
            padding: 0.0,
        })
    }

    /// Sets the padding in band units, clamped to `[0, 1]`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() {
            padding.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the band keys in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the unpadded band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        (r1 - r0).abs() / self.keys.len() as f64
    }

    /// Returns the visible (padded) band width.
    pub fn visible_width(&self) -> f64 {
        self.band_width() * (1.0 - self.padding)
    }

    fn start(&self) -> f64 {
        let (r0, r1) = self.range;
        r0.min(r1)
    }

    /// Returns the band at `index`, if in range.
    pub fn band_at_index(&self, index: usize) -> Option<Band> {
        if index >= self.keys.len() {
            return None;
        }
        let width = self.band_width();
        Some(Band {
            start: self.start() + width * index as f64,
            width,
            padding: self.padding,
        })
    }

    /// Returns the band for `key`, if the key is part of the scale.
    pub fn band(&self, key: &str) -> Option<Band> {
        let index = self.keys.iter().position(|k| k == key)?;
        self.band_at_index(index)
    }

    /// Iterates over `(key, band)` pairs in order.
    pub fn bands(&self) -> impl Iterator<Item = (&str, Band)> + '_ {
        self.keys.iter().enumerate().filter_map(|(i, key)| {
            self.band_at_index(i).map(|band| (key.as_str(), band))
        })
    }

    /// Returns the index of the band containing screen coordinate `x`.
    ///
    /// The last band includes its right edge.
    pub fn band_index_at(&self, x: f64) -> Option<usize> {
        let width = self.band_width();
        let start = self.start();
        let end = start + width * self.keys.len() as f64;
        if width.is_nan() || width <= 0.0 || !x.is_finite() || x < start || x > end {
            return None;
        }
        let t = ((x - start) / width).floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is finite, non-negative and bounded by the key count"
        )]
        let index = t as usize;
        Some(index.min(self.keys.len() - 1))
    }
}
