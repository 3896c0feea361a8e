// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scales and binning.

use proptest::prelude::*;
use vizlet_charts::{ScaleBand, ScaleLinear, bin, sample_domain};

proptest! {
    #[test]
    fn linear_scale_hits_endpoints(
        a in -1e6..1e6f64,
        width in 1e-3..1e6f64,
        r0 in -1e4..1e4f64,
        r1 in -1e4..1e4f64,
    ) {
        let b = a + width;
        let s = ScaleLinear::new((a, b), (r0, r1));
        prop_assert_eq!(s.map(a), r0);
        prop_assert_eq!(s.map(b), r1);
    }

    #[test]
    fn linear_scale_is_monotonic(
        a in -1e6..1e6f64,
        width in 1e-3..1e6f64,
        r0 in -1e4..1e4f64,
        span in 0.0..1e4f64,
        t in 0.0..1.0f64,
        u in 0.0..1.0f64,
    ) {
        let b = a + width;
        let s = ScaleLinear::new((a, b), (r0, r0 + span));
        let (lo, hi) = if t <= u { (t, u) } else { (u, t) };
        let x0 = a + lo * width;
        let x1 = a + hi * width;
        prop_assert!(s.map(x0) <= s.map(x1));
        prop_assert!(s.map(x0).is_finite());
    }

    #[test]
    fn inverted_scale_is_non_increasing(
        a in -1e6..1e6f64,
        width in 1e-3..1e6f64,
        r0 in -1e4..1e4f64,
        span in 0.0..1e4f64,
        t in 0.0..1.0f64,
        u in 0.0..1.0f64,
    ) {
        let b = a + width;
        let s = ScaleLinear::inverted((a, b), (r0, r0 + span));
        prop_assert_eq!(s.map(a), r0 + span);
        prop_assert_eq!(s.map(b), r0);
        let (lo, hi) = if t <= u { (t, u) } else { (u, t) };
        let x0 = a + lo * width;
        let x1 = a + hi * width;
        prop_assert!(s.map(x0) >= s.map(x1));
        prop_assert!(s.map(x1).is_finite());
    }

    #[test]
    fn degenerate_scale_is_finite(d in -1e9..1e9f64, x in -1e9..1e9f64) {
        let s = ScaleLinear::new((d, d), (0.0, 10.0));
        prop_assert_eq!(s.map(x), 5.0);
    }

    #[test]
    fn bins_partition_samples(
        values in prop::collection::vec(-1e3..1e3f64, 1..200),
        bin_count in 1_usize..60,
    ) {
        let domain = sample_domain(&values).unwrap();
        let bins = bin(&values, domain, bin_count).unwrap();
        prop_assert_eq!(bins.len(), bin_count);
        prop_assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        for pair in bins.windows(2) {
            prop_assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
        prop_assert_eq!(bins[0].lower_bound, domain.0);
        prop_assert_eq!(bins[bins.len() - 1].upper_bound, domain.1);
    }

    #[test]
    fn bands_tile_the_range(count in 1_usize..20, start in -500.0..500.0f64, len in 1.0..2000.0f64) {
        let keys: Vec<String> = (0..count).map(|i| format!("k{i}")).collect();
        let band = ScaleBand::new(keys.iter().map(String::as_str), (start, start + len)).unwrap();
        let bands: Vec<_> = band.bands().collect();
        prop_assert_eq!(bands.len(), count);
        for (i, (_, b)) in bands.iter().enumerate() {
            let center = b.center();
            prop_assert_eq!(band.band_index_at(center), Some(i));
        }
    }
}
