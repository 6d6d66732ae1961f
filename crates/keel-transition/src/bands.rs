//! Band threshold checks over one window's counters.

use keel_core::config::PromotionBand;
use keel_core::WindowMetrics;

/// Whether a window's counters reach a promotion band.
///
/// The count and rate thresholds are alternatives: meeting either one of
/// those the band sets satisfies it. The unique-counterpart minimum, when
/// set, is a further requirement on top, so a pattern concentrated on a
/// single counterpart cannot reach a band that demands diversity.
pub fn band_reached(band: &PromotionBand, metrics: &WindowMetrics) -> bool {
    let count_met = band
        .min_negative_events
        .is_some_and(|min| metrics.negative_events >= min);
    let rate_met = band
        .min_negative_rate
        .is_some_and(|min| metrics.negative_rate >= min);
    if !count_met && !rate_met {
        return false;
    }
    band.min_unique_counterparts
        .map_or(true, |min| metrics.unique_counterparts >= min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(negative: u64, completed: u64, counterparts: u64) -> WindowMetrics {
        WindowMetrics {
            negative_events: negative,
            completed_events: completed,
            neutral_events: 0,
            negative_rate: WindowMetrics::rate_of(negative, completed),
            unique_counterparts: counterparts,
        }
    }

    #[test]
    fn count_threshold_alone_reaches_the_band() {
        let band = PromotionBand {
            window_days: 90,
            min_negative_events: Some(3),
            min_negative_rate: None,
            min_unique_counterparts: None,
        };

        assert!(!band_reached(&band, &metrics(2, 10, 2)));
        assert!(band_reached(&band, &metrics(3, 10, 3)));
    }

    #[test]
    fn rate_threshold_alone_reaches_the_band() {
        let band = PromotionBand {
            window_days: 90,
            min_negative_events: None,
            min_negative_rate: Some(0.2),
            min_unique_counterparts: None,
        };

        // 2 of 12 is below 20 percent, 3 of 12 is exactly 25 percent.
        assert!(!band_reached(&band, &metrics(2, 10, 2)));
        assert!(band_reached(&band, &metrics(3, 9, 3)));
    }

    #[test]
    fn count_and_rate_are_alternatives_not_conjuncts() {
        let band = PromotionBand {
            window_days: 90,
            min_negative_events: Some(5),
            min_negative_rate: Some(0.5),
            min_unique_counterparts: None,
        };

        // Count met, rate far below threshold.
        assert!(band_reached(&band, &metrics(5, 95, 5)));
        // Rate met, count below threshold.
        assert!(band_reached(&band, &metrics(2, 1, 2)));
        // Neither met.
        assert!(!band_reached(&band, &metrics(2, 95, 2)));
    }

    #[test]
    fn counterpart_minimum_gates_an_otherwise_met_band() {
        let band = PromotionBand {
            window_days: 180,
            min_negative_events: Some(5),
            min_negative_rate: None,
            min_unique_counterparts: Some(2),
        };

        // Five incidents against one counterpart stay below the band.
        assert!(!band_reached(&band, &metrics(5, 0, 1)));
        assert!(band_reached(&band, &metrics(5, 0, 2)));
    }
}
