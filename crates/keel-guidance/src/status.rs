//! Level labels shown on profile and dashboard surfaces.

use keel_core::TrustLevel;

/// Human-readable label for a trust level.
pub fn status_label(level: TrustLevel) -> &'static str {
    match level {
        TrustLevel::Good => "good standing",
        TrustLevel::Advisory => "advisory",
        TrustLevel::Risk => "elevated risk",
        TrustLevel::HighRisk => "high risk",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_distinct_label() {
        let labels = [
            status_label(TrustLevel::Good),
            status_label(TrustLevel::Advisory),
            status_label(TrustLevel::Risk),
            status_label(TrustLevel::HighRisk),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in labels.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
