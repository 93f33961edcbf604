//! Significance bands for p-values

/// Significance band of a p-value
///
/// Boundaries use strict less-than: a p-value of exactly 0.05 is not
/// significant. NaN falls into [`Significance::NotSignificant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    /// p < 0.001
    VerySignificant,
    /// p < 0.01
    Significant01,
    /// p < 0.05
    Significant05,
    /// p >= 0.05
    NotSignificant,
}

impl Significance {
    /// Map a p-value to its band
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.001 {
            Self::VerySignificant
        } else if p_value < 0.01 {
            Self::Significant01
        } else if p_value < 0.05 {
            Self::Significant05
        } else {
            Self::NotSignificant
        }
    }

    /// Human-readable label sent to clients
    pub fn label(self) -> &'static str {
        match self {
            Self::VerySignificant => "very significant",
            Self::Significant01 => "significant (0.01)",
            Self::Significant05 => "significant (0.05)",
            Self::NotSignificant => "not significant",
        }
    }
}

/// Label for a p-value, see [`Significance::from_p_value`]
pub fn interpret_p_value(p_value: f64) -> &'static str {
    Significance::from_p_value(p_value).label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_very_significant() {
        assert_eq!(interpret_p_value(0.0005), "very significant");
        assert_eq!(interpret_p_value(0.0), "very significant");
    }

    #[test]
    fn test_middle_bands() {
        assert_eq!(interpret_p_value(0.001), "significant (0.01)");
        assert_eq!(interpret_p_value(0.005), "significant (0.01)");
        assert_eq!(interpret_p_value(0.01), "significant (0.05)");
        assert_eq!(interpret_p_value(0.049), "significant (0.05)");
    }

    #[test]
    fn test_boundary_is_strict() {
        assert_eq!(interpret_p_value(0.05), "not significant");
    }

    #[test]
    fn test_not_significant() {
        assert_eq!(interpret_p_value(0.5), "not significant");
        assert_eq!(interpret_p_value(1.0), "not significant");
    }

    #[test]
    fn test_nan_is_not_significant() {
        assert_eq!(
            Significance::from_p_value(f64::NAN),
            Significance::NotSignificant
        );
    }

    proptest! {
        #[test]
        fn prop_bands_are_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            // enum order runs from most to least significant
            let rank = |s: Significance| s as u8;
            prop_assert!(rank(Significance::from_p_value(low)) <= rank(Significance::from_p_value(high)));
        }
    }
}
