//! Strategy exposure limits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::order::Side;
use crate::error::LimitError;

/// Which exposure cap is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Cap on the exposure of a single order
    MaxOrderExposure,
    /// Cap on the combined matched and potential exposure of a selection
    MaxSelectionExposure,
}

impl LimitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitKind::MaxOrderExposure => "max_order_exposure",
            LimitKind::MaxSelectionExposure => "max_selection_exposure",
        }
    }
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (order cap, selection cap) pair for one side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideLimits {
    pub max_order_exposure: Decimal,
    pub max_selection_exposure: Decimal,
}

impl SideLimits {
    pub fn new(max_order_exposure: Decimal, max_selection_exposure: Decimal) -> Self {
        Self {
            max_order_exposure,
            max_selection_exposure,
        }
    }

    pub fn get(&self, kind: LimitKind) -> Decimal {
        match kind {
            LimitKind::MaxOrderExposure => self.max_order_exposure,
            LimitKind::MaxSelectionExposure => self.max_selection_exposure,
        }
    }
}

/// Limits for both sides of one market classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierLimits {
    pub back: SideLimits,
    pub lay: SideLimits,
}

impl TierLimits {
    pub fn side(&self, side: Side) -> &SideLimits {
        match side {
            Side::Back => &self.back,
            Side::Lay => &self.lay,
        }
    }
}

/// Classification table, e.g. `METRO -> { back: (400, 400), lay: (50, 50) }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureSettings {
    /// Classification used when a market's own is missing from the table
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub classifications: HashMap<String, TierLimits>,
}

impl ExposureSettings {
    pub fn insert(&mut self, classification: impl Into<String>, limits: TierLimits) {
        self.classifications.insert(classification.into(), limits);
    }

    pub fn with_fallback(mut self, classification: impl Into<String>) -> Self {
        self.fallback = Some(classification.into());
        self
    }

    /// Table entry for `classification`. Keys match case-insensitively since
    /// layered config sources lowercase them.
    pub fn get(&self, classification: &str) -> Option<&TierLimits> {
        self.classifications.get(classification).or_else(|| {
            self.classifications
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(classification))
                .map(|(_, limits)| limits)
        })
    }

    /// Limits for `classification`, falling back to the fallback entry.
    pub fn lookup(&self, classification: Option<&str>) -> Option<&TierLimits> {
        classification
            .and_then(|c| self.get(c))
            .or_else(|| self.fallback.as_deref().and_then(|c| self.get(c)))
    }
}

/// Exposure limits configured for a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyLimits {
    /// Largest stake (or liability) a single order may carry
    pub max_stake: Decimal,
    pub back_max_order_exposure: Decimal,
    pub lay_max_order_exposure: Decimal,
    pub back_max_selection_exposure: Decimal,
    pub lay_max_selection_exposure: Decimal,
    /// Optional classification table overriding the flat caps
    pub exposure_settings: Option<ExposureSettings>,
}

impl Default for StrategyLimits {
    fn default() -> Self {
        Self {
            max_stake: dec!(2),
            back_max_order_exposure: dec!(20),
            lay_max_order_exposure: dec!(20),
            back_max_selection_exposure: dec!(100),
            lay_max_selection_exposure: dec!(100),
            exposure_settings: None,
        }
    }
}

impl StrategyLimits {
    /// The flat cap for `side` and `kind`.
    pub fn flat(&self, side: Side, kind: LimitKind) -> Decimal {
        match (side, kind) {
            (Side::Back, LimitKind::MaxOrderExposure) => self.back_max_order_exposure,
            (Side::Lay, LimitKind::MaxOrderExposure) => self.lay_max_order_exposure,
            (Side::Back, LimitKind::MaxSelectionExposure) => self.back_max_selection_exposure,
            (Side::Lay, LimitKind::MaxSelectionExposure) => self.lay_max_selection_exposure,
        }
    }

    pub fn with_exposure_settings(mut self, settings: ExposureSettings) -> Self {
        self.exposure_settings = Some(settings);
        self
    }

    /// Check every cap is non-negative and the fallback classification exists.
    pub fn validate(&self) -> Result<(), LimitError> {
        let flat = [
            ("max_stake", self.max_stake),
            ("back_max_order_exposure", self.back_max_order_exposure),
            ("lay_max_order_exposure", self.lay_max_order_exposure),
            ("back_max_selection_exposure", self.back_max_selection_exposure),
            ("lay_max_selection_exposure", self.lay_max_selection_exposure),
        ];
        for (name, value) in flat {
            if value.is_sign_negative() {
                return Err(LimitError::Negative {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if let Some(settings) = &self.exposure_settings {
            if let Some(fallback) = &settings.fallback {
                if settings.get(fallback).is_none() {
                    return Err(LimitError::UnknownClassification(fallback.clone()));
                }
            }
            for (classification, limits) in &settings.classifications {
                for (side, side_limits) in [(Side::Back, &limits.back), (Side::Lay, &limits.lay)] {
                    for kind in [LimitKind::MaxOrderExposure, LimitKind::MaxSelectionExposure] {
                        let value = side_limits.get(kind);
                        if value.is_sign_negative() {
                            return Err(LimitError::Negative {
                                name: format!("{}.{}.{}", classification, side, kind),
                                value,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Matched exposure of a selection, as reported by the blotter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionExposures {
    /// Signed profit if the selection wins across matched orders
    pub matched_profit_if_win: Decimal,
    /// Worst case profit if the selection wins, including unmatched orders.
    /// Reported by some blotters; the controls do not read it.
    #[serde(default)]
    pub worst_possible_profit_on_win: Option<Decimal>,
}

impl SelectionExposures {
    pub fn matched(matched_profit_if_win: Decimal) -> Self {
        Self {
            matched_profit_if_win,
            worst_possible_profit_on_win: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered() -> ExposureSettings {
        let mut settings = ExposureSettings::default();
        settings.insert(
            "METRO",
            TierLimits {
                back: SideLimits::new(dec!(400), dec!(400)),
                lay: SideLimits::new(dec!(50), dec!(50)),
            },
        );
        settings.insert(
            "LOCATION_UNKNOWN",
            TierLimits {
                back: SideLimits::new(dec!(200), dec!(200)),
                lay: SideLimits::new(dec!(50), dec!(50)),
            },
        );
        settings
    }

    #[test]
    fn test_flat_limits_by_side() {
        let limits = StrategyLimits {
            back_max_order_exposure: dec!(1),
            lay_max_order_exposure: dec!(2),
            back_max_selection_exposure: dec!(3),
            lay_max_selection_exposure: dec!(4),
            ..Default::default()
        };
        assert_eq!(limits.flat(Side::Back, LimitKind::MaxOrderExposure), dec!(1));
        assert_eq!(limits.flat(Side::Lay, LimitKind::MaxOrderExposure), dec!(2));
        assert_eq!(limits.flat(Side::Back, LimitKind::MaxSelectionExposure), dec!(3));
        assert_eq!(limits.flat(Side::Lay, LimitKind::MaxSelectionExposure), dec!(4));
    }

    #[test]
    fn test_lookup_falls_back() {
        let settings = tiered().with_fallback("LOCATION_UNKNOWN");
        let metro = settings.lookup(Some("METRO")).unwrap();
        assert_eq!(metro.side(Side::Back).max_order_exposure, dec!(400));

        let unknown = settings.lookup(Some("COUNTRY")).unwrap();
        assert_eq!(unknown.side(Side::Back).max_order_exposure, dec!(200));
        assert!(settings.lookup(None).is_some());
    }

    #[test]
    fn test_lookup_ignores_key_case() {
        let mut settings = ExposureSettings::default();
        settings.insert(
            "metro",
            TierLimits {
                back: SideLimits::new(dec!(400), dec!(400)),
                lay: SideLimits::new(dec!(50), dec!(50)),
            },
        );
        let settings = settings.with_fallback("METRO");
        assert!(settings.lookup(Some("METRO")).is_some());
        assert!(settings.lookup(Some("COUNTRY")).is_some());
    }

    #[test]
    fn test_lookup_without_fallback() {
        let settings = tiered();
        assert!(settings.lookup(Some("COUNTRY")).is_none());
        assert!(settings.lookup(None).is_none());
    }

    #[test]
    fn test_validate_rejects_negative_cap() {
        let limits = StrategyLimits {
            lay_max_selection_exposure: dec!(-1),
            ..Default::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(LimitError::Negative { ref name, .. }) if name == "lay_max_selection_exposure"
        ));
    }

    #[test]
    fn test_validate_rejects_missing_fallback() {
        let limits = StrategyLimits::default()
            .with_exposure_settings(tiered().with_fallback("PROVINCIAL"));
        assert!(matches!(
            limits.validate(),
            Err(LimitError::UnknownClassification(_))
        ));

        let limits = StrategyLimits::default()
            .with_exposure_settings(tiered().with_fallback("METRO"));
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_limit_kind_names() {
        assert_eq!(LimitKind::MaxOrderExposure.to_string(), "max_order_exposure");
        assert_eq!(
            LimitKind::MaxSelectionExposure.to_string(),
            "max_selection_exposure"
        );
    }
}
