//! Pricing model resolver: turns a wizard pricing submission into the
//! canonical list of price records persisted for a space.
//!
//! The resolver is pure and total. Amounts arrive as form strings and resolve
//! leniently: empty or non-numeric values become 0 and fractional parts are
//! truncated, matching the behavior the intake forms have always had. A
//! custom window missing any of its three sub-fields is skipped silently
//! rather than rejected; overlapping or unordered windows are likewise
//! accepted as-is, pending a product rule saying otherwise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::SpaceId;

/// Upper bound on independently configurable custom time windows.
pub const MAX_CUSTOM_WINDOWS: usize = 5;

/// Kind of priced offer attached to a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceType {
    HourlyFixed,
    HourlyFlexible,
    HourlyCustom,
    CleaningFee,
}

impl PriceType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HourlyFixed => "hourly-fixed",
            Self::HourlyFlexible => "hourly-flexible",
            Self::HourlyCustom => "hourly-custom",
            Self::CleaningFee => "cleaning-fee",
        }
    }

    /// Every type except hourly-custom holds at most one record per space.
    pub const fn is_singleton(self) -> bool {
        !matches!(self, Self::HourlyCustom)
    }
}

/// A canonical priced offer. Immutable once created; a new submission
/// replaces the full record set for its type rather than patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacePrice {
    pub price_type: PriceType,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_after: Option<i64>,
    /// Minutes charged at `amount` before `amount_after` applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    pub space_id: SpaceId,
    pub created_at: DateTime<Utc>,
}

/// One optional window of the hourly-custom form. All three sub-fields must
/// be present for the window to produce a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomWindow {
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub price: Option<String>,
}

impl CustomWindow {
    fn is_fully_specified(&self) -> bool {
        self.time_from.is_some() && self.time_to.is_some() && self.price.is_some()
    }
}

/// Discriminated pricing mode selection submitted by the rental wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PricingSelection {
    HourlyFixed {
        price: String,
    },
    HourlyFlexible {
        base_price: String,
        price_after: String,
        time_limit: String,
    },
    HourlyCustom {
        windows: Vec<CustomWindow>,
    },
}

/// Lenient integer parse for form amounts: trims, truncates at the decimal
/// point, and resolves anything unparseable to 0.
pub fn parse_amount(raw: &str) -> i64 {
    let integral = raw.trim().split('.').next().unwrap_or_default();
    integral.parse::<i64>().unwrap_or(0)
}

/// Resolve a pricing selection into the price records to persist.
///
/// Returns one record for the fixed and flexible modes, and one record per
/// fully-specified window (in index order) for the custom mode, which may be
/// empty. Never fails.
pub fn resolve_prices(
    space_id: &SpaceId,
    selection: &PricingSelection,
    created_at: DateTime<Utc>,
) -> Vec<SpacePrice> {
    match selection {
        PricingSelection::HourlyFixed { price } => vec![SpacePrice {
            price_type: PriceType::HourlyFixed,
            amount: parse_amount(price),
            amount_after: None,
            duration_minutes: None,
            time_start: None,
            time_end: None,
            space_id: space_id.clone(),
            created_at,
        }],
        PricingSelection::HourlyFlexible {
            base_price,
            price_after,
            time_limit,
        } => vec![SpacePrice {
            price_type: PriceType::HourlyFlexible,
            amount: parse_amount(base_price),
            amount_after: Some(parse_amount(price_after)),
            duration_minutes: Some(parse_amount(time_limit)),
            time_start: None,
            time_end: None,
            space_id: space_id.clone(),
            created_at,
        }],
        PricingSelection::HourlyCustom { windows } => windows
            .iter()
            .take(MAX_CUSTOM_WINDOWS)
            .filter(|window| window.is_fully_specified())
            .map(|window| SpacePrice {
                price_type: PriceType::HourlyCustom,
                amount: window.price.as_deref().map(parse_amount).unwrap_or(0),
                amount_after: None,
                duration_minutes: None,
                time_start: window.time_from.clone(),
                time_end: window.time_to.clone(),
                space_id: space_id.clone(),
                created_at,
            })
            .collect(),
    }
}

/// Build a cleaning-fee record, a singleton alongside the hourly selection.
pub fn cleaning_fee_price(
    space_id: &SpaceId,
    amount: &str,
    created_at: DateTime<Utc>,
) -> SpacePrice {
    SpacePrice {
        price_type: PriceType::CleaningFee,
        amount: parse_amount(amount),
        amount_after: None,
        duration_minutes: None,
        time_start: None,
        time_end: None,
        space_id: space_id.clone(),
        created_at,
    }
}

/// Re-derive the wizard's pricing selection from stored records, used to
/// prefill the edit form. Singleton modes win over custom rows; returns
/// `None` when no hourly record exists.
pub fn selection_from_records(records: &[SpacePrice]) -> Option<PricingSelection> {
    if let Some(fixed) = records
        .iter()
        .find(|record| record.price_type == PriceType::HourlyFixed)
    {
        return Some(PricingSelection::HourlyFixed {
            price: fixed.amount.to_string(),
        });
    }

    if let Some(flexible) = records
        .iter()
        .find(|record| record.price_type == PriceType::HourlyFlexible)
    {
        return Some(PricingSelection::HourlyFlexible {
            base_price: flexible.amount.to_string(),
            price_after: flexible.amount_after.unwrap_or(0).to_string(),
            time_limit: flexible.duration_minutes.unwrap_or(0).to_string(),
        });
    }

    let windows: Vec<CustomWindow> = records
        .iter()
        .filter(|record| record.price_type == PriceType::HourlyCustom)
        .map(|record| CustomWindow {
            time_from: record.time_start.clone(),
            time_to: record.time_end.clone(),
            price: Some(record.amount.to_string()),
        })
        .collect();

    if windows.is_empty() {
        None
    } else {
        Some(PricingSelection::HourlyCustom { windows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn space_id() -> SpaceId {
        SpaceId("space-001".to_string())
    }

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 12, 9, 30, 0).single().expect("valid timestamp")
    }

    #[test]
    fn parse_amount_resolves_empty_to_zero() {
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("   "), 0);
    }

    #[test]
    fn parse_amount_truncates_fractions() {
        assert_eq!(parse_amount("12.50"), 12);
        assert_eq!(parse_amount("99.99"), 99);
    }

    #[test]
    fn parse_amount_resolves_garbage_to_zero() {
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount("12eur"), 0);
        assert_eq!(parse_amount(".50"), 0);
    }

    #[test]
    fn parse_amount_accepts_plain_integers() {
        assert_eq!(parse_amount("30"), 30);
        assert_eq!(parse_amount(" 45 "), 45);
    }

    #[test]
    fn fixed_mode_emits_one_record_even_for_empty_price() {
        let records = resolve_prices(
            &space_id(),
            &PricingSelection::HourlyFixed {
                price: String::new(),
            },
            created_at(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price_type, PriceType::HourlyFixed);
        assert_eq!(records[0].amount, 0);
        assert!(records[0].time_start.is_none());
    }

    #[test]
    fn flexible_mode_carries_after_rate_and_duration() {
        let records = resolve_prices(
            &space_id(),
            &PricingSelection::HourlyFlexible {
                base_price: "40".to_string(),
                price_after: "25".to_string(),
                time_limit: "180".to_string(),
            },
            created_at(),
        );
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.amount, 40);
        assert_eq!(record.amount_after, Some(25));
        assert_eq!(record.duration_minutes, Some(180));
    }

    #[test]
    fn custom_mode_skips_partial_windows_and_preserves_order() {
        let selection = PricingSelection::HourlyCustom {
            windows: vec![
                CustomWindow {
                    time_from: Some("09:00".to_string()),
                    time_to: Some("13:00".to_string()),
                    price: Some("20".to_string()),
                },
                CustomWindow {
                    time_from: Some("13:00".to_string()),
                    time_to: Some("18:00".to_string()),
                    price: None,
                },
                CustomWindow {
                    time_from: Some("18:00".to_string()),
                    time_to: Some("23:00".to_string()),
                    price: Some("35".to_string()),
                },
            ],
        };

        let records = resolve_prices(&space_id(), &selection, created_at());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time_start.as_deref(), Some("09:00"));
        assert_eq!(records[0].time_end.as_deref(), Some("13:00"));
        assert_eq!(records[0].amount, 20);
        assert_eq!(records[1].time_start.as_deref(), Some("18:00"));
        assert_eq!(records[1].time_end.as_deref(), Some("23:00"));
        assert_eq!(records[1].amount, 35);
    }

    #[test]
    fn custom_mode_with_no_complete_window_is_empty_not_an_error() {
        let selection = PricingSelection::HourlyCustom {
            windows: vec![CustomWindow {
                time_from: Some("09:00".to_string()),
                time_to: None,
                price: Some("20".to_string()),
            }],
        };
        assert!(resolve_prices(&space_id(), &selection, created_at()).is_empty());
    }

    #[test]
    fn custom_mode_caps_at_five_windows() {
        let window = CustomWindow {
            time_from: Some("09:00".to_string()),
            time_to: Some("10:00".to_string()),
            price: Some("10".to_string()),
        };
        let selection = PricingSelection::HourlyCustom {
            windows: vec![window; 7],
        };
        assert_eq!(
            resolve_prices(&space_id(), &selection, created_at()).len(),
            MAX_CUSTOM_WINDOWS
        );
    }

    #[test]
    fn flexible_round_trip_reconstructs_business_fields() {
        let selection = PricingSelection::HourlyFlexible {
            base_price: "40".to_string(),
            price_after: "25".to_string(),
            time_limit: "180".to_string(),
        };
        let records = resolve_prices(&space_id(), &selection, created_at());
        assert_eq!(selection_from_records(&records), Some(selection));
    }

    #[test]
    fn custom_round_trip_keeps_window_bounds() {
        let selection = PricingSelection::HourlyCustom {
            windows: vec![CustomWindow {
                time_from: Some("09:00".to_string()),
                time_to: Some("12:00".to_string()),
                price: Some("18".to_string()),
            }],
        };
        let records = resolve_prices(&space_id(), &selection, created_at());
        assert_eq!(selection_from_records(&records), Some(selection));
    }

    #[test]
    fn selection_from_records_ignores_cleaning_fee_only_sets() {
        let records = vec![cleaning_fee_price(&space_id(), "15", created_at())];
        assert_eq!(selection_from_records(&records), None);
    }

    #[test]
    fn cleaning_fee_is_a_singleton_type() {
        assert!(PriceType::CleaningFee.is_singleton());
        assert!(PriceType::HourlyFixed.is_singleton());
        assert!(!PriceType::HourlyCustom.is_singleton());
    }
}
