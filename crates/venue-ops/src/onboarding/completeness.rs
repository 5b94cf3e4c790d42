//! Pure predicates deciding whether a space's commercial configuration is
//! complete enough to advance the pipeline.
//!
//! The one non-obvious rule: a space whose business model is only-packages is
//! never rented by the hour, so capacity and minimum-hours constraints are
//! relaxed for it. Cancellation policy and at least one price field are
//! required for every model.

use super::domain::{HostAccount, OfferStatus, RentalConfig, Space, SpaceAddOn};

/// A form-backed field counts as present when it holds a non-empty value.
fn has_value(field: Option<&String>) -> bool {
    field.is_some_and(|value| !value.trim().is_empty())
}

/// At least one of the three pricing entry points must be filled in.
pub fn has_any_price(rental: &RentalConfig) -> bool {
    has_value(rental.fixed_price.as_ref())
        || has_value(rental.flexible_base_price.as_ref())
        || has_value(rental.custom_first_price.as_ref())
}

/// Whether the rental section of a space is complete for its business model.
pub fn is_rental_complete(space: &Space) -> bool {
    let rental = &space.rental;

    let base = has_value(rental.cancellation_policy.base_refund.as_ref()) && has_any_price(rental);
    if !base {
        return false;
    }

    if space.business_model.requires_hourly_constraints() {
        has_value(rental.lotation.as_ref()) && has_value(rental.min_hours.as_ref())
    } else {
        true
    }
}

/// A package, service, or extra entry is complete when its name, rate kind,
/// and price are all filled in.
pub fn is_add_on_complete(add_on: &SpaceAddOn) -> bool {
    has_value(add_on.name.as_ref()) && add_on.rate.is_some() && has_value(add_on.price.as_ref())
}

/// Whether the space holds at least one published package.
pub fn has_published_package(space: &Space) -> bool {
    space
        .packages
        .iter()
        .any(|package| package.status == OfferStatus::Published)
}

/// Every drafted entry in a list must be fully specified; vacuously true for
/// an empty list.
pub fn all_add_ons_complete(add_ons: &[SpaceAddOn]) -> bool {
    add_ons.iter().all(is_add_on_complete)
}

/// Whether a host can receive payouts: company identity and every bank
/// field filled in. The values are opaque provider tokens and are checked
/// for presence only, never validated. Gates the pending-to-active move.
pub fn is_payout_ready(host: &HostAccount) -> bool {
    has_value(host.company_name.as_ref())
        && has_value(host.tax_number.as_ref())
        && has_value(host.bank_account_holder.as_ref())
        && has_value(host.bank_account_number.as_ref())
        && has_value(host.payment_account_id.as_ref())
}
