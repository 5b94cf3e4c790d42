//! Entity model for the onboarding pipeline: applicant submissions, the
//! staff-driven process record, hosts, and the bookable space with its
//! commercial configuration.
//!
//! Fields that mirror wizard form state are `Option<String>` on purpose: the
//! completeness evaluator treats "present" as a non-empty trimmed value, the
//! same way the intake forms do.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::pricing::SpacePrice;

/// Identifier wrapper for intake applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for onboarding process records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub String);

/// Identifier wrapper for host accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(pub String);

/// Identifier wrapper for spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceId(pub String);

/// Position of an intake application in the acquisition funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Spontaneous,
    Sent,
    Ready,
    Onboarding,
    Completed,
    Rejected,
    Scheduled,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spontaneous => "spontaneous",
            Self::Sent => "sent",
            Self::Ready => "ready",
            Self::Onboarding => "onboarding",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Status of the working record while staff guide a space to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    InProgress,
    Scheduled,
    Completed,
    Archived,
}

impl ProcessStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

/// Lifecycle of a host account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    Pending,
    Active,
    Suspended,
    Archived,
}

impl HostStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Archived => "archived",
        }
    }
}

/// Lifecycle of a space listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceStatus {
    Draft,
    Pending,
    Active,
    Archived,
}

impl SpaceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// Which commercial offer types a space sells.
///
/// This is the single gate deciding which configuration sections apply; the
/// three branches live here so they cannot drift apart across the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessModel {
    OnlyRental,
    RentalAndPackages,
    OnlyPackages,
}

impl BusinessModel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnlyRental => "only_rental",
            Self::RentalAndPackages => "rental_and_packages",
            Self::OnlyPackages => "only_packages",
        }
    }

    /// Whether the package, service, and extra sections apply to the space.
    pub const fn allows_packages(self) -> bool {
        matches!(self, Self::RentalAndPackages | Self::OnlyPackages)
    }

    /// Whether capacity and minimum-hours constraints are required. A space
    /// that only sells fixed packages is never rented by the hour, so those
    /// constraints are meaningless for it and the requirement is relaxed.
    pub const fn requires_hourly_constraints(self) -> bool {
        matches!(self, Self::OnlyRental | Self::RentalAndPackages)
    }
}

/// Publication state of a commercial add-on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Draft,
    Published,
}

impl OfferStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// Pricing model selectable for packages, services, and extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnRate {
    PerPerson,
    PerHour,
    Fixed,
}

/// Staff member working an onboarding process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAssignee {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Host company and payout identity. The bank fields are opaque tokens owned
/// by the payment provider and are never validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAccount {
    pub id: HostId,
    pub status: HostStatus,
    pub company_name: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account_holder: Option<String>,
    pub bank_account_number: Option<String>,
    pub payment_account_id: Option<String>,
}

/// General-information wizard fields, nullable until saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    pub name: Option<String>,
    pub space_type: Option<String>,
    pub locality: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Refund rule attached to hourly rentals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationPolicy {
    pub base_refund: Option<String>,
}

/// Raw rental form snapshot for a space. Values stay exactly as entered so
/// completeness mirrors what the wizard shows; the resolver, not this
/// snapshot, owns numeric interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalConfig {
    pub cancellation_policy: CancellationPolicy,
    pub lotation: Option<String>,
    pub min_hours: Option<String>,
    pub fixed_price: Option<String>,
    pub flexible_base_price: Option<String>,
    pub custom_first_price: Option<String>,
}

/// A package, service, or extra attached to a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceAddOn {
    pub id: String,
    pub name: Option<String>,
    pub status: OfferStatus,
    pub rate: Option<AddOnRate>,
    pub price: Option<String>,
}

/// The bookable venue with its full commercial configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub host_id: HostId,
    pub status: SpaceStatus,
    pub business_model: BusinessModel,
    pub info: SpaceInfo,
    pub photos: Vec<String>,
    pub rental: RentalConfig,
    pub prices: Vec<SpacePrice>,
    pub packages: Vec<SpaceAddOn>,
    pub services: Vec<SpaceAddOn>,
    pub extras: Vec<SpaceAddOn>,
}

/// Read-only snapshot of the intake application that spawned a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub submitted_on: Option<NaiveDate>,
}

/// The staff-assigned working record guiding a space through configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProcess {
    pub id: ProcessId,
    pub status: ProcessStatus,
    pub assignee: Option<StaffAssignee>,
    pub schedule_date: Option<DateTime<Utc>>,
    pub intro_completed: bool,
    pub application: ApplicationSnapshot,
    pub space: Space,
}
