//! Onboarding pipeline engine: status model, pricing resolver, completeness
//! evaluation, and the staff-facing orchestration service.

pub mod completeness;
pub mod domain;
pub mod pricing;
pub mod repository;
pub mod router;
pub mod sections;
pub mod service;
pub mod status;

pub use completeness::{
    has_published_package, is_add_on_complete, is_payout_ready, is_rental_complete,
};
pub use domain::{
    AddOnRate, ApplicationId, ApplicationSnapshot, ApplicationStatus, BusinessModel,
    CancellationPolicy, HostAccount, HostId, HostStatus, OfferStatus, OnboardingProcess,
    ProcessId, ProcessStatus, RentalConfig, Space, SpaceAddOn, SpaceId, SpaceInfo, SpaceStatus,
    StaffAssignee,
};
pub use pricing::{
    parse_amount, resolve_prices, selection_from_records, CustomWindow, PriceType,
    PricingSelection, SpacePrice, MAX_CUSTOM_WINDOWS,
};
pub use repository::{
    IdentityError, IdentityProvider, ProcessRepository, ProcessSummary, ProcessView,
    ProcessViews, RepositoryError,
};
pub use router::onboarding_router;
pub use sections::{can_complete, Section, SectionReport};
pub use service::{
    AddOnSubmission, IntroUpdate, OnboardingError, OnboardingService, RentalSubmission,
    SpaceInfoUpdate, ValidationError,
};
pub use status::{EntityKind, InvalidTransition, StatusPipeline};
