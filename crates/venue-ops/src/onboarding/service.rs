//! Staff-facing operations over onboarding processes: partial wizard
//! updates, status actions, and commercial submissions.
//!
//! Every operation fetches a fresh snapshot, computes over it, and writes the
//! whole record back; nothing is cached between calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::completeness::is_add_on_complete;
use super::domain::{
    AddOnRate, ApplicationSnapshot, ApplicationStatus, BusinessModel, CancellationPolicy,
    OfferStatus, OnboardingProcess, ProcessId, ProcessStatus, RentalConfig, Space, SpaceAddOn,
    SpaceStatus, StaffAssignee,
};
use super::pricing::{
    cleaning_fee_price, resolve_prices, PriceType, PricingSelection,
};
use super::repository::{IdentityError, IdentityProvider, ProcessRepository, RepositoryError};
use super::sections::{Section, SectionReport};
use super::status::{InvalidTransition, StatusPipeline};
use crate::config::OnboardingConfig;

/// Partial payload for the intro step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntroUpdate {
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial payload for the general space information step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceInfoUpdate {
    pub name: Option<String>,
    pub space_type: Option<String>,
    pub locality: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Full rental submission: the form snapshot plus the selected pricing mode.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalSubmission {
    pub base_refund: Option<String>,
    pub lotation: Option<String>,
    pub min_hours: Option<String>,
    pub selection: PricingSelection,
    #[serde(default)]
    pub cleaning_fee: Option<String>,
}

/// One package, service, or extra entry; ids are assigned on write.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOnSubmission {
    pub name: Option<String>,
    pub status: OfferStatus,
    pub rate: Option<AddOnRate>,
    pub price: Option<String>,
}

/// Recoverable input problems surfaced as inline form errors.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{section} entries exceed the configured limit of {limit}")]
    TooManyEntries { section: &'static str, limit: usize },
    #[error("cannot publish an incomplete {section} entry")]
    IncompletePublish { section: &'static str },
    #[error("process is {status} and no longer accepts configuration changes")]
    ProcessClosed { status: &'static str },
    #[error("application must be in onboarding to open a process, found '{found}'")]
    ApplicationNotReady { found: &'static str },
}

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error("incomplete configuration, missing sections: {}", format_sections(.missing))]
    IncompleteConfiguration { missing: Vec<Section> },
    #[error("schedule date {date} is not in the future")]
    InvalidScheduleDate { date: DateTime<Utc> },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

fn format_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| section.slug())
        .collect::<Vec<_>>()
        .join(", ")
}

static PROCESS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_process_id() -> ProcessId {
    let id = PROCESS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProcessId(format!("proc-{id:06}"))
}

/// Service composing the repository, the session identity, and the
/// configured catalog limits.
pub struct OnboardingService<R, I> {
    repository: Arc<R>,
    identity: Arc<I>,
    config: OnboardingConfig,
}

impl<R, I> OnboardingService<R, I>
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    pub fn new(repository: Arc<R>, identity: Arc<I>, config: OnboardingConfig) -> Self {
        Self {
            repository,
            identity,
            config,
        }
    }

    /// Open the working record once an application reaches onboarding. The
    /// space leaves draft and the current session staff picks up the case.
    pub fn open(
        &self,
        application: ApplicationSnapshot,
        mut space: Space,
    ) -> Result<OnboardingProcess, OnboardingError> {
        if application.status != ApplicationStatus::Onboarding {
            return Err(ValidationError::ApplicationNotReady {
                found: application.status.label(),
            }
            .into());
        }

        space.status = space.status.transition(SpaceStatus::Pending)?;
        let assignee = self.identity.current_staff()?;

        let process = OnboardingProcess {
            id: next_process_id(),
            status: ProcessStatus::InProgress,
            assignee: Some(assignee),
            schedule_date: None,
            intro_completed: false,
            application,
            space,
        };

        let process = self.repository.insert(process)?;
        info!(
            process = %process.id.0,
            space = %process.space.id.0,
            "opened onboarding process"
        );
        Ok(process)
    }

    pub fn list(
        &self,
        status: Option<ProcessStatus>,
    ) -> Result<Vec<OnboardingProcess>, OnboardingError> {
        Ok(self.repository.list(status)?)
    }

    pub fn get(&self, id: &ProcessId) -> Result<OnboardingProcess, OnboardingError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn update_intro(
        &self,
        id: &ProcessId,
        update: IntroUpdate,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;

        if update.contact_name.is_some() {
            process.application.contact_name = update.contact_name;
        }
        if update.contact_email.is_some() {
            process.application.contact_email = update.contact_email;
        }
        if update.completed {
            process.intro_completed = true;
        }

        self.store(process)
    }

    pub fn update_space_info(
        &self,
        id: &ProcessId,
        update: SpaceInfoUpdate,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;
        let info = &mut process.space.info;

        if update.name.is_some() {
            info.name = update.name;
        }
        if update.space_type.is_some() {
            info.space_type = update.space_type;
        }
        if update.locality.is_some() {
            info.locality = update.locality;
        }
        if update.address.is_some() {
            info.address = update.address;
        }
        if update.description.is_some() {
            info.description = update.description;
        }

        self.store(process)
    }

    pub fn update_photos(
        &self,
        id: &ProcessId,
        photos: Vec<String>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;
        process.space.photos = photos;
        self.store(process)
    }

    /// Reassign to an explicit staff member, or to the current session staff
    /// when none is given.
    pub fn reassign(
        &self,
        id: &ProcessId,
        assignee: Option<StaffAssignee>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;
        process.assignee = match assignee {
            Some(staff) => Some(staff),
            None => Some(self.identity.current_staff()?),
        };
        self.store(process)
    }

    /// Schedule (or re-schedule) a process for a future date.
    pub fn schedule(
        &self,
        id: &ProcessId,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        if date <= now {
            return Err(OnboardingError::InvalidScheduleDate { date });
        }

        let mut process = self.get(id)?;
        if process.status != ProcessStatus::Scheduled {
            process.status = process.status.transition(ProcessStatus::Scheduled)?;
        }
        process.schedule_date = Some(date);
        info!(process = %id.0, %date, "process scheduled");
        self.store(process)
    }

    pub fn archive(&self, id: &ProcessId) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.get(id)?;
        process.status = process.status.transition(ProcessStatus::Archived)?;
        info!(process = %id.0, "process archived");
        self.store(process)
    }

    /// Transition the process to completed, or report exactly which required
    /// sections still block it. Activating the space and host afterwards is
    /// an external decision gated on this signal.
    pub fn complete(&self, id: &ProcessId) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.get(id)?;

        let report = SectionReport::evaluate(&process);
        let missing = report.missing_required(process.space.business_model);
        if !missing.is_empty() {
            return Err(OnboardingError::IncompleteConfiguration { missing });
        }

        process.status = process.status.transition(ProcessStatus::Completed)?;
        info!(process = %id.0, "process completed");
        self.store(process)
    }

    /// The business model stays mutable until the process completes; the
    /// next completeness read follows the new branch automatically.
    pub fn update_business_model(
        &self,
        id: &ProcessId,
        business_model: BusinessModel,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;
        process.space.business_model = business_model;
        self.store(process)
    }

    /// Store the raw rental form snapshot and replace the hourly price set
    /// with the records resolved from the selected mode. The cleaning fee is
    /// its own singleton and only changes when resubmitted.
    pub fn submit_rental(
        &self,
        id: &ProcessId,
        submission: RentalSubmission,
        now: DateTime<Utc>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let mut process = self.fetch_open(id)?;
        let space_id = process.space.id.clone();

        process.space.rental = rental_snapshot(&submission);

        let mut prices: Vec<_> = process
            .space
            .prices
            .drain(..)
            .filter(|record| record.price_type == PriceType::CleaningFee)
            .collect();
        if let Some(fee) = submission.cleaning_fee.as_deref() {
            prices.retain(|record| record.price_type != PriceType::CleaningFee);
            prices.push(cleaning_fee_price(&space_id, fee, now));
        }
        prices.extend(resolve_prices(&space_id, &submission.selection, now));
        process.space.prices = prices;

        debug!(
            process = %id.0,
            prices = process.space.prices.len(),
            "rental configuration submitted"
        );
        self.store(process)
    }

    pub fn submit_packages(
        &self,
        id: &ProcessId,
        entries: Vec<AddOnSubmission>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let add_ons = self.build_add_ons("packages", entries, Some(self.config.max_packages))?;
        let mut process = self.fetch_open(id)?;
        process.space.packages = add_ons;
        self.store(process)
    }

    pub fn submit_services(
        &self,
        id: &ProcessId,
        entries: Vec<AddOnSubmission>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let add_ons = self.build_add_ons("services", entries, Some(self.config.max_services))?;
        let mut process = self.fetch_open(id)?;
        process.space.services = add_ons;
        self.store(process)
    }

    pub fn submit_extras(
        &self,
        id: &ProcessId,
        entries: Vec<AddOnSubmission>,
    ) -> Result<OnboardingProcess, OnboardingError> {
        let add_ons = self.build_add_ons("extras", entries, None)?;
        let mut process = self.fetch_open(id)?;
        process.space.extras = add_ons;
        self.store(process)
    }

    fn build_add_ons(
        &self,
        section: &'static str,
        entries: Vec<AddOnSubmission>,
        cap: Option<usize>,
    ) -> Result<Vec<SpaceAddOn>, OnboardingError> {
        if let Some(limit) = cap {
            if entries.len() > limit {
                return Err(ValidationError::TooManyEntries { section, limit }.into());
            }
        }

        let add_ons: Vec<SpaceAddOn> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| SpaceAddOn {
                id: format!("{}-{}", section, index + 1),
                name: entry.name,
                status: entry.status,
                rate: entry.rate,
                price: entry.price,
            })
            .collect();

        for add_on in &add_ons {
            if add_on.status == OfferStatus::Published && !is_add_on_complete(add_on) {
                return Err(ValidationError::IncompletePublish { section }.into());
            }
        }

        Ok(add_ons)
    }

    /// Fetch a process that still accepts configuration edits.
    fn fetch_open(&self, id: &ProcessId) -> Result<OnboardingProcess, OnboardingError> {
        let process = self.get(id)?;
        match process.status {
            ProcessStatus::InProgress | ProcessStatus::Scheduled => Ok(process),
            ProcessStatus::Completed | ProcessStatus::Archived => {
                Err(ValidationError::ProcessClosed {
                    status: process.status.label(),
                }
                .into())
            }
        }
    }

    fn store(&self, process: OnboardingProcess) -> Result<OnboardingProcess, OnboardingError> {
        self.repository.update(process.clone())?;
        Ok(process)
    }
}

/// Derive the per-mode draft fields the completeness evaluator reads from
/// the submitted selection.
fn rental_snapshot(submission: &RentalSubmission) -> RentalConfig {
    let (fixed_price, flexible_base_price, custom_first_price) = match &submission.selection {
        PricingSelection::HourlyFixed { price } => (Some(price.clone()), None, None),
        PricingSelection::HourlyFlexible { base_price, .. } => {
            (None, Some(base_price.clone()), None)
        }
        PricingSelection::HourlyCustom { windows } => (
            None,
            None,
            windows.first().and_then(|window| window.price.clone()),
        ),
    };

    RentalConfig {
        cancellation_policy: CancellationPolicy {
            base_refund: submission.base_refund.clone(),
        },
        lotation: submission.lotation.clone(),
        min_hours: submission.min_hours.clone(),
        fixed_price,
        flexible_base_price,
        custom_first_price,
    }
}
