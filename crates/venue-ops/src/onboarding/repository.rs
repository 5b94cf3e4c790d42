//! Storage and identity seams for the onboarding service.
//!
//! The core never talks to the network itself: a `ProcessRepository` supplies
//! and persists snapshots (last-write-wins is assumed at that layer), and an
//! `IdentityProvider` stands in for the session so no handler depends on
//! ambient global state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{OnboardingProcess, ProcessId, ProcessStatus, StaffAssignee};
use super::sections::SectionReport;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ProcessRepository: Send + Sync {
    fn insert(&self, process: OnboardingProcess) -> Result<OnboardingProcess, RepositoryError>;
    fn update(&self, process: OnboardingProcess) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProcessId) -> Result<Option<OnboardingProcess>, RepositoryError>;
    fn list(&self, status: Option<ProcessStatus>)
        -> Result<Vec<OnboardingProcess>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Session capability exposing the authenticated staff member.
pub trait IdentityProvider: Send + Sync {
    fn current_staff(&self) -> Result<StaffAssignee, IdentityError>;
}

/// Error raised when no usable session is present.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("no authenticated staff session")]
    Unauthenticated,
}

/// Row shown in the processes-list table.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    pub id: ProcessId,
    pub status: &'static str,
    pub space_name: Option<String>,
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_date: Option<DateTime<Utc>>,
}

/// Full process view returned by the detail endpoints, with the section
/// flags the wizard consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessView {
    pub id: ProcessId,
    pub status: &'static str,
    pub business_model: &'static str,
    pub assignee: Option<StaffAssignee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_date: Option<DateTime<Utc>>,
    pub sections: SectionReport,
    pub missing_sections: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<&'static str>,
    pub process: OnboardingProcess,
}

/// View helpers derived fresh from the snapshot on every call.
pub trait ProcessViews {
    fn summary(&self) -> ProcessSummary;
    fn view(&self) -> ProcessView;
}

impl ProcessViews for OnboardingProcess {
    fn summary(&self) -> ProcessSummary {
        ProcessSummary {
            id: self.id.clone(),
            status: self.status.label(),
            space_name: self.space.info.name.clone(),
            assignee: self.assignee.as_ref().map(|staff| staff.name.clone()),
            schedule_date: self.schedule_date,
        }
    }

    fn view(&self) -> ProcessView {
        let report = SectionReport::evaluate(self);
        let business_model = self.space.business_model;
        ProcessView {
            id: self.id.clone(),
            status: self.status.label(),
            business_model: business_model.label(),
            assignee: self.assignee.clone(),
            schedule_date: self.schedule_date,
            sections: report,
            missing_sections: report
                .missing_required(business_model)
                .into_iter()
                .map(|section| section.slug())
                .collect(),
            next_step: report.next_step(business_model).map(|section| section.slug()),
            process: self.clone(),
        }
    }
}
