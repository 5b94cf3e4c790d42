//! Section completion flags driving the onboarding wizard.
//!
//! Flags are recomputed from the process snapshot on every read and never
//! cached: a stale read against a pending save is a known transient state,
//! and caching across a refetch would turn it into a real inconsistency.

use serde::{Deserialize, Serialize};

use super::completeness::{
    all_add_ons_complete, has_published_package, is_rental_complete,
};
use super::domain::{BusinessModel, OnboardingProcess, ProcessStatus};

/// The wizard sections, in the order staff walk through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Intro,
    SpaceInfo,
    SpacePhotos,
    Rental,
    Packages,
    Services,
    Extras,
}

impl Section {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Intro,
            Self::SpaceInfo,
            Self::SpacePhotos,
            Self::Rental,
            Self::Packages,
            Self::Services,
            Self::Extras,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::SpaceInfo => "space-info",
            Self::SpacePhotos => "space-photos",
            Self::Rental => "rental",
            Self::Packages => "packages",
            Self::Services => "services",
            Self::Extras => "extras",
        }
    }

    /// Extras never block completion; packages and services only do when the
    /// business model sells packages.
    pub const fn is_required(self, business_model: BusinessModel) -> bool {
        match self {
            Self::Intro | Self::SpaceInfo | Self::SpacePhotos | Self::Rental => true,
            Self::Packages | Self::Services => business_model.allows_packages(),
            Self::Extras => false,
        }
    }
}

/// Per-section completion flags for one process snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub intro: bool,
    pub space_info: bool,
    pub space_photos: bool,
    pub rental: bool,
    pub packages: bool,
    pub services: bool,
    pub extras: bool,
}

impl SectionReport {
    /// Derive every flag from the current snapshot.
    pub fn evaluate(process: &OnboardingProcess) -> Self {
        let space = &process.space;
        let info = &space.info;

        Self {
            intro: process.assignee.is_some() && process.intro_completed,
            space_info: [&info.name, &info.space_type, &info.locality]
                .iter()
                .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty())),
            space_photos: !space.photos.is_empty(),
            rental: is_rental_complete(space),
            packages: has_published_package(space) && all_add_ons_complete(&space.packages),
            services: all_add_ons_complete(&space.services),
            extras: all_add_ons_complete(&space.extras),
        }
    }

    pub const fn flag(&self, section: Section) -> bool {
        match section {
            Section::Intro => self.intro,
            Section::SpaceInfo => self.space_info,
            Section::SpacePhotos => self.space_photos,
            Section::Rental => self.rental,
            Section::Packages => self.packages,
            Section::Services => self.services,
            Section::Extras => self.extras,
        }
    }

    /// Required sections still incomplete, in wizard order.
    pub fn missing_required(&self, business_model: BusinessModel) -> Vec<Section> {
        Section::ordered()
            .into_iter()
            .filter(|section| section.is_required(business_model) && !self.flag(*section))
            .collect()
    }

    /// The next wizard step to route staff to, or `None` when nothing blocks.
    pub fn next_step(&self, business_model: BusinessModel) -> Option<Section> {
        self.missing_required(business_model).into_iter().next()
    }

    pub fn is_ready(&self, business_model: BusinessModel) -> bool {
        self.missing_required(business_model).is_empty()
    }
}

/// Whether a process may transition to completed right now: every required
/// section satisfied and the status still open for completion.
pub fn can_complete(process: &OnboardingProcess) -> bool {
    let status_allows = matches!(
        process.status,
        ProcessStatus::InProgress | ProcessStatus::Scheduled
    );
    status_allows
        && SectionReport::evaluate(process).is_ready(process.space.business_model)
}
