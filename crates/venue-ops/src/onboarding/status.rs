//! Legal status transitions for every pipeline entity.
//!
//! Each table is an explicit allow-list; anything not listed is illegal, and
//! terminal states list no successors at all. Timestamping a successful
//! transition is owned by the persistence layer, not this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, HostStatus, ProcessStatus, SpaceStatus};

/// The entity kinds whose statuses move through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    OnboardingProcess,
    Host,
    Space,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::OnboardingProcess => "onboarding process",
            Self::Host => "host",
            Self::Space => "space",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when an action would move an entity outside its allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal {entity} transition from '{from}' to '{to}'")]
pub struct InvalidTransition {
    pub entity: EntityKind,
    pub from: &'static str,
    pub to: &'static str,
}

/// Allow-list state machine implemented by every status enum.
pub trait StatusPipeline: Copy + Eq + Sized + 'static {
    const ENTITY: EntityKind;

    fn status_label(self) -> &'static str;

    /// States directly reachable from `self`. Empty for terminal states.
    fn successors(self) -> &'static [Self];

    fn can_transition(self, to: Self) -> bool {
        self.successors().contains(&to)
    }

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    fn transition(self, to: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(InvalidTransition {
                entity: Self::ENTITY,
                from: self.status_label(),
                to: to.status_label(),
            })
        }
    }
}

impl StatusPipeline for ApplicationStatus {
    const ENTITY: EntityKind = EntityKind::Application;

    fn status_label(self) -> &'static str {
        self.label()
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Spontaneous => &[Self::Sent, Self::Rejected],
            Self::Sent => &[Self::Ready, Self::Rejected],
            Self::Ready => &[Self::Onboarding, Self::Rejected],
            Self::Onboarding => &[Self::Scheduled, Self::Completed, Self::Rejected],
            // Scheduled is a reversible pending state, never a dead end.
            Self::Scheduled => &[Self::Onboarding, Self::Completed, Self::Rejected],
            Self::Completed => &[],
            Self::Rejected => &[],
        }
    }
}

impl StatusPipeline for ProcessStatus {
    const ENTITY: EntityKind = EntityKind::OnboardingProcess;

    fn status_label(self) -> &'static str {
        self.label()
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::InProgress => &[Self::Scheduled, Self::Completed, Self::Archived],
            Self::Scheduled => &[Self::InProgress, Self::Completed, Self::Archived],
            // Completed processes may be pulled back for re-scheduling.
            Self::Completed => &[Self::Scheduled, Self::Archived],
            Self::Archived => &[],
        }
    }
}

impl StatusPipeline for HostStatus {
    const ENTITY: EntityKind = EntityKind::Host;

    fn status_label(self) -> &'static str {
        self.label()
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Active, Self::Suspended, Self::Archived],
            Self::Active => &[Self::Suspended, Self::Archived],
            Self::Suspended => &[Self::Active, Self::Archived],
            Self::Archived => &[],
        }
    }
}

impl StatusPipeline for SpaceStatus {
    const ENTITY: EntityKind = EntityKind::Space;

    fn status_label(self) -> &'static str {
        self.label()
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Pending, Self::Archived],
            Self::Pending => &[Self::Active, Self::Archived],
            Self::Active => &[Self::Archived],
            Self::Archived => &[],
        }
    }
}
