use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::env;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use venue_ops::onboarding::{
    IdentityError, IdentityProvider, OnboardingProcess, ProcessId, ProcessRepository,
    ProcessStatus, RepositoryError, StaffAssignee,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProcessRepository {
    records: Arc<Mutex<HashMap<ProcessId, OnboardingProcess>>>,
}

impl ProcessRepository for InMemoryProcessRepository {
    fn insert(&self, process: OnboardingProcess) -> Result<OnboardingProcess, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&process.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(process.id.clone(), process.clone());
        Ok(process)
    }

    fn update(&self, process: OnboardingProcess) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&process.id) {
            guard.insert(process.id.clone(), process);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProcessId) -> Result<Option<OnboardingProcess>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(
        &self,
        status: Option<ProcessStatus>,
    ) -> Result<Vec<OnboardingProcess>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|process| status.is_none() || status == Some(process.status))
            .cloned()
            .collect())
    }
}

/// Session identity sourced from the environment until the SSO gateway is
/// wired in front of this service.
#[derive(Clone)]
pub(crate) struct EnvIdentityProvider {
    staff: Option<StaffAssignee>,
}

impl EnvIdentityProvider {
    pub(crate) fn from_env() -> Self {
        let id = env::var("APP_STAFF_ID").ok();
        let name = env::var("APP_STAFF_NAME").ok();
        let email = env::var("APP_STAFF_EMAIL").ok();

        let staff = match (id, name, email) {
            (Some(id), Some(name), Some(email)) => Some(StaffAssignee { id, name, email }),
            _ => None,
        };

        Self { staff }
    }
}

impl IdentityProvider for EnvIdentityProvider {
    fn current_staff(&self) -> Result<StaffAssignee, IdentityError> {
        self.staff.clone().ok_or(IdentityError::Unauthenticated)
    }
}
