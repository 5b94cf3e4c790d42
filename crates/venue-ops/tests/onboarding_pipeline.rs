use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use venue_ops::config::OnboardingConfig;
use venue_ops::onboarding::{
    AddOnRate, AddOnSubmission, ApplicationId, ApplicationSnapshot, ApplicationStatus,
    BusinessModel, HostId, IdentityError, IdentityProvider, IntroUpdate, OfferStatus,
    OnboardingError, OnboardingProcess, OnboardingService, PricingSelection, ProcessId,
    ProcessRepository, ProcessStatus, ProcessViews, RentalConfig, RentalSubmission,
    RepositoryError, Section, Space, SpaceId, SpaceInfo, SpaceInfoUpdate, SpaceStatus,
    StaffAssignee, ValidationError,
};

#[derive(Default)]
struct MemoryRepository {
    records: Mutex<HashMap<ProcessId, OnboardingProcess>>,
}

impl ProcessRepository for MemoryRepository {
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
        guard.insert(process.id.clone(), process);
        Ok(())
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

struct StaticIdentity;

impl IdentityProvider for StaticIdentity {
    fn current_staff(&self) -> Result<StaffAssignee, IdentityError> {
        Ok(StaffAssignee {
            id: "staff-7".to_string(),
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
        })
    }
}

fn service() -> OnboardingService<MemoryRepository, StaticIdentity> {
    OnboardingService::new(
        Arc::new(MemoryRepository::default()),
        Arc::new(StaticIdentity),
        OnboardingConfig::default(),
    )
}

fn application() -> ApplicationSnapshot {
    ApplicationSnapshot {
        id: ApplicationId("app-100".to_string()),
        status: ApplicationStatus::Onboarding,
        contact_name: Some("Rui Costa".to_string()),
        contact_email: Some("rui@example.com".to_string()),
        submitted_on: None,
    }
}

fn draft_space(business_model: BusinessModel) -> Space {
    Space {
        id: SpaceId("space-100".to_string()),
        host_id: HostId("host-100".to_string()),
        status: SpaceStatus::Draft,
        business_model,
        info: SpaceInfo::default(),
        photos: Vec::new(),
        rental: RentalConfig::default(),
        prices: Vec::new(),
        packages: Vec::new(),
        services: Vec::new(),
        extras: Vec::new(),
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn wizard_walkthrough_reaches_completion_for_a_packages_space() {
    let service = service();
    let process = service
        .open(application(), draft_space(BusinessModel::RentalAndPackages))
        .expect("process opens");

    // A fresh process blocks on every required section, in wizard order.
    let view = process.view();
    assert_eq!(view.next_step, Some("intro"));
    assert_eq!(
        view.missing_sections,
        vec!["intro", "space-info", "space-photos", "rental", "packages"]
    );

    let process = service
        .update_intro(
            &process.id,
            IntroUpdate {
                completed: true,
                ..IntroUpdate::default()
            },
        )
        .expect("intro saves");
    assert_eq!(process.view().next_step, Some("space-info"));

    let process = service
        .update_space_info(
            &process.id,
            SpaceInfoUpdate {
                name: Some("Riverside Loft".to_string()),
                space_type: Some("loft".to_string()),
                locality: Some("Porto".to_string()),
                ..SpaceInfoUpdate::default()
            },
        )
        .expect("space info saves");
    assert_eq!(process.view().next_step, Some("space-photos"));

    let process = service
        .update_photos(&process.id, vec!["photos/space-100/main.jpg".to_string()])
        .expect("photos save");
    assert_eq!(process.view().next_step, Some("rental"));

    let process = service
        .submit_rental(
            &process.id,
            RentalSubmission {
                base_refund: Some("50".to_string()),
                lotation: Some("80".to_string()),
                min_hours: Some("3".to_string()),
                selection: PricingSelection::HourlyFlexible {
                    base_price: "40".to_string(),
                    price_after: "25".to_string(),
                    time_limit: "180".to_string(),
                },
                cleaning_fee: Some("15".to_string()),
            },
            now(),
        )
        .expect("rental saves");
    assert_eq!(process.view().next_step, Some("packages"));
    assert_eq!(process.space.prices.len(), 2);

    // Completion is still rejected with the precise missing list.
    match service.complete(&process.id) {
        Err(OnboardingError::IncompleteConfiguration { missing }) => {
            assert_eq!(missing, vec![Section::Packages]);
        }
        other => panic!("expected incomplete configuration, got {other:?}"),
    }

    let process = service
        .submit_packages(
            &process.id,
            vec![AddOnSubmission {
                name: Some("Corporate offsite".to_string()),
                status: OfferStatus::Published,
                rate: Some(AddOnRate::Fixed),
                price: Some("400".to_string()),
            }],
        )
        .expect("packages save");
    assert_eq!(process.view().next_step, None);

    let completed = service.complete(&process.id).expect("completion succeeds");
    assert_eq!(completed.status, ProcessStatus::Completed);
}

#[test]
fn scheduling_is_reversible_and_archive_is_terminal() {
    let service = service();
    let process = service
        .open(application(), draft_space(BusinessModel::OnlyRental))
        .expect("process opens");

    let scheduled = service
        .schedule(&process.id, now() + Duration::days(3), now())
        .expect("scheduling succeeds");
    assert_eq!(scheduled.status, ProcessStatus::Scheduled);

    // Re-scheduling an already scheduled process just moves the date.
    let rescheduled = service
        .schedule(&process.id, now() + Duration::days(10), now())
        .expect("re-scheduling succeeds");
    assert_eq!(rescheduled.status, ProcessStatus::Scheduled);
    assert_eq!(rescheduled.schedule_date, Some(now() + Duration::days(10)));

    let archived = service.archive(&process.id).expect("archive succeeds");
    assert_eq!(archived.status, ProcessStatus::Archived);

    match service.schedule(&process.id, now() + Duration::days(1), now()) {
        Err(OnboardingError::Transition(err)) => assert_eq!(err.from, "archived"),
        other => panic!("expected transition error, got {other:?}"),
    }
}

#[test]
fn catalog_caps_hold_at_the_documented_defaults() {
    let service = service();
    let process = service
        .open(application(), draft_space(BusinessModel::OnlyPackages))
        .expect("process opens");

    let package = AddOnSubmission {
        name: Some("Birthday package".to_string()),
        status: OfferStatus::Draft,
        rate: Some(AddOnRate::PerPerson),
        price: Some("12".to_string()),
    };
    let service_entry = AddOnSubmission {
        name: Some("Catering".to_string()),
        status: OfferStatus::Draft,
        rate: Some(AddOnRate::PerPerson),
        price: Some("8".to_string()),
    };

    let six: Vec<_> = (0..6).map(|_| package.clone()).collect();
    assert!(service.submit_packages(&process.id, six).is_ok());

    let seven: Vec<_> = (0..7).map(|_| package.clone()).collect();
    match service.submit_packages(&process.id, seven) {
        Err(OnboardingError::Validation(ValidationError::TooManyEntries { limit, .. })) => {
            assert_eq!(limit, 6)
        }
        other => panic!("expected too-many-entries, got {other:?}"),
    }

    let eleven: Vec<_> = (0..11).map(|_| service_entry.clone()).collect();
    assert!(service.submit_services(&process.id, eleven).is_ok());

    let twelve: Vec<_> = (0..12).map(|_| service_entry.clone()).collect();
    match service.submit_services(&process.id, twelve) {
        Err(OnboardingError::Validation(ValidationError::TooManyEntries { limit, .. })) => {
            assert_eq!(limit, 11)
        }
        other => panic!("expected too-many-entries, got {other:?}"),
    }

    // Extras carry no cap.
    let extras: Vec<_> = (0..15)
        .map(|_| AddOnSubmission {
            name: Some("Projector".to_string()),
            status: OfferStatus::Draft,
            rate: Some(AddOnRate::Fixed),
            price: Some("20".to_string()),
        })
        .collect();
    assert!(service.submit_extras(&process.id, extras).is_ok());
}
