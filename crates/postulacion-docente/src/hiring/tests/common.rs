use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::clock::FixedClock;
use crate::hiring::domain::{
    Application, ApplicationId, ApplicationStatus, Career, CareerId, DepartmentHead, HeadId,
    NewApplication, NewTeacher, NewUser, NewVacancy, Subject, SubjectId, Teacher, TeacherId,
    User, UserId, Vacancy, VacancyId,
};
use crate::hiring::memory::{demo_seed, HiringSeed, InMemoryHiringRepository};
use crate::hiring::repository::{HiringRepository, RepositoryError, UserLookup};
use crate::hiring::service::HiringServices;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn days_from_now(days: i64) -> DateTime<Utc> {
    now() + Duration::days(days)
}

pub(super) fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 17).expect("valid date")
}

pub(super) fn seed() -> HiringSeed {
    demo_seed(now())
}

/// Fixture where the first two applications are already at the interview stage.
pub(super) fn interview_seed() -> HiringSeed {
    let mut seed = seed();
    for application in &mut seed.applications {
        if application.id == ApplicationId(1) || application.id == ApplicationId(2) {
            application.status = ApplicationStatus::Interview;
        }
    }
    seed
}

pub(super) fn build_services(
    seed: HiringSeed,
) -> (
    HiringServices<InMemoryHiringRepository>,
    Arc<InMemoryHiringRepository>,
) {
    let repository = Arc::new(InMemoryHiringRepository::from_seed(seed));
    let services = HiringServices::new(repository.clone(), Arc::new(FixedClock(now())));
    (services, repository)
}

pub(super) fn stored_status(
    repository: &InMemoryHiringRepository,
    id: i64,
) -> ApplicationStatus {
    repository
        .application(ApplicationId(id))
        .expect("fetch succeeds")
        .expect("application present")
        .status
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

pub(super) struct UnavailableRepository;

impl HiringRepository for UnavailableRepository {
    fn application(&self, _id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        offline()
    }

    fn insert_application(&self, _new: NewApplication) -> Result<Application, RepositoryError> {
        offline()
    }

    fn update_application(&self, _application: Application) -> Result<(), RepositoryError> {
        offline()
    }

    fn applications_for_teacher(
        &self,
        _teacher_id: TeacherId,
    ) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }

    fn applications_for_vacancy(
        &self,
        _vacancy_id: VacancyId,
    ) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }

    fn user(&self, _id: UserId) -> Result<Option<User>, RepositoryError> {
        offline()
    }

    fn find_user(&self, _lookup: UserLookup<'_>) -> Result<Option<User>, RepositoryError> {
        offline()
    }

    fn teacher(&self, _id: TeacherId) -> Result<Option<Teacher>, RepositoryError> {
        offline()
    }

    fn teacher_by_user(&self, _user_id: UserId) -> Result<Option<Teacher>, RepositoryError> {
        offline()
    }

    fn register_teacher(
        &self,
        _user: NewUser,
        _teacher: NewTeacher,
    ) -> Result<(User, Teacher), RepositoryError> {
        offline()
    }

    fn head(&self, _id: HeadId) -> Result<Option<DepartmentHead>, RepositoryError> {
        offline()
    }

    fn head_by_user(&self, _user_id: UserId) -> Result<Option<DepartmentHead>, RepositoryError> {
        offline()
    }

    fn register_head(
        &self,
        _user: NewUser,
        _careers: Vec<CareerId>,
    ) -> Result<(User, DepartmentHead), RepositoryError> {
        offline()
    }

    fn career_by_code(&self, _code: &str) -> Result<Option<Career>, RepositoryError> {
        offline()
    }

    fn subject(&self, _id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        offline()
    }

    fn subject_by_code(&self, _code: &str) -> Result<Option<Subject>, RepositoryError> {
        offline()
    }

    fn subjects(&self) -> Result<Vec<Subject>, RepositoryError> {
        offline()
    }

    fn vacancy(&self, _id: VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        offline()
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        offline()
    }

    fn vacancies_for_head(&self, _head_id: HeadId) -> Result<Vec<Vacancy>, RepositoryError> {
        offline()
    }

    fn insert_vacancy(&self, _new: NewVacancy) -> Result<Vacancy, RepositoryError> {
        offline()
    }
}

pub(super) fn unavailable_services() -> HiringServices<UnavailableRepository> {
    HiringServices::new(Arc::new(UnavailableRepository), Arc::new(FixedClock(now())))
}
