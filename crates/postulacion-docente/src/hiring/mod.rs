//! Teacher hiring: vacancies, registration, applications and the review status ladder.

pub mod accounts;
pub mod applications;
pub mod domain;
pub mod ladder;
pub mod memory;
pub mod outcome;
pub mod registration;
pub mod repository;
pub mod router;
pub mod service;
pub mod subjects;
pub mod vacancies;
pub mod views;

#[cfg(test)]
mod tests;

pub use accounts::{AccountService, LoginError, Role};
pub use applications::{ApplicationService, SubmissionError};
pub use domain::{
    Application, ApplicationId, ApplicationRequest, ApplicationStatus, Career, CareerId,
    DepartmentHead, HeadId, HeadRegistration, LoginCredentials, Subject, SubjectId, Teacher,
    TeacherId, TeacherRegistration, User, UserId, Vacancy, VacancyDraft, VacancyId,
};
pub use ladder::{LadderError, LadderMove, StatusChange, StatusLadder};
pub use memory::{demo_seed, HiringSeed, InMemoryHiringRepository};
pub use outcome::Confirmation;
pub use registration::{RegistrationError, RegistrationService};
pub use repository::{HiringRepository, RepositoryError, UserLookup};
pub use router::hiring_router;
pub use service::HiringServices;
pub use subjects::SubjectCatalog;
pub use vacancies::{VacancyError, VacancyService};
pub use views::{
    ApplicantView, ApplicationDetailsView, HeadVacancyView, SubjectView, VacancyView,
};
