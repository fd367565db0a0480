use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a submitted application ("postulacion").
    ApplicationId
);
entity_id!(VacancyId);
entity_id!(TeacherId);
entity_id!(HeadId);
entity_id!(UserId);
entity_id!(SubjectId);
entity_id!(CareerId);

/// The five ordered review states an application moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    UnderReview,
    Presentation,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::UnderReview,
        ApplicationStatus::Presentation,
        ApplicationStatus::Interview,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            ApplicationStatus::UnderReview => 1,
            ApplicationStatus::Presentation => 2,
            ApplicationStatus::Interview => 3,
            ApplicationStatus::Accepted => 4,
            ApplicationStatus::Rejected => 5,
        }
    }

    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(ApplicationStatus::UnderReview),
            2 => Some(ApplicationStatus::Presentation),
            3 => Some(ApplicationStatus::Interview),
            4 => Some(ApplicationStatus::Accepted),
            5 => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// User facing label stored in the state catalog.
    pub const fn description(self) -> &'static str {
        match self {
            ApplicationStatus::UnderReview => "En revisión",
            ApplicationStatus::Presentation => "Exposición",
            ApplicationStatus::Interview => "Entrevista",
            ApplicationStatus::Accepted => "Aceptado",
            ApplicationStatus::Rejected => "Rechazado",
        }
    }

    /// Accepted and rejected applications have left the review pipeline.
    pub const fn is_final(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Account shared by teachers and department heads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub ci: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub ci: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub user_id: UserId,
    pub specialty: String,
    pub experience_years: u32,
    pub personal_description: String,
    pub degree: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeacher {
    pub specialty: String,
    pub experience_years: u32,
    pub personal_description: String,
    pub degree: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHead {
    pub id: HeadId,
    pub user_id: UserId,
    pub career_ids: Vec<CareerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: CareerId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub career_ids: Vec<CareerId>,
}

/// Job posting owned by a department head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub subject_id: Option<SubjectId>,
    pub head_id: HeadId,
}

impl Vacancy {
    /// Still accepting applications at `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        now <= self.ends_at
    }

    /// Inside its publication window at `now`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && self.is_current(now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacancy {
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub subject_id: Option<SubjectId>,
    pub head_id: HeadId,
}

/// A teacher's application to a vacancy and its current review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub vacancy_id: VacancyId,
    pub teacher_id: TeacherId,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub vacancy_id: VacancyId,
    pub teacher_id: TeacherId,
    pub status: ApplicationStatus,
}

/// Request sent by a teacher applying to a vacancy. The expiry is the one the client saw
/// when rendering the vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub vacancy_id: VacancyId,
    pub ci: String,
    pub vacancy_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRegistration {
    pub name: String,
    pub phone: String,
    pub ci: String,
    pub birth_date: NaiveDate,
    pub personal_description: String,
    pub subject: String,
    pub degree: String,
    pub experience_years: u32,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRegistration {
    pub name: String,
    pub phone: String,
    pub ci: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub password: String,
    /// Career codes ("siglas") the head coordinates.
    pub careers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyDraft {
    pub name: String,
    pub subject_code: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub head_ci: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
