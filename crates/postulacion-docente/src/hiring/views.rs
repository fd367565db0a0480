//! Serializable projections returned by the query operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStatus, Subject, Vacancy, VacancyId};

/// Application as shown to the teacher who submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetailsView {
    pub application_id: ApplicationId,
    pub subject_title: String,
    pub status: u8,
    pub status_description: String,
    pub vacancy_name: String,
    pub vacancy_description: String,
    pub head_email: String,
    pub head_name: String,
}

/// Applicant row shown to the department head reviewing a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantView {
    pub application_id: ApplicationId,
    pub teacher_name: String,
    pub ci: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub experience_years: u32,
    pub degree: String,
    pub status: u8,
    pub status_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyView {
    pub vacancy_id: VacancyId,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub subject: String,
}

impl VacancyView {
    pub fn new(vacancy: Vacancy, subject: Option<&Subject>) -> Self {
        Self {
            vacancy_id: vacancy.id,
            name: vacancy.name,
            description: vacancy.description,
            starts_at: vacancy.starts_at,
            ends_at: vacancy.ends_at,
            subject: subject.map(|s| s.name.clone()).unwrap_or_default(),
        }
    }
}

/// Vacancy summary for the owning department head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadVacancyView {
    pub vacancy_id: VacancyId,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub applicants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectView {
    pub name: String,
    pub code: String,
}

impl From<Subject> for SubjectView {
    fn from(subject: Subject) -> Self {
        Self {
            name: subject.name,
            code: subject.code,
        }
    }
}

pub(crate) fn status_fields(status: ApplicationStatus) -> (u8, String) {
    (status.rank(), status.description().to_string())
}
