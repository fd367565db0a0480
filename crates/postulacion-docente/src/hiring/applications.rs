use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationId, ApplicationRequest, ApplicationStatus, NewApplication, VacancyId,
};
use super::outcome::Confirmation;
use super::repository::{HiringRepository, RepositoryError};
use super::views::{status_fields, ApplicantView, ApplicationDetailsView};
use crate::clock::Clock;

pub const APPLIED: &str = "Se ha postulado correctamente";

/// Reasons a teacher's application is refused.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Hubo un error al registrar la docente en la vacante. Intentelo otra vez")]
    UnknownTeacher { ci: String },
    #[error("La vacante a dejado de ser vigente. Recargue la pagina")]
    VacancyExpired { vacancy_id: VacancyId },
    #[error("Hubo un error al registrar la docente en la vacante. Intentelo otra vez")]
    UnknownVacancy { vacancy_id: VacancyId },
    #[error("Hubo un error al registrar la docente en la vacante. Intentelo otra vez")]
    AlreadyApplied { vacancy_id: VacancyId },
    #[error("Hubo un error al registrar la docente en la vacante. Intentelo otra vez")]
    Repository(#[source] RepositoryError),
}

impl From<RepositoryError> for SubmissionError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

/// Submission and read side of teacher applications.
pub struct ApplicationService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ApplicationService<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Apply the teacher identified by `request.ci` to a vacancy. New applications start
    /// under review.
    pub fn submit(
        &self,
        request: ApplicationRequest,
    ) -> Result<Confirmation<Application>, SubmissionError> {
        let ApplicationRequest {
            vacancy_id,
            ci,
            vacancy_expires_at,
        } = request;

        let Some((teacher, _)) = self.repository.teacher_by_ci(&ci)? else {
            warn!(%ci, "application from unknown teacher");
            return Err(SubmissionError::UnknownTeacher { ci });
        };

        let now = self.clock.now();
        if vacancy_expires_at < now {
            warn!(%vacancy_id, %ci, "application to an expired vacancy");
            return Err(SubmissionError::VacancyExpired { vacancy_id });
        }

        let Some(vacancy) = self.repository.vacancy(vacancy_id)? else {
            warn!(%vacancy_id, "application to an unknown vacancy");
            return Err(SubmissionError::UnknownVacancy { vacancy_id });
        };
        if !vacancy.is_open(now) {
            warn!(
                %vacancy_id,
                %ci,
                ends_at = %vacancy.ends_at,
                "application outside the vacancy window"
            );
            return Err(SubmissionError::VacancyExpired { vacancy_id });
        }

        let already_applied = self
            .repository
            .applications_for_teacher(teacher.id)?
            .iter()
            .any(|application| application.vacancy_id == vacancy_id);
        if already_applied {
            warn!(%vacancy_id, teacher_id = %teacher.id, "duplicate application");
            return Err(SubmissionError::AlreadyApplied { vacancy_id });
        }

        let application = self.repository.insert_application(NewApplication {
            vacancy_id,
            teacher_id: teacher.id,
            status: ApplicationStatus::UnderReview,
        })?;

        info!(
            application_id = %application.id,
            %vacancy_id,
            teacher_id = %teacher.id,
            "application submitted"
        );
        Ok(Confirmation::new(APPLIED, application))
    }

    pub fn details(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<ApplicationDetailsView>, RepositoryError> {
        match self.repository.application(application_id)? {
            Some(application) => self.details_view(&application),
            None => {
                debug!(%application_id, "no application details");
                Ok(None)
            }
        }
    }

    /// Applications still in play: vacancy open and no final decision yet.
    pub fn current_for_teacher(
        &self,
        ci: &str,
    ) -> Result<Vec<ApplicationDetailsView>, RepositoryError> {
        self.teacher_views(ci, true)
    }

    /// Applications whose vacancy expired or that already got a final decision.
    pub fn history_for_teacher(
        &self,
        ci: &str,
    ) -> Result<Vec<ApplicationDetailsView>, RepositoryError> {
        self.teacher_views(ci, false)
    }

    /// Everyone who applied to a vacancy, for the reviewing department head.
    pub fn applicants(&self, vacancy_id: VacancyId) -> Result<Vec<ApplicantView>, RepositoryError> {
        let mut applicants = Vec::new();
        for application in self.repository.applications_for_vacancy(vacancy_id)? {
            let Some(teacher) = self.repository.teacher(application.teacher_id)? else {
                continue;
            };
            let Some(user) = self.repository.user(teacher.user_id)? else {
                continue;
            };
            let (status, status_description) = status_fields(application.status);
            applicants.push(ApplicantView {
                application_id: application.id,
                teacher_name: user.name,
                ci: user.ci,
                email: user.email,
                phone: user.phone,
                specialty: teacher.specialty,
                experience_years: teacher.experience_years,
                degree: teacher.degree,
                status,
                status_description,
            });
        }
        applicants.sort_by_key(|view| view.application_id);
        Ok(applicants)
    }

    fn teacher_views(
        &self,
        ci: &str,
        current: bool,
    ) -> Result<Vec<ApplicationDetailsView>, RepositoryError> {
        let Some((teacher, _)) = self.repository.teacher_by_ci(ci)? else {
            debug!(%ci, "no teacher for identity number");
            return Ok(Vec::new());
        };

        let now = self.clock.now();
        let mut views = Vec::new();
        for application in self.repository.applications_for_teacher(teacher.id)? {
            let Some(vacancy) = self.repository.vacancy(application.vacancy_id)? else {
                continue;
            };
            let in_play = vacancy.is_current(now) && !application.status.is_final();
            if in_play != current {
                continue;
            }
            if let Some(view) = self.details_view(&application)? {
                views.push(view);
            }
        }
        views.sort_by_key(|view| view.application_id);
        Ok(views)
    }

    fn details_view(
        &self,
        application: &Application,
    ) -> Result<Option<ApplicationDetailsView>, RepositoryError> {
        let Some(vacancy) = self.repository.vacancy(application.vacancy_id)? else {
            return Ok(None);
        };
        let subject_title = match vacancy.subject_id {
            Some(id) => self
                .repository
                .subject(id)?
                .map(|subject| subject.name)
                .unwrap_or_default(),
            None => String::new(),
        };
        let head_user = match self.repository.head(vacancy.head_id)? {
            Some(head) => self.repository.user(head.user_id)?,
            None => None,
        };
        let (head_name, head_email) = head_user
            .map(|user| (user.name, user.email))
            .unwrap_or_default();
        let (status, status_description) = status_fields(application.status);

        Ok(Some(ApplicationDetailsView {
            application_id: application.id,
            subject_title,
            status,
            status_description,
            vacancy_name: vacancy.name,
            vacancy_description: vacancy.description,
            head_email,
            head_name,
        }))
    }
}
