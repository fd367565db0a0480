use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{NewVacancy, Vacancy, VacancyDraft, VacancyId};
use super::outcome::Confirmation;
use super::repository::{HiringRepository, RepositoryError};
use super::views::{HeadVacancyView, VacancyView};
use crate::clock::Clock;

pub const VACANCY_CREATED: &str = "Vacante creada correctamente";

/// Every variant renders the same generic message; the variant tells callers what failed.
#[derive(Debug, thiserror::Error)]
pub enum VacancyError {
    #[error("Hubo un error al crear la vacante. Intentalo otra vez")]
    InvalidDraft,
    #[error("Hubo un error al crear la vacante. Intentalo otra vez")]
    UnknownHead { ci: Option<String> },
    #[error("Hubo un error al crear la vacante. Intentalo otra vez")]
    UnknownSubject { code: String },
    #[error("Hubo un error al crear la vacante. Intentalo otra vez")]
    Repository(#[source] RepositoryError),
}

impl From<RepositoryError> for VacancyError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

/// A draft is publishable when its window is ordered and it has a name and description.
pub fn is_valid_draft(draft: &VacancyDraft) -> bool {
    draft.starts_at <= draft.ends_at
        && !draft.name.trim().is_empty()
        && !draft.description.trim().is_empty()
}

pub struct VacancyService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> VacancyService<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn validate(&self, draft: &VacancyDraft) -> bool {
        is_valid_draft(draft)
    }

    /// Publish a vacancy for the department head identified by `draft.head_ci`.
    pub fn create(&self, draft: VacancyDraft) -> Result<Confirmation<Vacancy>, VacancyError> {
        if !is_valid_draft(&draft) {
            warn!(name = %draft.name, "rejected invalid vacancy draft");
            return Err(VacancyError::InvalidDraft);
        }

        let head = match draft.head_ci.as_deref() {
            Some(ci) => self.repository.head_by_ci(ci)?,
            None => None,
        };
        let Some((head, _)) = head else {
            warn!(ci = ?draft.head_ci, "vacancy draft without a known department head");
            return Err(VacancyError::UnknownHead { ci: draft.head_ci });
        };

        let Some(subject) = self.repository.subject_by_code(&draft.subject_code)? else {
            warn!(code = %draft.subject_code, "vacancy draft for unknown subject");
            return Err(VacancyError::UnknownSubject {
                code: draft.subject_code,
            });
        };

        let vacancy = self.repository.insert_vacancy(NewVacancy {
            name: draft.name,
            description: draft.description,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            subject_id: Some(subject.id),
            head_id: head.id,
        })?;

        info!(vacancy_id = %vacancy.id, head_id = %head.id, "vacancy created");
        Ok(Confirmation::new(VACANCY_CREATED, vacancy))
    }

    /// Open vacancies the user identified by `ci` has not applied to yet.
    pub fn available(&self, ci: &str) -> Result<Vec<VacancyView>, RepositoryError> {
        let applied: Vec<VacancyId> = match self.repository.teacher_by_ci(ci)? {
            Some((teacher, _)) => self
                .repository
                .applications_for_teacher(teacher.id)?
                .into_iter()
                .map(|application| application.vacancy_id)
                .collect(),
            None => Vec::new(),
        };

        let now = self.clock.now();
        let open = self
            .repository
            .vacancies()?
            .into_iter()
            .filter(|vacancy| vacancy.is_open(now) && !applied.contains(&vacancy.id));
        self.vacancy_views(open)
    }

    pub fn detail(&self, vacancy_id: VacancyId) -> Result<Option<VacancyView>, RepositoryError> {
        match self.repository.vacancy(vacancy_id)? {
            Some(vacancy) => Ok(self.vacancy_views(std::iter::once(vacancy))?.pop()),
            None => Ok(None),
        }
    }

    /// The head's vacancies still accepting applications.
    pub fn head_current(&self, ci: &str) -> Result<Vec<HeadVacancyView>, RepositoryError> {
        let now = self.clock.now();
        self.head_views(ci, |vacancy| vacancy.is_current(now))
    }

    /// The head's expired vacancies.
    pub fn head_history(&self, ci: &str) -> Result<Vec<HeadVacancyView>, RepositoryError> {
        let now = self.clock.now();
        self.head_views(ci, |vacancy| !vacancy.is_current(now))
    }

    fn vacancy_views(
        &self,
        vacancies: impl Iterator<Item = Vacancy>,
    ) -> Result<Vec<VacancyView>, RepositoryError> {
        let mut views = Vec::new();
        for vacancy in vacancies {
            let subject = match vacancy.subject_id {
                Some(id) => self.repository.subject(id)?,
                None => None,
            };
            views.push(VacancyView::new(vacancy, subject.as_ref()));
        }
        views.sort_by_key(|view| view.vacancy_id);
        Ok(views)
    }

    fn head_views(
        &self,
        ci: &str,
        keep: impl Fn(&Vacancy) -> bool,
    ) -> Result<Vec<HeadVacancyView>, RepositoryError> {
        let Some((head, _)) = self.repository.head_by_ci(ci)? else {
            return Ok(Vec::new());
        };

        let mut views = Vec::new();
        for vacancy in self.repository.vacancies_for_head(head.id)? {
            if !keep(&vacancy) {
                continue;
            }
            let subject = match vacancy.subject_id {
                Some(id) => self.repository.subject(id)?.map(|subject| subject.name),
                None => None,
            };
            let applicants = self.repository.applications_for_vacancy(vacancy.id)?.len();
            views.push(HeadVacancyView {
                vacancy_id: vacancy.id,
                name: vacancy.name,
                description: vacancy.description,
                subject: subject.unwrap_or_default(),
                applicants,
            });
        }
        views.sort_by_key(|view| view.vacancy_id);
        Ok(views)
    }
}

