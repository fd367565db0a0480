use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    DepartmentHead, HeadRegistration, NewTeacher, NewUser, Teacher, TeacherRegistration, User,
};
use super::outcome::Confirmation;
use super::repository::{HiringRepository, RepositoryError, UserLookup};

pub const TEACHER_REGISTERED: &str = "Docente registrado correctamente";
pub const HEAD_REGISTERED: &str = "Jefe registrado correctamente";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("El email, el numero de telefono o el carnet de identidad ya esta en uso. Intentalo otra vez")]
    CredentialsInUse,
    #[error("Hubo un error al selecccionar las carreras. Intentelo otra vez")]
    UnknownCareers { codes: Vec<String> },
    #[error("Hubo un error al registrar el usuario. Intentelo otra vez")]
    Repository(#[source] RepositoryError),
}

impl From<RepositoryError> for RegistrationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            // Lost a race against another registration with the same credentials.
            RepositoryError::Conflict => Self::CredentialsInUse,
            other => Self::Repository(other),
        }
    }
}

/// Account creation for teachers and department heads.
pub struct RegistrationService<R> {
    repository: Arc<R>,
}

impl<R> RegistrationService<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn register_teacher(
        &self,
        registration: TeacherRegistration,
    ) -> Result<Confirmation<(User, Teacher)>, RegistrationError> {
        let TeacherRegistration {
            name,
            phone,
            ci,
            birth_date,
            personal_description,
            subject,
            degree,
            experience_years,
            email,
            password,
        } = registration;

        let user = NewUser {
            name,
            ci,
            birth_date,
            phone,
            email,
            password,
        };
        self.ensure_credentials_free(&user)?;

        let (user, teacher) = self.repository.register_teacher(
            user,
            NewTeacher {
                specialty: subject,
                experience_years,
                personal_description,
                degree,
            },
        )?;

        info!(user_id = %user.id, teacher_id = %teacher.id, "teacher registered");
        Ok(Confirmation::new(TEACHER_REGISTERED, (user, teacher)))
    }

    pub fn register_head(
        &self,
        registration: HeadRegistration,
    ) -> Result<Confirmation<(User, DepartmentHead)>, RegistrationError> {
        let HeadRegistration {
            name,
            phone,
            ci,
            birth_date,
            email,
            password,
            careers,
        } = registration;

        let user = NewUser {
            name,
            ci,
            birth_date,
            phone,
            email,
            password,
        };
        self.ensure_credentials_free(&user)?;

        let mut career_ids = Vec::with_capacity(careers.len());
        let mut unknown = Vec::new();
        for code in careers {
            match self.repository.career_by_code(&code)? {
                Some(career) => career_ids.push(career.id),
                None => unknown.push(code),
            }
        }
        if !unknown.is_empty() {
            warn!(codes = ?unknown, "head registration with unknown careers");
            return Err(RegistrationError::UnknownCareers { codes: unknown });
        }

        let (user, head) = self.repository.register_head(user, career_ids)?;

        info!(user_id = %user.id, head_id = %head.id, "department head registered");
        Ok(Confirmation::new(HEAD_REGISTERED, (user, head)))
    }

    fn ensure_credentials_free(&self, user: &NewUser) -> Result<(), RegistrationError> {
        let lookups = [
            UserLookup::Email(&user.email),
            UserLookup::Phone(&user.phone),
            UserLookup::Ci(&user.ci),
        ];
        for lookup in lookups {
            if self.repository.find_user(lookup)?.is_some() {
                warn!(?lookup, "registration with credentials already in use");
                return Err(RegistrationError::CredentialsInUse);
            }
        }
        Ok(())
    }
}
