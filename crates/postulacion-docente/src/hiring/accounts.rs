use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::LoginCredentials;
use super::outcome::Confirmation;
use super::repository::{HiringRepository, RepositoryError, UserLookup};

pub const AUTHENTICATED: &str = "Usuario autenticado";

/// Which side of the platform a login is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Teacher,
    DepartmentHead,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Credenciales invalidas o el usuario no se encuentra registrado como docente.")]
    NotATeacher,
    #[error("Credenciales invalidas o el usuario no se encuentra registrado como jefe de carrera.")]
    NotADepartmentHead,
    #[error("No se pudo verificar las credenciales. Intentelo otra vez")]
    Repository(#[from] RepositoryError),
}

impl LoginError {
    fn for_role(role: Role) -> Self {
        match role {
            Role::Teacher => LoginError::NotATeacher,
            Role::DepartmentHead => LoginError::NotADepartmentHead,
        }
    }
}

/// Credential check returning the identity number the rest of the API is keyed on.
pub struct AccountService<R> {
    repository: Arc<R>,
}

impl<R> AccountService<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn login_teacher(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Confirmation<String>, LoginError> {
        self.login(credentials, Role::Teacher)
    }

    pub fn login_head(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Confirmation<String>, LoginError> {
        self.login(credentials, Role::DepartmentHead)
    }

    fn login(
        &self,
        credentials: &LoginCredentials,
        role: Role,
    ) -> Result<Confirmation<String>, LoginError> {
        let user = self
            .repository
            .find_user(UserLookup::Email(&credentials.email))?
            .filter(|user| user.password == credentials.password);

        let Some(user) = user else {
            warn!(?role, "login with invalid credentials");
            return Err(LoginError::for_role(role));
        };

        let has_role = match role {
            Role::Teacher => self.repository.teacher_by_user(user.id)?.is_some(),
            Role::DepartmentHead => self.repository.head_by_user(user.id)?.is_some(),
        };
        if !has_role {
            warn!(?role, user_id = %user.id, "login for a role the user does not hold");
            return Err(LoginError::for_role(role));
        }

        info!(?role, user_id = %user.id, "user authenticated");
        Ok(Confirmation::new(AUTHENTICATED, user.ci))
    }
}
