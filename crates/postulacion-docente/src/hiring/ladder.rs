//! Review status ladder.
//!
//! Applications move one rank at a time between "En revisión" and "Entrevista". Ranks from
//! "Aceptado" upwards are decided and cannot be modified; "En revisión" is the floor when
//! descending. Rejection jumps straight to "Rechazado" from any undecided rank.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicationId, ApplicationStatus};
use super::outcome::Confirmation;
use super::repository::{HiringRepository, RepositoryError};

/// Lowest rank an application can be descended to.
pub const FLOOR: ApplicationStatus = ApplicationStatus::UnderReview;

/// First decided rank; neither direction may move an application at or above it.
pub const LOCKED_FROM: ApplicationStatus = ApplicationStatus::Accepted;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderMove {
    Advance,
    Descend,
    Reject,
}

impl LadderMove {
    pub const fn success_message(self) -> &'static str {
        match self {
            LadderMove::Advance => "Postulacion ascendida correctamente",
            LadderMove::Descend => "Postulacion descendida correctamente",
            LadderMove::Reject => "Postulacion rechazada correctamente",
        }
    }

    pub const fn failure_message(self) -> &'static str {
        match self {
            LadderMove::Advance => {
                "Hubo un error, no hemos podido ascender la postulacion. Intentalo otra vez"
            }
            LadderMove::Descend => "Hubo un error al descender la postulacion. Intentelo otra vez",
            LadderMove::Reject => "Hubo un error al rechazar la postulacion. Intentelo otra vez",
        }
    }

    /// Status reached from `from`, or the boundary that blocks the move.
    pub fn target(
        self,
        application_id: ApplicationId,
        from: ApplicationStatus,
    ) -> Result<ApplicationStatus, LadderError> {
        let locked = LadderError::Locked {
            application_id,
            status: from,
        };
        match self {
            LadderMove::Advance if from >= LOCKED_FROM => Err(locked),
            LadderMove::Advance => {
                ApplicationStatus::from_rank(from.rank() + 1).ok_or(locked)
            }
            LadderMove::Descend if from <= FLOOR => Err(LadderError::AtFloor { application_id }),
            LadderMove::Descend if from >= LOCKED_FROM => Err(locked),
            LadderMove::Descend => {
                ApplicationStatus::from_rank(from.rank() - 1).ok_or(locked)
            }
            LadderMove::Reject if from >= LOCKED_FROM => Err(locked),
            LadderMove::Reject => Ok(ApplicationStatus::Rejected),
        }
    }
}

/// Record of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub application_id: ApplicationId,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// Rejections raised by the ladder. `Display` is the user facing message.
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("{}", .direction.failure_message())]
    NotFound {
        direction: LadderMove,
        application_id: ApplicationId,
    },
    #[error("No se puede descender mas la postulacion. Espera a que vuelva a ser ascendida")]
    AtFloor { application_id: ApplicationId },
    #[error("No se puede modificar el estado de la postulacion")]
    Locked {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },
    #[error("{}", .direction.failure_message())]
    Repository {
        direction: LadderMove,
        #[source]
        source: RepositoryError,
    },
}

/// Moves applications along the review ladder.
pub struct StatusLadder<R> {
    repository: Arc<R>,
}

impl<R> StatusLadder<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Move the application one rank up.
    pub fn advance(
        &self,
        application_id: ApplicationId,
    ) -> Result<Confirmation<StatusChange>, LadderError> {
        self.apply(application_id, LadderMove::Advance)
    }

    /// Move the application one rank down.
    pub fn descend(
        &self,
        application_id: ApplicationId,
    ) -> Result<Confirmation<StatusChange>, LadderError> {
        self.apply(application_id, LadderMove::Descend)
    }

    /// Close an undecided application as rejected.
    pub fn reject(
        &self,
        application_id: ApplicationId,
    ) -> Result<Confirmation<StatusChange>, LadderError> {
        self.apply(application_id, LadderMove::Reject)
    }

    fn apply(
        &self,
        application_id: ApplicationId,
        direction: LadderMove,
    ) -> Result<Confirmation<StatusChange>, LadderError> {
        let repository_error = |source| LadderError::Repository { direction, source };

        let found = if application_id.0 > 0 {
            self.repository
                .application(application_id)
                .map_err(repository_error)?
        } else {
            None
        };
        let Some(mut application) = found else {
            warn!(%application_id, ?direction, "application not found");
            return Err(LadderError::NotFound {
                direction,
                application_id,
            });
        };

        let from = application.status;
        let to = direction
            .target(application_id, from)
            .inspect_err(|err| warn!(%application_id, ?direction, %from, "{err}"))?;

        application.status = to;
        self.repository
            .update_application(application)
            .map_err(repository_error)?;

        info!(%application_id, ?direction, %from, %to, "application status changed");
        Ok(Confirmation::new(
            direction.success_message(),
            StatusChange {
                application_id,
                from,
                to,
            },
        ))
    }
}
