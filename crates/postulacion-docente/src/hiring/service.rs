use std::sync::Arc;

use super::accounts::AccountService;
use super::applications::ApplicationService;
use super::ladder::StatusLadder;
use super::registration::RegistrationService;
use super::repository::HiringRepository;
use super::subjects::SubjectCatalog;
use super::vacancies::VacancyService;
use crate::clock::Clock;

/// Every hiring service wired to one repository and clock.
pub struct HiringServices<R> {
    pub ladder: StatusLadder<R>,
    pub applications: ApplicationService<R>,
    pub registration: RegistrationService<R>,
    pub vacancies: VacancyService<R>,
    pub accounts: AccountService<R>,
    pub subjects: SubjectCatalog<R>,
}

impl<R> HiringServices<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ladder: StatusLadder::new(repository.clone()),
            applications: ApplicationService::new(repository.clone(), clock.clone()),
            registration: RegistrationService::new(repository.clone()),
            vacancies: VacancyService::new(repository.clone(), clock),
            accounts: AccountService::new(repository.clone()),
            subjects: SubjectCatalog::new(repository),
        }
    }
}
