use std::sync::Arc;

use super::repository::{HiringRepository, RepositoryError};
use super::views::SubjectView;

/// Read-only subject catalog.
pub struct SubjectCatalog<R> {
    repository: Arc<R>,
}

impl<R> SubjectCatalog<R>
where
    R: HiringRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<SubjectView>, RepositoryError> {
        Ok(self
            .repository
            .subjects()?
            .into_iter()
            .map(SubjectView::from)
            .collect())
    }
}
