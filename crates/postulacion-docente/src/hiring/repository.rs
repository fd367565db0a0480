use super::domain::{
    Application, ApplicationId, Career, CareerId, DepartmentHead, HeadId, NewApplication,
    NewTeacher, NewUser, NewVacancy, Subject, SubjectId, Teacher, TeacherId, User, UserId,
    Vacancy, VacancyId,
};

/// Unique user fields that can be looked up directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup<'a> {
    Email(&'a str),
    Phone(&'a str),
    Ci(&'a str),
}

/// Storage abstraction so the services can be exercised in isolation.
///
/// Every method is a single atomic call; multi-entity writes (`register_*`) either persist
/// all rows or none.
pub trait HiringRepository: Send + Sync {
    fn application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn insert_application(&self, new: NewApplication) -> Result<Application, RepositoryError>;
    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
    fn applications_for_teacher(
        &self,
        teacher_id: TeacherId,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn applications_for_vacancy(
        &self,
        vacancy_id: VacancyId,
    ) -> Result<Vec<Application>, RepositoryError>;

    fn user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    fn find_user(&self, lookup: UserLookup<'_>) -> Result<Option<User>, RepositoryError>;

    fn teacher(&self, id: TeacherId) -> Result<Option<Teacher>, RepositoryError>;
    fn teacher_by_user(&self, user_id: UserId) -> Result<Option<Teacher>, RepositoryError>;
    fn register_teacher(
        &self,
        user: NewUser,
        teacher: NewTeacher,
    ) -> Result<(User, Teacher), RepositoryError>;

    fn head(&self, id: HeadId) -> Result<Option<DepartmentHead>, RepositoryError>;
    fn head_by_user(&self, user_id: UserId) -> Result<Option<DepartmentHead>, RepositoryError>;
    fn register_head(
        &self,
        user: NewUser,
        careers: Vec<CareerId>,
    ) -> Result<(User, DepartmentHead), RepositoryError>;

    fn career_by_code(&self, code: &str) -> Result<Option<Career>, RepositoryError>;

    fn subject(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError>;
    fn subject_by_code(&self, code: &str) -> Result<Option<Subject>, RepositoryError>;
    fn subjects(&self) -> Result<Vec<Subject>, RepositoryError>;

    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, RepositoryError>;
    fn vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError>;
    fn vacancies_for_head(&self, head_id: HeadId) -> Result<Vec<Vacancy>, RepositoryError>;
    fn insert_vacancy(&self, new: NewVacancy) -> Result<Vacancy, RepositoryError>;

    /// Resolve a teacher and its account from the identity number.
    fn teacher_by_ci(&self, ci: &str) -> Result<Option<(Teacher, User)>, RepositoryError> {
        let Some(user) = self.find_user(UserLookup::Ci(ci))? else {
            return Ok(None);
        };
        Ok(self.teacher_by_user(user.id)?.map(|teacher| (teacher, user)))
    }

    /// Resolve a department head and its account from the identity number.
    fn head_by_ci(&self, ci: &str) -> Result<Option<(DepartmentHead, User)>, RepositoryError> {
        let Some(user) = self.find_user(UserLookup::Ci(ci))? else {
            return Ok(None);
        };
        Ok(self.head_by_user(user.id)?.map(|head| (head, user)))
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
