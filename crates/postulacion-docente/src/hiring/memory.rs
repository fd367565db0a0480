use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Career, CareerId, DepartmentHead, HeadId,
    NewApplication, NewTeacher, NewUser, NewVacancy, Subject, SubjectId, Teacher, TeacherId,
    User, UserId, Vacancy, VacancyId,
};
use super::repository::{HiringRepository, RepositoryError, UserLookup};

/// Rows used to populate an [`InMemoryHiringRepository`].
#[derive(Debug, Clone, Default)]
pub struct HiringSeed {
    pub users: Vec<User>,
    pub teachers: Vec<Teacher>,
    pub heads: Vec<DepartmentHead>,
    pub careers: Vec<Career>,
    pub subjects: Vec<Subject>,
    pub vacancies: Vec<Vacancy>,
    pub applications: Vec<Application>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    teachers: BTreeMap<TeacherId, Teacher>,
    heads: BTreeMap<HeadId, DepartmentHead>,
    careers: BTreeMap<CareerId, Career>,
    subjects: BTreeMap<SubjectId, Subject>,
    vacancies: BTreeMap<VacancyId, Vacancy>,
    applications: BTreeMap<ApplicationId, Application>,
}

fn next_key<K: Copy, V>(table: &BTreeMap<K, V>, raw: impl Fn(K) -> i64) -> i64 {
    table.keys().next_back().map(|key| raw(*key) + 1).unwrap_or(1)
}

impl Tables {
    fn user_conflicts(&self, user: &NewUser) -> bool {
        self.users.values().any(|existing| {
            existing.ci == user.ci || existing.phone == user.phone || existing.email == user.email
        })
    }

    fn create_user(&mut self, new: NewUser) -> Result<User, RepositoryError> {
        if self.user_conflicts(&new) {
            return Err(RepositoryError::Conflict);
        }
        let id = UserId(next_key(&self.users, |key| key.0));
        let user = User {
            id,
            name: new.name,
            ci: new.ci,
            birth_date: new.birth_date,
            phone: new.phone,
            email: new.email,
            password: new.password,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }
}

/// Mutex guarded in-memory store shared by tests, the demo CLI, and the HTTP service.
#[derive(Debug, Default)]
pub struct InMemoryHiringRepository {
    tables: Mutex<Tables>,
}

impl InMemoryHiringRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: HiringSeed) -> Self {
        let mut tables = Tables::default();
        tables.users = seed.users.into_iter().map(|row| (row.id, row)).collect();
        tables.teachers = seed.teachers.into_iter().map(|row| (row.id, row)).collect();
        tables.heads = seed.heads.into_iter().map(|row| (row.id, row)).collect();
        tables.careers = seed.careers.into_iter().map(|row| (row.id, row)).collect();
        tables.subjects = seed.subjects.into_iter().map(|row| (row.id, row)).collect();
        tables.vacancies = seed.vacancies.into_iter().map(|row| (row.id, row)).collect();
        tables.applications = seed
            .applications
            .into_iter()
            .map(|row| (row.id, row))
            .collect();
        Self {
            tables: Mutex::new(tables),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl HiringRepository for InMemoryHiringRepository {
    fn application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.applications.get(&id).cloned())
    }

    fn insert_application(&self, new: NewApplication) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.vacancies.contains_key(&new.vacancy_id)
            || !tables.teachers.contains_key(&new.teacher_id)
        {
            return Err(RepositoryError::NotFound);
        }
        let id = ApplicationId(next_key(&tables.applications, |key| key.0));
        let application = Application {
            id,
            vacancy_id: new.vacancy_id,
            teacher_id: new.teacher_id,
            status: new.status,
        };
        tables.applications.insert(id, application.clone());
        Ok(application)
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        match tables.applications.get_mut(&application.id) {
            Some(stored) => {
                *stored = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn applications_for_teacher(
        &self,
        teacher_id: TeacherId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .lock()?
            .applications
            .values()
            .filter(|application| application.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    fn applications_for_vacancy(
        &self,
        vacancy_id: VacancyId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .lock()?
            .applications
            .values()
            .filter(|application| application.vacancy_id == vacancy_id)
            .cloned()
            .collect())
    }

    fn user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn find_user(&self, lookup: UserLookup<'_>) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        let found = tables.users.values().find(|user| match lookup {
            UserLookup::Email(email) => user.email == email,
            UserLookup::Phone(phone) => user.phone == phone,
            UserLookup::Ci(ci) => user.ci == ci,
        });
        Ok(found.cloned())
    }

    fn teacher(&self, id: TeacherId) -> Result<Option<Teacher>, RepositoryError> {
        Ok(self.lock()?.teachers.get(&id).cloned())
    }

    fn teacher_by_user(&self, user_id: UserId) -> Result<Option<Teacher>, RepositoryError> {
        Ok(self
            .lock()?
            .teachers
            .values()
            .find(|teacher| teacher.user_id == user_id)
            .cloned())
    }

    fn register_teacher(
        &self,
        user: NewUser,
        teacher: NewTeacher,
    ) -> Result<(User, Teacher), RepositoryError> {
        let mut tables = self.lock()?;
        let user = tables.create_user(user)?;
        let id = TeacherId(next_key(&tables.teachers, |key| key.0));
        let teacher = Teacher {
            id,
            user_id: user.id,
            specialty: teacher.specialty,
            experience_years: teacher.experience_years,
            personal_description: teacher.personal_description,
            degree: teacher.degree,
        };
        tables.teachers.insert(id, teacher.clone());
        Ok((user, teacher))
    }

    fn head(&self, id: HeadId) -> Result<Option<DepartmentHead>, RepositoryError> {
        Ok(self.lock()?.heads.get(&id).cloned())
    }

    fn head_by_user(&self, user_id: UserId) -> Result<Option<DepartmentHead>, RepositoryError> {
        Ok(self
            .lock()?
            .heads
            .values()
            .find(|head| head.user_id == user_id)
            .cloned())
    }

    fn register_head(
        &self,
        user: NewUser,
        careers: Vec<CareerId>,
    ) -> Result<(User, DepartmentHead), RepositoryError> {
        let mut tables = self.lock()?;
        if careers.iter().any(|id| !tables.careers.contains_key(id)) {
            return Err(RepositoryError::NotFound);
        }
        let user = tables.create_user(user)?;
        let id = HeadId(next_key(&tables.heads, |key| key.0));
        let head = DepartmentHead {
            id,
            user_id: user.id,
            career_ids: careers,
        };
        tables.heads.insert(id, head.clone());
        Ok((user, head))
    }

    fn career_by_code(&self, code: &str) -> Result<Option<Career>, RepositoryError> {
        Ok(self
            .lock()?
            .careers
            .values()
            .find(|career| career.code == code)
            .cloned())
    }

    fn subject(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        Ok(self.lock()?.subjects.get(&id).cloned())
    }

    fn subject_by_code(&self, code: &str) -> Result<Option<Subject>, RepositoryError> {
        Ok(self
            .lock()?
            .subjects
            .values()
            .find(|subject| subject.code == code)
            .cloned())
    }

    fn subjects(&self) -> Result<Vec<Subject>, RepositoryError> {
        Ok(self.lock()?.subjects.values().cloned().collect())
    }

    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        Ok(self.lock()?.vacancies.get(&id).cloned())
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        Ok(self.lock()?.vacancies.values().cloned().collect())
    }

    fn vacancies_for_head(&self, head_id: HeadId) -> Result<Vec<Vacancy>, RepositoryError> {
        Ok(self
            .lock()?
            .vacancies
            .values()
            .filter(|vacancy| vacancy.head_id == head_id)
            .cloned()
            .collect())
    }

    fn insert_vacancy(&self, new: NewVacancy) -> Result<Vacancy, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.heads.contains_key(&new.head_id) {
            return Err(RepositoryError::NotFound);
        }
        let id = VacancyId(next_key(&tables.vacancies, |key| key.0));
        let vacancy = Vacancy {
            id,
            name: new.name,
            description: new.description,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            subject_id: new.subject_id,
            head_id: new.head_id,
        };
        tables.vacancies.insert(id, vacancy.clone());
        Ok(vacancy)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Demo data set: two teachers, one department head, two careers, four subjects, three
/// vacancies (two open, one expired) and four applications in different states. Dates are
/// relative to `now` so the open/expired split holds whenever it is loaded.
pub fn demo_seed(now: DateTime<Utc>) -> HiringSeed {
    let user = |id, name: &str, ci: &str, birth, phone: &str, email: &str, password: &str| User {
        id: UserId(id),
        name: name.to_string(),
        ci: ci.to_string(),
        birth_date: birth,
        phone: phone.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let subject = |id, name: &str, code: &str, career| Subject {
        id: SubjectId(id),
        name: name.to_string(),
        code: code.to_string(),
        career_ids: vec![CareerId(career)],
    };
    let vacancy = |id, name: &str, description: &str, ends_in_days, subject| Vacancy {
        id: VacancyId(id),
        name: name.to_string(),
        description: description.to_string(),
        starts_at: now - Duration::days(10),
        ends_at: now + Duration::days(ends_in_days),
        subject_id: Some(SubjectId(subject)),
        head_id: HeadId(1),
    };
    let application = |id, vacancy, teacher, status| Application {
        id: ApplicationId(id),
        vacancy_id: VacancyId(vacancy),
        teacher_id: TeacherId(teacher),
        status,
    };

    HiringSeed {
        users: vec![
            user(
                1,
                "Rafael",
                "13776453",
                date(1998, 3, 14),
                "7648909",
                "rafael1199v@gmail.com",
                "1234",
            ),
            user(
                2,
                "Daniel",
                "11111111",
                date(1996, 7, 2),
                "7638909",
                "daniel@gmail.com",
                "12345",
            ),
            user(
                3,
                "Matias",
                "22222222",
                date(1985, 11, 23),
                "7248909",
                "matias@gmail.com",
                "12346",
            ),
        ],
        teachers: vec![
            Teacher {
                id: TeacherId(1),
                user_id: UserId(1),
                specialty: "Programacion".to_string(),
                experience_years: 0,
                personal_description: "Hola soy rafael".to_string(),
                degree: "Ingeniero".to_string(),
            },
            Teacher {
                id: TeacherId(2),
                user_id: UserId(2),
                specialty: "Computacion grafica".to_string(),
                experience_years: 3,
                personal_description: "Hola soy daniel".to_string(),
                degree: "Ingeniero".to_string(),
            },
        ],
        heads: vec![DepartmentHead {
            id: HeadId(1),
            user_id: UserId(3),
            career_ids: vec![CareerId(1)],
        }],
        careers: vec![
            Career {
                id: CareerId(1),
                name: "Ingenieria de software".to_string(),
                code: "ISW".to_string(),
            },
            Career {
                id: CareerId(2),
                name: "Psicologia".to_string(),
                code: "PSI".to_string(),
            },
        ],
        subjects: vec![
            subject(1, "Programacion I", "PRO-I", 1),
            subject(2, "Pensamiento Critico", "PSC", 2),
            subject(3, "Programacion superior", "PS", 1),
            subject(4, "Anatomia humana", "ANT", 2),
        ],
        vacancies: vec![
            vacancy(1, "Programacion I", "Vacante programacion I", 10, 1),
            vacancy(2, "Programacion II", "Vacante programacion II", 5, 2),
            vacancy(3, "Programacion III", "Vacante programacion III", -1, 2),
        ],
        applications: vec![
            application(1, 1, 1, ApplicationStatus::UnderReview),
            application(2, 2, 2, ApplicationStatus::Accepted),
            application(3, 3, 1, ApplicationStatus::UnderReview),
            application(4, 2, 1, ApplicationStatus::Rejected),
        ],
    }
}
