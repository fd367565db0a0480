use super::common::*;
use crate::hiring::domain::{SubjectId, VacancyDraft, VacancyId};
use crate::hiring::repository::HiringRepository;
use crate::hiring::vacancies::VacancyError;

const CREATE_FAILED: &str = "Hubo un error al crear la vacante. Intentalo otra vez";

fn draft(head_ci: Option<&str>) -> VacancyDraft {
    VacancyDraft {
        name: "Programacion I".to_string(),
        subject_code: "PRO-I".to_string(),
        description: "Vacante para el segundo semestre".to_string(),
        starts_at: now(),
        ends_at: days_from_now(15),
        head_ci: head_ci.map(str::to_string),
    }
}

fn ids<T>(views: &[T], id: impl Fn(&T) -> VacancyId) -> Vec<i64> {
    views.iter().map(|view| id(view).0).collect()
}

#[test]
fn head_publishes_a_vacancy() {
    let (services, repository) = build_services(seed());

    let confirmation = services
        .vacancies
        .create(draft(Some("22222222")))
        .expect("vacancy created");

    assert_eq!(confirmation.message, "Vacante creada correctamente");
    let vacancy = confirmation.into_value();
    assert_eq!(vacancy.id, VacancyId(4));
    assert_eq!(vacancy.subject_id, Some(SubjectId(1)));
    assert!(repository
        .vacancy(vacancy.id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn draft_validation_checks_window_and_text() {
    let (services, _) = build_services(seed());

    assert!(services.vacancies.validate(&draft(None)));

    let mut reversed = draft(None);
    reversed.ends_at = days_from_now(-3);
    assert!(!services.vacancies.validate(&reversed));

    let mut blank = draft(None);
    blank.description = "   ".to_string();
    assert!(!services.vacancies.validate(&blank));
}

#[test]
fn invalid_draft_is_not_published() {
    let (services, repository) = build_services(seed());
    let mut unnamed = draft(Some("22222222"));
    unnamed.name.clear();

    let error = services
        .vacancies
        .create(unnamed)
        .expect_err("invalid draft");

    assert!(matches!(error, VacancyError::InvalidDraft));
    assert_eq!(error.to_string(), CREATE_FAILED);
    assert_eq!(repository.vacancies().expect("listing").len(), 3);
}

#[test]
fn vacancy_needs_a_known_head_and_subject() {
    let (services, _) = build_services(seed());

    let missing = services
        .vacancies
        .create(draft(None))
        .expect_err("no head");
    assert!(matches!(missing, VacancyError::UnknownHead { .. }));
    assert_eq!(missing.to_string(), CREATE_FAILED);

    let teacher = services
        .vacancies
        .create(draft(Some("13776453")))
        .expect_err("teachers cannot publish");
    assert!(matches!(teacher, VacancyError::UnknownHead { .. }));

    let mut unknown_subject = draft(Some("22222222"));
    unknown_subject.subject_code = "XYZ".to_string();
    let error = services
        .vacancies
        .create(unknown_subject)
        .expect_err("unknown subject");
    assert!(matches!(error, VacancyError::UnknownSubject { .. }));
    assert_eq!(error.to_string(), CREATE_FAILED);
}

#[test]
fn available_vacancies_skip_expired_ones() {
    let (services, _) = build_services(seed());

    let available = services
        .vacancies
        .available("22222222")
        .expect("query succeeds");

    assert_eq!(ids(&available, |view| view.vacancy_id), vec![1, 2]);
    assert_eq!(available[0].subject, "Programacion I");
    assert_eq!(available[1].subject, "Pensamiento Critico");
}

#[test]
fn available_vacancies_skip_those_already_applied_to() {
    let (services, _) = build_services(seed());

    let daniel = services
        .vacancies
        .available("11111111")
        .expect("query succeeds");
    assert_eq!(ids(&daniel, |view| view.vacancy_id), vec![1]);

    let rafael = services
        .vacancies
        .available("13776453")
        .expect("query succeeds");
    assert!(rafael.is_empty());
}

#[test]
fn vacancy_detail_includes_subject_name() {
    let (services, _) = build_services(seed());

    let detail = services
        .vacancies
        .detail(VacancyId(1))
        .expect("query succeeds")
        .expect("vacancy present");
    assert_eq!(detail.name, "Programacion I");
    assert_eq!(detail.description, "Vacante programacion I");
    assert_eq!(detail.subject, "Programacion I");
    assert_eq!(detail.ends_at, days_from_now(10));

    assert!(services
        .vacancies
        .detail(VacancyId(999))
        .expect("query succeeds")
        .is_none());
}

#[test]
fn head_listings_split_current_and_expired() {
    let (services, _) = build_services(seed());

    let current = services
        .vacancies
        .head_current("22222222")
        .expect("query succeeds");
    assert_eq!(ids(&current, |view| view.vacancy_id), vec![1, 2]);
    assert_eq!(current[0].applicants, 1);
    assert_eq!(current[1].applicants, 2);

    let history = services
        .vacancies
        .head_history("22222222")
        .expect("query succeeds");
    assert_eq!(ids(&history, |view| view.vacancy_id), vec![3]);
    assert_eq!(history[0].subject, "Pensamiento Critico");
    assert_eq!(history[0].applicants, 1);
}

#[test]
fn head_listings_for_non_heads_are_empty() {
    let (services, _) = build_services(seed());

    assert!(services
        .vacancies
        .head_current("13776453")
        .expect("query succeeds")
        .is_empty());
    assert!(services
        .vacancies
        .head_history("-1")
        .expect("query succeeds")
        .is_empty());
}

#[test]
fn subject_catalog_lists_every_subject() {
    let (services, _) = build_services(seed());

    let subjects = services.subjects.list().expect("query succeeds");

    let codes: Vec<_> = subjects.iter().map(|subject| subject.code.as_str()).collect();
    assert_eq!(codes, vec!["PRO-I", "PSC", "PS", "ANT"]);
}
