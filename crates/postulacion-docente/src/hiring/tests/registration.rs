use super::common::*;
use crate::hiring::domain::{HeadRegistration, TeacherRegistration};
use crate::hiring::registration::RegistrationError;
use crate::hiring::repository::{HiringRepository, UserLookup};

const IN_USE: &str =
    "El email, el numero de telefono o el carnet de identidad ya esta en uso. Intentalo otra vez";

fn teacher_registration(phone: &str, ci: &str, email: &str) -> TeacherRegistration {
    TeacherRegistration {
        name: "Gerardo".to_string(),
        phone: phone.to_string(),
        ci: ci.to_string(),
        birth_date: birth_date(),
        personal_description: "Docente de matematicas".to_string(),
        subject: "Calculo".to_string(),
        degree: "Licenciado".to_string(),
        experience_years: 4,
        email: email.to_string(),
        password: "gerardo".to_string(),
    }
}

fn head_registration(phone: &str, ci: &str, email: &str, careers: &[&str]) -> HeadRegistration {
    HeadRegistration {
        name: "Juan".to_string(),
        phone: phone.to_string(),
        ci: ci.to_string(),
        birth_date: birth_date(),
        email: email.to_string(),
        password: "juan".to_string(),
        careers: careers.iter().map(|code| code.to_string()).collect(),
    }
}

#[test]
fn new_teacher_is_registered_and_retrievable() {
    let (services, repository) = build_services(seed());

    let confirmation = services
        .registration
        .register_teacher(teacher_registration(
            "12345578",
            "33333333",
            "gerardo@gmail.com",
        ))
        .expect("registration succeeds");

    assert_eq!(confirmation.message, "Docente registrado correctamente");
    let (user, teacher) = confirmation.into_value();
    assert_eq!(teacher.user_id, user.id);
    assert_eq!(teacher.specialty, "Calculo");

    let (stored, stored_user) = repository
        .teacher_by_ci("33333333")
        .expect("lookup succeeds")
        .expect("teacher stored");
    assert_eq!(stored, teacher);
    assert_eq!(stored_user.email, "gerardo@gmail.com");
}

#[test]
fn teacher_registration_refuses_any_credential_in_use() {
    let (services, _) = build_services(seed());
    let collisions = [
        ("7648909", "33333333", "gerardo@gmail.com"),
        ("12345578", "33333333", "matias@gmail.com"),
        ("12345578", "13776453", "gerardo@gmail.com"),
    ];

    for (phone, ci, email) in collisions {
        let error = services
            .registration
            .register_teacher(teacher_registration(phone, ci, email))
            .expect_err("credentials in use");
        assert!(matches!(error, RegistrationError::CredentialsInUse));
        assert_eq!(error.to_string(), IN_USE);
    }
}

#[test]
fn new_head_is_registered_with_careers() {
    let (services, repository) = build_services(seed());

    let confirmation = services
        .registration
        .register_head(head_registration(
            "55544466",
            "78449678",
            "juan@gmail.com",
            &["PSI", "ISW"],
        ))
        .expect("registration succeeds");

    assert_eq!(confirmation.message, "Jefe registrado correctamente");
    let (_, head) = confirmation.into_value();
    assert_eq!(head.career_ids.len(), 2);

    let (stored, _) = repository
        .head_by_ci("78449678")
        .expect("lookup succeeds")
        .expect("head stored");
    assert_eq!(stored.id, head.id);
}

#[test]
fn head_registration_refuses_any_credential_in_use() {
    let (services, _) = build_services(seed());
    let collisions = [
        ("55544466", "78449678", "matias@gmail.com"),
        ("7248909", "78449678", "juan@gmail.com"),
        ("55544466", "22222222", "juan@gmail.com"),
    ];

    for (phone, ci, email) in collisions {
        let error = services
            .registration
            .register_head(head_registration(phone, ci, email, &["ISW"]))
            .expect_err("credentials in use");
        assert!(matches!(error, RegistrationError::CredentialsInUse));
        assert_eq!(error.to_string(), IN_USE);
    }
}

#[test]
fn head_registration_with_unknown_careers_writes_nothing() {
    let (services, repository) = build_services(seed());

    let error = services
        .registration
        .register_head(head_registration(
            "55544466",
            "78449678",
            "juan@gmail.com",
            &["OOO", "III"],
        ))
        .expect_err("unknown careers");

    match &error {
        RegistrationError::UnknownCareers { codes } => {
            assert_eq!(codes, &vec!["OOO".to_string(), "III".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "Hubo un error al selecccionar las carreras. Intentelo otra vez"
    );
    assert!(repository
        .find_user(UserLookup::Email("juan@gmail.com"))
        .expect("lookup succeeds")
        .is_none());
}

#[test]
fn repository_failure_during_registration_is_generic() {
    let services = unavailable_services();

    let error = services
        .registration
        .register_teacher(teacher_registration(
            "12345578",
            "33333333",
            "gerardo@gmail.com",
        ))
        .expect_err("repository offline");

    assert!(matches!(error, RegistrationError::Repository(_)));
    assert_eq!(
        error.to_string(),
        "Hubo un error al registrar el usuario. Intentelo otra vez"
    );
}
