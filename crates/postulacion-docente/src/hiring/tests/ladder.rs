use std::error::Error;

use super::common::*;
use crate::hiring::domain::{ApplicationId, ApplicationStatus};
use crate::hiring::ladder::{LadderError, LadderMove, FLOOR, LOCKED_FROM};
use crate::hiring::repository::{HiringRepository, RepositoryError};

#[test]
fn advance_moves_application_from_review_to_presentation() {
    let (services, repository) = build_services(seed());

    let confirmation = services
        .ladder
        .advance(ApplicationId(1))
        .expect("application advances");

    assert_eq!(confirmation.message, "Postulacion ascendida correctamente");
    assert_eq!(confirmation.value.from, ApplicationStatus::UnderReview);
    assert_eq!(confirmation.value.to, ApplicationStatus::Presentation);
    let stored = stored_status(&repository, 1);
    assert_eq!(stored.description(), "Exposición");
}

#[test]
fn advance_reports_missing_applications() {
    let (services, _) = build_services(seed());

    for id in [-1, 0, 999] {
        let error = services
            .ladder
            .advance(ApplicationId(id))
            .expect_err("unknown application");
        assert!(matches!(
            error,
            LadderError::NotFound {
                direction: LadderMove::Advance,
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "Hubo un error, no hemos podido ascender la postulacion. Intentalo otra vez"
        );
    }
}

#[test]
fn advance_walks_up_to_accepted_and_then_locks() {
    let (services, repository) = build_services(seed());

    for expected in [
        ApplicationStatus::Presentation,
        ApplicationStatus::Interview,
        ApplicationStatus::Accepted,
    ] {
        let change = services
            .ladder
            .advance(ApplicationId(1))
            .expect("advance succeeds")
            .into_value();
        assert_eq!(change.to, expected);
    }

    let error = services
        .ladder
        .advance(ApplicationId(1))
        .expect_err("accepted applications are locked");
    assert!(matches!(error, LadderError::Locked { .. }));
    assert_eq!(error.to_string(), "No se puede modificar el estado de la postulacion");
    assert_eq!(stored_status(&repository, 1), ApplicationStatus::Accepted);
}

#[test]
fn descend_moves_interview_back_to_presentation() {
    let (services, repository) = build_services(interview_seed());

    let confirmation = services
        .ladder
        .descend(ApplicationId(1))
        .expect("application descends");

    assert_eq!(confirmation.message, "Postulacion descendida correctamente");
    assert_eq!(stored_status(&repository, 1).description(), "Exposición");
}

#[test]
fn descend_reports_missing_applications() {
    let (services, _) = build_services(interview_seed());

    let error = services
        .ladder
        .descend(ApplicationId(-1))
        .expect_err("unknown application");

    assert_eq!(
        error.to_string(),
        "Hubo un error al descender la postulacion. Intentelo otra vez"
    );
}

#[test]
fn descend_stops_at_the_floor() {
    let (services, repository) = build_services(interview_seed());

    let error = services
        .ladder
        .descend(ApplicationId(3))
        .expect_err("already at the floor");

    assert!(matches!(error, LadderError::AtFloor { .. }));
    assert_eq!(
        error.to_string(),
        "No se puede descender mas la postulacion. Espera a que vuelva a ser ascendida"
    );
    assert_eq!(stored_status(&repository, 3), FLOOR);
}

#[test]
fn descend_refuses_decided_applications() {
    let (services, repository) = build_services(interview_seed());

    for (id, status) in [
        (2, ApplicationStatus::Accepted),
        (4, ApplicationStatus::Rejected),
    ] {
        let mut application = repository
            .application(ApplicationId(id))
            .expect("fetch succeeds")
            .expect("present");
        application.status = status;
        repository
            .update_application(application)
            .expect("update succeeds");

        let error = services
            .ladder
            .descend(ApplicationId(id))
            .expect_err("decided applications are locked");
        assert_eq!(error.to_string(), "No se puede modificar el estado de la postulacion");
        assert_eq!(stored_status(&repository, id), status);
    }
}

#[test]
fn reject_closes_undecided_applications_only() {
    let (services, repository) = build_services(interview_seed());

    let confirmation = services
        .ladder
        .reject(ApplicationId(1))
        .expect("interview can be rejected");
    assert_eq!(confirmation.message, "Postulacion rechazada correctamente");
    assert_eq!(stored_status(&repository, 1), ApplicationStatus::Rejected);

    let error = services
        .ladder
        .reject(ApplicationId(1))
        .expect_err("rejected applications are locked");
    assert!(matches!(error, LadderError::Locked { .. }));
}

#[test]
fn transitions_respect_the_locked_boundary() {
    for status in ApplicationStatus::ALL {
        for direction in [LadderMove::Advance, LadderMove::Descend, LadderMove::Reject] {
            let result = direction.target(ApplicationId(1), status);
            if status >= LOCKED_FROM {
                assert!(result.is_err(), "{direction:?} from {status:?} must fail");
            }
            if let Ok(to) = result {
                assert_ne!(to, status);
            }
        }
    }
}

#[test]
fn repository_failures_use_the_generic_message() {
    let services = unavailable_services();

    let error = services
        .ladder
        .descend(ApplicationId(1))
        .expect_err("repository offline");

    assert_eq!(
        error.to_string(),
        "Hubo un error al descender la postulacion. Intentelo otra vez"
    );
    let source = error.source().expect("source retained");
    assert!(source.downcast_ref::<RepositoryError>().is_some());
}
