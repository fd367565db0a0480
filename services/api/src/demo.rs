use crate::infra::{demo_services, Services};
use clap::Args;
use postulacion_docente::error::AppError;
use postulacion_docente::hiring::{
    ApplicationId, ApplicationRequest, Confirmation, LadderError, LadderMove, StatusChange,
};

/// Teacher from the demo data that has not applied to the first vacancy yet.
const DEMO_TEACHER_CI: &str = "11111111";
const DEMO_HEAD_CI: &str = "22222222";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only print the seeded data, skip the application walkthrough.
    #[arg(long)]
    pub(crate) seed_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Application identifier to look up
    #[arg(long)]
    pub(crate) application: i64,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let services = demo_services();

    println!("Teacher hiring demo");
    render_head_vacancies(&services)?;

    if args.seed_only {
        return Ok(());
    }

    let available = services.vacancies.available(DEMO_TEACHER_CI)?;
    let Some(vacancy) = available.first() else {
        println!("\nNo open vacancies for {DEMO_TEACHER_CI}");
        return Ok(());
    };

    println!(
        "\nTeacher {DEMO_TEACHER_CI} applies to vacancy {} ({})",
        vacancy.vacancy_id, vacancy.name
    );
    let application = match services.applications.submit(ApplicationRequest {
        vacancy_id: vacancy.vacancy_id,
        ci: DEMO_TEACHER_CI.to_string(),
        vacancy_expires_at: vacancy.ends_at,
    }) {
        Ok(confirmation) => {
            println!("- {}", confirmation.message);
            confirmation.into_value()
        }
        Err(err) => {
            println!("- Submission refused: {err}");
            return Ok(());
        }
    };

    println!("\nReview ladder for application {}", application.id);
    let walk = [
        LadderMove::Descend,
        LadderMove::Advance,
        LadderMove::Advance,
        LadderMove::Descend,
        LadderMove::Advance,
        LadderMove::Advance,
        LadderMove::Descend,
    ];
    for step in walk {
        render_step(step, run_step(&services, step, application.id));
    }

    render_application(&services, application.id)
}

pub(crate) fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let services = demo_services();
    render_application(&services, ApplicationId(args.application))
}

fn run_step(
    services: &Services,
    step: LadderMove,
    application_id: ApplicationId,
) -> Result<Confirmation<StatusChange>, LadderError> {
    match step {
        LadderMove::Advance => services.ladder.advance(application_id),
        LadderMove::Descend => services.ladder.descend(application_id),
        LadderMove::Reject => services.ladder.reject(application_id),
    }
}

fn render_step(step: LadderMove, result: Result<Confirmation<StatusChange>, LadderError>) {
    match result {
        Ok(confirmation) => {
            let change = confirmation.value;
            println!(
                "- {step:?}: {} ({} -> {})",
                confirmation.message, change.from, change.to
            );
        }
        Err(err) => println!("- {step:?}: {err}"),
    }
}

fn render_head_vacancies(services: &Services) -> Result<(), AppError> {
    let current = services.vacancies.head_current(DEMO_HEAD_CI)?;
    let history = services.vacancies.head_history(DEMO_HEAD_CI)?;

    println!("Vacancies of department head {DEMO_HEAD_CI}");
    for view in &current {
        println!(
            "- [open] {} {} ({}) | {} applicants",
            view.vacancy_id, view.name, view.subject, view.applicants
        );
    }
    for view in &history {
        println!(
            "- [closed] {} {} ({}) | {} applicants",
            view.vacancy_id, view.name, view.subject, view.applicants
        );
    }
    Ok(())
}

fn render_application(services: &Services, application_id: ApplicationId) -> Result<(), AppError> {
    match services.applications.details(application_id)? {
        Some(details) => match serde_json::to_string_pretty(&details) {
            Ok(json) => println!("\nApplication {application_id}:\n{json}"),
            Err(err) => println!("\nApplication {application_id} unavailable: {err}"),
        },
        None => println!("\nApplication {application_id} not found"),
    }
    Ok(())
}
