use crate::demo::{run_demo, run_status, DemoArgs, StatusArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use postulacion_docente::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Postulacion Docente",
    about = "Run and demonstrate the teacher hiring service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk the demo data through an application and the review ladder
    Demo(DemoArgs),
    /// Print the details of one application from the demo data
    Status(StatusArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Status(args) => run_status(args),
    }
}
