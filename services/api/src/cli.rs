use crate::demo::{run_college_rank, run_demo, CollegeRankArgs, DemoArgs};
use crate::server;
use career_compass::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Career Compass",
    about = "Run the career guidance service or walk through it from the command line",
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
    /// Work with the college catalog
    Colleges {
        #[command(subcommand)]
        command: CollegesCommand,
    },
    /// Walk a sample student through profile, assessments, and recommendations
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CollegesCommand {
    /// Rank a CSV college export for a preferred city and optional search term
    Rank(CollegeRankArgs),
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
        Command::Colleges {
            command: CollegesCommand::Rank(args),
        } => run_college_rank(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
