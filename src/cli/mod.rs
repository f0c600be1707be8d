pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "fsnd-api")]
#[command(about = "Trivia and coffee-shop API servers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run one of the API servers")]
    Serve {
        #[arg(value_enum, help = "Which service to run")]
        service: Service,
        #[arg(long, help = "Bind address (defaults to SERVER_HOST)")]
        host: Option<String>,
        #[arg(long, help = "Port (defaults to TRIVIA_PORT / COFFEE_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Create tables and seed reference data in the configured databases")]
    Init {
        #[arg(long, value_enum, default_value_t = Target::All)]
        service: Target,
        #[arg(long, help = "Also insert sample questions and drinks into empty tables")]
        samples: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Trivia,
    Coffee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Trivia,
    Coffee,
    All,
}

impl Target {
    pub fn includes(self, service: Service) -> bool {
        matches!(
            (self, service),
            (Target::All, _) | (Target::Trivia, Service::Trivia) | (Target::Coffee, Service::Coffee)
        )
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { service, host, port } => commands::serve::handle(service, host, port).await,
        Commands::Init { service, samples } => commands::init::handle(service, samples).await,
    }
}
