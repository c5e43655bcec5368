#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    BookInput, BookStrategy, BookingsStrategy, ChatInput, ChatStrategy, CommandStrategy,
    InitStrategy, RequestInput, RequestStrategy, ServicesStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "homebook")]
#[command(about = "Home-services booking assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the booking assistant
    Chat {
        /// Single message to send (otherwise starts an interactive session)
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Session ID to use (generated when omitted)
        #[arg(short = 's', long)]
        session: Option<String>,
    },
    /// Book directly, as the fallback form would
    Book {
        #[arg(long)]
        service: String,

        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Time as HH:MM (24-hour)
        #[arg(long)]
        time: String,

        /// Book at member pricing
        #[arg(long)]
        subscriber: bool,

        #[arg(short = 's', long)]
        session: Option<String>,
    },
    /// Handle a raw JSON request body (argument or stdin)
    Request {
        body: Option<String>,
    },
    /// List stored bookings
    Bookings,
    /// List the service catalog
    Services,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message, session } => {
            ChatStrategy
                .execute(ChatInput {
                    message,
                    session_id: session,
                })
                .await
        }
        Commands::Book {
            service,
            date,
            time,
            subscriber,
            session,
        } => {
            BookStrategy
                .execute(BookInput {
                    service,
                    date,
                    time,
                    subscriber,
                    session_id: session,
                })
                .await
        }
        Commands::Request { body } => RequestStrategy.execute(RequestInput { body }).await,
        Commands::Bookings => BookingsStrategy.execute(()).await,
        Commands::Services => ServicesStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
