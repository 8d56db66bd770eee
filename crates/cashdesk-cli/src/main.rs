use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashdesk_cli::cli::{Cli, Command};
use cashdesk_core::CashDesk;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr, stdout is for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::init();
    tracing::debug!(?cli, "using");

    let mut desk = CashDesk::new(cli.config());
    desk.initialize().await?;

    match cli.command {
        Command::Init => {
            println!("Database {} is ready.", desk.config().members_db);
            Ok(())
        }
        Command::Members(cmd) => cmd.run(&desk).await,
        Command::Join(cmd) => cmd.run(&desk).await,
        Command::Cancel(cmd) => cmd.run(&desk).await,
        Command::Deposit(cmd) => cmd.run(&desk).await,
        Command::Statistics(cmd) => cmd.run(&desk).await,
    }?;

    Ok(())
}
