use clap::{Parser, Subcommand};

use cashdesk_core::{config::DEFAULT_MEMBERS_DB, Config};

use crate::commands::{CancelMembership, Deposit, JoinMember, Members, ShowStatistics};

#[derive(Parser, Debug)]
#[clap(name = "cashdesk", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, env = "CASHDESK_DB", default_value = DEFAULT_MEMBERS_DB)]
    pub members_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config::new(&self.members_db)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the members database
    #[clap(name = "init")]
    Init,

    /// Manage members
    #[clap(subcommand)]
    Members(Members),

    /// Open a new membership
    #[clap(name = "join")]
    Join(JoinMember),
    /// Close the open membership
    #[clap(name = "cancel")]
    Cancel(CancelMembership),
    /// Book a deposit on the open membership
    #[clap(name = "deposit")]
    Deposit(Deposit),

    /// Show deposit totals of the current memberships
    #[clap(name = "statistics")]
    Statistics(ShowStatistics),
}
