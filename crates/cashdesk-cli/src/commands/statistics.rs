use anyhow::Result;
use clap::Args;

use cashdesk_core::CashDesk;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct ShowStatistics {
    /// Print the statistics as JSON
    #[clap(long)]
    pub json: bool,
}

impl ShowStatistics {
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let statistics = desk.get_deposit_statistics().await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&statistics)?);
        } else {
            statistics.print_formatted();
        }
        Ok(())
    }
}
