use anyhow::Result;
use clap::Args;

use cashdesk_core::CashDesk;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct JoinMember {
    #[clap(short, long)]
    pub id: u32,
}

impl JoinMember {
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let membership = desk.join_member(self.id).await?;
        membership.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CancelMembership {
    #[clap(short, long)]
    pub id: u32,
}

impl CancelMembership {
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let membership = desk.cancel_membership(self.id).await?;
        membership.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Deposit {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long, allow_negative_numbers = true)]
    pub amount: f64,
}

impl Deposit {
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let deposit = desk.deposit(self.id, self.amount).await?;
        println!(
            "Deposit of {:.2} booked on membership {}.",
            deposit.amount, deposit.membership_id
        );
        Ok(())
    }
}
