use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use cashdesk_core::CashDesk;
use cashdesk_data::MemberFilter;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member with its memberships
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Delete a member with all memberships and deposits
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(desk).await,
            Members::List(cmd) => cmd.run(desk).await,
            Members::Add(cmd) => cmd.run(desk).await,
            Members::Delete(cmd) => cmd.run(desk).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let member = desk.get_member(self.id).await?;
        let memberships = desk.get_memberships(self.id).await?;
        let deposits = desk.get_deposits(self.id).await?;

        println!();
        member.print_formatted();
        println!();
        (memberships, deposits).print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Filter by first or last name
    #[clap(short, long)]
    pub name: Option<String>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let filter = MemberFilter {
            name: self.name,
            ..Default::default()
        };
        let members = desk.list_members(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub first_name: String,
    #[clap(short, long)]
    pub last_name: String,
    #[clap(short, long)]
    pub birthday: NaiveDate,
}

impl AddMember {
    /// Run the command and add a member to the database
    pub async fn run(self, desk: &CashDesk) -> Result<()> {
        let id = desk
            .add_member(&self.first_name, &self.last_name, self.birthday)
            .await?;
        println!("Member added with number {}.", id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    pub async fn run(&self, desk: &CashDesk) -> Result<()> {
        let member = desk.get_member(self.id).await?;
        println!();
        member.print_formatted();
        println!();

        if !self.yes {
            let confirm = Confirm::new(
                "Delete member with all memberships and deposits from database?",
            )
            .with_default(false);
            if !confirm.prompt()? {
                return Ok(());
            }
        }
        desk.delete_member(self.id).await?;
        println!("Member {} deleted.", self.id);
        Ok(())
    }
}
