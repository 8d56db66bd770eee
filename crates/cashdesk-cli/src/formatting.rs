use std::collections::HashMap;

use chrono::{DateTime, Utc};

use cashdesk_data::{Deposit, DepositStatistics, Member, Membership};

/// Format a timestamp for display
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the end of a membership
pub fn format_end(end: &Option<DateTime<Utc>>) -> String {
    match end {
        Some(end) => format_time(end),
        None => "open".to_string(),
    }
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let membership = match self.open_membership_id {
            Some(id) => format!("open ({})", id),
            None => "None".to_string(),
        };

        println!("Number:\t\t\t{}", self.id);
        println!("First Name:\t\t{}", self.first_name);
        println!("Last Name:\t\t{}", self.last_name);
        println!("Birthday:\t\t{}", self.birthday);
        println!("Membership:\t\t{}", membership);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>6}\t{:<24}\t{:<24}\t{:<10}\t{}",
            "Number", "First Name", "Last Name", "Birthday", "Active"
        );
        println!("{:-<100}", "-");

        for member in self {
            let active = if member.is_active() { "*" } else { "" };
            println!(
                "{:>6}\t{:<24}\t{:<24}\t{:<10}\t{}",
                member.id,
                member.first_name,
                member.last_name,
                member.birthday.to_string(),
                active
            );
        }
    }
}

impl PrintFormatted for Membership {
    fn print_formatted(&self) {
        println!("Membership:\t\t{}", self.id);
        println!("Member:\t\t\t{}", self.member_id);
        println!("Begin:\t\t\t{}", format_time(&self.begin));
        println!("End:\t\t\t{}", format_end(&self.end));
    }
}

impl PrintFormatted for (Vec<Membership>, Vec<Deposit>) {
    /// Membership history with the deposit total of each membership
    fn print_formatted(&self) {
        let (memberships, deposits) = self;
        let mut totals: HashMap<u32, (usize, f64)> = HashMap::new();
        for deposit in deposits {
            let entry = totals.entry(deposit.membership_id).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += deposit.amount;
        }

        println!(
            "{:>6}\t{:<19}\t{:<19}\t{:>8}\t{:>12}",
            "ID", "Begin", "End", "Deposits", "Total"
        );
        println!("{:-<90}", "-");
        for membership in memberships {
            let (count, total) = totals.get(&membership.id).copied().unwrap_or((0, 0.0));
            println!(
                "{:>6}\t{:<19}\t{:<19}\t{:>8}\t{:>12.2}",
                membership.id,
                format_time(&membership.begin),
                format_end(&membership.end),
                count,
                total
            );
        }
    }
}

impl PrintFormatted for Vec<DepositStatistics> {
    fn print_formatted(&self) {
        println!("{:>6}\t{:<40}\t{:>12}", "Number", "Member", "Total");
        println!("{:-<70}", "-");
        for stats in self {
            println!(
                "{:>6}\t{:<40}\t{:>12.2}",
                stats.member.id,
                stats.member.full_name(),
                stats.total_amount
            );
        }
    }
}
