use std::collections::HashMap;

use cashdesk_data::{Deposit, DepositFilter, DepositStatistics, Member, MemberFilter, Query};

use crate::errors::Result;

/// Sum up deposits per membership
pub fn totals_by_membership(deposits: &[Deposit]) -> HashMap<u32, f64> {
    let mut totals = HashMap::new();
    for deposit in deposits {
        *totals.entry(deposit.membership_id).or_insert(0.0) += deposit.amount;
    }
    totals
}

/// Calculate the deposit total of every member.
///
/// Only deposits made during the currently open membership
/// count. Members without an open membership have a total of
/// zero, even if they made deposits in earlier memberships.
pub async fn deposit_statistics<DB>(db: &DB) -> Result<Vec<DepositStatistics>>
where
    DB: Query<Member, Filter = MemberFilter>
        + Query<Deposit, Filter = DepositFilter>
        + Send
        + Sync,
{
    let members: Vec<Member> =
        <DB as Query<Member>>::query(db, &MemberFilter::default()).await?;
    let deposits: Vec<Deposit> = <DB as Query<Deposit>>::query(
        db,
        &DepositFilter {
            open_membership: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let totals = totals_by_membership(&deposits);

    let statistics = members
        .into_iter()
        .map(|member| {
            let total_amount = member
                .open_membership_id
                .and_then(|id| totals.get(&id).copied())
                .unwrap_or(0.0);
            DepositStatistics {
                member,
                total_amount,
            }
        })
        .collect();

    Ok(statistics)
}
