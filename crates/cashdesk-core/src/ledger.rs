//! Membership transitions of a member.
//!
//! A member without an open membership can join, which opens a
//! new membership. An open membership can be cancelled, which
//! closes it for good. Deposits are only accepted while a
//! membership is open.

use chrono::{DateTime, Utc};

use cashdesk_data::{Deposit, Insert, Member, Membership, Retrieve, Update};

use crate::errors::{Error, Result};
use crate::registry::find_member;

/// Check a deposit amount
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Validation(format!(
            "deposit amount {} must be a non-negative number",
            amount
        )));
    }
    Ok(amount)
}

/// Open a new membership for a member
pub async fn join_member<DB>(db: &DB, member_id: u32, now: DateTime<Utc>) -> Result<Membership>
where
    DB: Retrieve<Member, Key = u32> + Insert<Membership> + Send + Sync,
{
    let member = find_member(db, member_id).await?;
    if member.is_active() {
        tracing::debug!(member_id, "member already has an open membership");
        return Err(Error::AlreadyMember(member_id));
    }

    let membership = db.insert(Membership::new(&member, now)).await?;
    tracing::info!(member_id, membership_id = membership.id, "membership opened");

    Ok(membership)
}

/// Close the open membership of a member
pub async fn cancel_membership<DB>(
    db: &DB,
    member_id: u32,
    now: DateTime<Utc>,
) -> Result<Membership>
where
    DB: Retrieve<Member, Key = u32>
        + Retrieve<Membership, Key = u32>
        + Update<Membership>
        + Send
        + Sync,
{
    let member = find_member(db, member_id).await?;
    let membership = member
        .get_open_membership(db)
        .await?
        .ok_or(Error::NoMembership(member_id))?;

    let membership = db
        .update(Membership {
            end: Some(now),
            ..membership
        })
        .await?;
    tracing::info!(member_id, membership_id = membership.id, "membership closed");

    Ok(membership)
}

/// Book a deposit on the open membership of a member
pub async fn deposit<DB>(
    db: &DB,
    member_id: u32,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<Deposit>
where
    DB: Retrieve<Member, Key = u32> + Insert<Deposit> + Send + Sync,
{
    let member = find_member(db, member_id).await?;
    let amount = validate_amount(amount)?;
    let membership_id = member
        .open_membership_id
        .ok_or(Error::NoMembership(member_id))?;

    let deposit = db
        .insert(Deposit {
            membership_id,
            amount,
            created_at: now,
            ..Default::default()
        })
        .await?;
    tracing::info!(member_id, membership_id, amount, "deposit booked");

    Ok(deposit)
}
