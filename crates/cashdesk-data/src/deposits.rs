use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Membership;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DepositFilter {
    pub id: Option<u32>,
    pub membership_id: Option<u32>,
    pub member_id: Option<u32>,
    /// Only deposits of open (`Some(true)`) or
    /// closed (`Some(false)`) memberships
    pub open_membership: Option<bool>,
}

/// A cash contribution made during a membership
#[derive(Debug, Default, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Deposit {
    pub id: u32,
    pub membership_id: u32,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Deposit {
    pub fn new(membership: &Membership, amount: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            membership_id: membership.id,
            amount,
            created_at,
            ..Default::default()
        }
    }
}
