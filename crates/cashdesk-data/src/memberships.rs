use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Deposit, DepositFilter, Member, Query, Retrieve};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MembershipFilter {
    pub id: Option<u32>,
    pub member_id: Option<u32>,
    /// Only open (`Some(true)`) or closed (`Some(false)`) memberships
    pub open: Option<bool>,
}

/// One contiguous period of membership. The membership
/// is open as long as `end` is not set.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Membership {
    pub id: u32,
    pub member_id: u32,
    #[sqlx(rename = "begin_at")]
    pub begin: DateTime<Utc>,
    #[sqlx(rename = "end_at")]
    pub end: Option<DateTime<Utc>>,
}

impl Membership {
    /// Create a new open membership for a member
    pub fn new(member: &Member, begin: DateTime<Utc>) -> Self {
        Self {
            member_id: member.id,
            begin,
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Get the member owning the membership
    pub async fn get_member<DB>(&self, db: &DB) -> Result<Member>
    where
        DB: Retrieve<Member, Key = u32>,
    {
        db.retrieve(self.member_id).await
    }

    /// Get the deposits made during this membership
    pub async fn get_deposits<DB>(&self, db: &DB) -> Result<Vec<Deposit>>
    where
        DB: Query<Deposit, Filter = DepositFilter>,
    {
        let deposits = db
            .query(&DepositFilter {
                membership_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(deposits)
    }
}
