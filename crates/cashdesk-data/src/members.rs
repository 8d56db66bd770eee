use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Deposit, DepositFilter, Membership, MembershipFilter, Query, Retrieve};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub first_name: Option<String>,
    /// Exact match on the last name
    pub last_name: Option<String>,
    /// Case insensitive substring match on first or last name
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Member {
    /// The member number
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,

    /// The currently open membership, if any. This is
    /// derived from the memberships when reading a member
    /// and ignored when writing one.
    pub open_membership_id: Option<u32>,
}

impl Member {
    /// Create a new unsaved member
    pub fn new(first_name: &str, last_name: &str, birthday: NaiveDate) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birthday,
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// A member is active while one of its memberships is open.
    pub fn is_active(&self) -> bool {
        self.open_membership_id.is_some()
    }

    /// Get all memberships of the member, oldest first.
    pub async fn get_memberships<DB>(&self, db: &DB) -> Result<Vec<Membership>>
    where
        DB: Query<Membership, Filter = MembershipFilter>,
    {
        let memberships = db
            .query(&MembershipFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(memberships)
    }

    /// Get the open membership of the member
    pub async fn get_open_membership<DB>(&self, db: &DB) -> Result<Option<Membership>>
    where
        DB: Retrieve<Membership, Key = u32>,
    {
        match self.open_membership_id {
            Some(id) => Ok(Some(db.retrieve(id).await?)),
            None => Ok(None),
        }
    }

    /// Get deposits of all memberships of the member
    pub async fn get_deposits<DB>(&self, db: &DB) -> Result<Vec<Deposit>>
    where
        DB: Query<Deposit, Filter = DepositFilter>,
    {
        let deposits = db
            .query(&DepositFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(deposits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_new() {
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let member = Member::new("Ann", "Lee", birthday);
        assert_eq!(member.id, 0);
        assert_eq!(member.full_name(), "Ann Lee");
        assert_eq!(member.birthday, birthday);
        assert!(!member.is_active());
    }

    #[test]
    fn test_member_is_active() {
        let member = Member {
            open_membership_id: Some(23),
            ..Default::default()
        };
        assert!(member.is_active());
    }
}
