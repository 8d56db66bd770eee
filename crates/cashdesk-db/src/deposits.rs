use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use cashdesk_data::{Deposit, DepositFilter, Insert, Query, Retrieve};

use crate::{
    results::{single, Id},
    Connection,
};

#[async_trait]
impl Query<Deposit> for Connection {
    type Filter = DepositFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Deposit>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                d.id,
                d.membership_id,
                ROUND(d.amount, 10) AS amount,
                d.created_at
            FROM deposits AS d
            JOIN memberships AS ms ON ms.id = d.membership_id
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND d.id = ").push_bind(id);
        }
        if let Some(membership_id) = filter.membership_id {
            qry.push(" AND d.membership_id = ").push_bind(membership_id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND ms.member_id = ").push_bind(member_id);
        }
        match filter.open_membership {
            Some(true) => {
                qry.push(" AND ms.end_at IS NULL");
            }
            Some(false) => {
                qry.push(" AND ms.end_at IS NOT NULL");
            }
            None => {}
        }
        qry.push(" ORDER BY d.id");

        let deposits: Vec<Deposit> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(deposits)
    }
}

#[async_trait]
impl Retrieve<Deposit> for Connection {
    type Key = u32;

    async fn retrieve(&self, deposit_id: Self::Key) -> Result<Deposit> {
        let filter = DepositFilter {
            id: Some(deposit_id),
            ..Default::default()
        };
        let deposits: Vec<Deposit> = self.query(&filter).await?;
        Ok(single(deposits)?)
    }
}

#[async_trait]
impl Insert<Deposit> for Connection {
    async fn insert(&self, deposit: Deposit) -> Result<Deposit> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO deposits (
                    membership_id,
                    amount,
                    created_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(deposit.membership_id)
                .push_bind(deposit.amount)
                .push_bind(deposit.created_at);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use cashdesk_data::{Member, Membership, Update};

    #[tokio::test]
    async fn test_deposit_insert() {
        let db = Connection::open_test().await;
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let member = db.insert(Member::new("Ann", "Lee", birthday)).await.unwrap();
        let membership = db.insert(Membership::new(&member, Utc::now())).await.unwrap();

        let deposit = db
            .insert(Deposit::new(&membership, 23.42, Utc::now()))
            .await
            .unwrap();
        assert!(deposit.id > 0);
        assert_eq!(deposit.membership_id, membership.id);
        assert_eq!(deposit.amount, 23.42);

        let deposits = membership.get_deposits(&db).await.unwrap();
        assert_eq!(deposits, vec![deposit]);
    }

    #[tokio::test]
    async fn test_deposit_negative_amount_rejected() {
        let db = Connection::open_test().await;
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let member = db.insert(Member::new("Ann", "Lee", birthday)).await.unwrap();
        let membership = db.insert(Membership::new(&member, Utc::now())).await.unwrap();

        let result = db.insert(Deposit::new(&membership, -1.0, Utc::now())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_deposit_filter() {
        let db = Connection::open_test().await;
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let ann = db.insert(Member::new("Ann", "Lee", birthday)).await.unwrap();
        let bob = db.insert(Member::new("Bob", "Marley", birthday)).await.unwrap();

        let mut closed = db.insert(Membership::new(&ann, Utc::now())).await.unwrap();
        db.insert(Deposit::new(&closed, 50.0, Utc::now())).await.unwrap();
        closed.end = Some(Utc::now());
        db.update(closed).await.unwrap();

        let open = db.insert(Membership::new(&ann, Utc::now())).await.unwrap();
        db.insert(Deposit::new(&open, 10.0, Utc::now())).await.unwrap();

        let other = db.insert(Membership::new(&bob, Utc::now())).await.unwrap();
        db.insert(Deposit::new(&other, 5.0, Utc::now())).await.unwrap();

        let deposits = ann.get_deposits(&db).await.unwrap();
        assert_eq!(deposits.len(), 2);

        let deposits: Vec<Deposit> = db
            .query(&DepositFilter {
                member_id: Some(ann.id),
                open_membership: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].amount, 10.0);

        let deposits: Vec<Deposit> = db
            .query(&DepositFilter {
                open_membership: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].amount, 50.0);
    }
}
