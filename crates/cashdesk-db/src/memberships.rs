use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use cashdesk_data::{Insert, Membership, MembershipFilter, Query, Retrieve, Update};

use crate::{
    results::{single, Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Membership> for Connection {
    type Filter = MembershipFilter;

    /// Fetch memberships, oldest first
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Membership>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                begin_at,
                end_at
            FROM memberships
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        match filter.open {
            Some(true) => {
                qry.push(" AND end_at IS NULL");
            }
            Some(false) => {
                qry.push(" AND end_at IS NOT NULL");
            }
            None => {}
        }
        qry.push(" ORDER BY begin_at, id");

        let memberships: Vec<Membership> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(memberships)
    }
}

#[async_trait]
impl Retrieve<Membership> for Connection {
    type Key = u32;

    async fn retrieve(&self, membership_id: Self::Key) -> Result<Membership> {
        let filter = MembershipFilter {
            id: Some(membership_id),
            ..Default::default()
        };
        let memberships: Vec<Membership> = self.query(&filter).await?;
        Ok(single(memberships)?)
    }
}

#[async_trait]
impl Insert<Membership> for Connection {
    async fn insert(&self, membership: Membership) -> Result<Membership> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO memberships (
                    member_id,
                    begin_at,
                    end_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(membership.member_id)
                .push_bind(membership.begin)
                .push_bind(membership.end);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Membership> for Connection {
    /// Close a membership. Only the end of an open membership
    /// can be written; updating a closed membership fails
    /// with `QueryError::NotFound`.
    async fn update(&self, membership: Membership) -> Result<Membership> {
        let result = {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE memberships SET")
                .push(" end_at = ")
                .push_bind(membership.end)
                .push(" WHERE id = ")
                .push_bind(membership.id)
                .push(" AND end_at IS NULL")
                .build()
                .execute(&mut *conn)
                .await?
        };
        if result.rows_affected() == 0 {
            return Err(QueryError::NotFound.into());
        }
        self.retrieve(membership.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;
    use cashdesk_data::Member;

    async fn insert_member(db: &Connection) -> Member {
        let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        db.insert(Member::new("Ann", "Lee", birthday)).await.unwrap()
    }

    #[tokio::test]
    async fn test_membership_insert() {
        let db = Connection::open_test().await;
        let member = insert_member(&db).await;
        let begin = Utc::now();

        let membership = db.insert(Membership::new(&member, begin)).await.unwrap();
        assert!(membership.id > 0);
        assert_eq!(membership.member_id, member.id);
        assert_eq!(membership.begin, begin);
        assert_eq!(membership.end, None);
        assert!(membership.is_open());
    }

    #[tokio::test]
    async fn test_membership_second_open_rejected() {
        let db = Connection::open_test().await;
        let member = insert_member(&db).await;
        db.insert(Membership::new(&member, Utc::now())).await.unwrap();

        let result = db.insert(Membership::new(&member, Utc::now())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_membership_close() {
        let db = Connection::open_test().await;
        let member = insert_member(&db).await;
        let mut membership = db.insert(Membership::new(&member, Utc::now())).await.unwrap();

        let end = Utc::now();
        membership.end = Some(end);
        let mut membership = db.update(membership).await.unwrap();
        assert_eq!(membership.end, Some(end));

        // A closed membership stays closed
        membership.end = Some(end + Duration::days(1));
        let err = db.update(membership.clone()).await.unwrap_err();
        assert_eq!(err.downcast_ref::<QueryError>(), Some(&QueryError::NotFound));

        let stored: Membership = db.retrieve(membership.id).await.unwrap();
        assert_eq!(stored.end, Some(end));
    }

    #[tokio::test]
    async fn test_membership_filter() {
        let db = Connection::open_test().await;
        let member = insert_member(&db).await;

        let mut first = db.insert(Membership::new(&member, Utc::now())).await.unwrap();
        first.end = Some(Utc::now());
        let first = db.update(first).await.unwrap();
        let second = db.insert(Membership::new(&member, Utc::now())).await.unwrap();

        let all = member.get_memberships(&db).await.unwrap();
        assert_eq!(all, vec![first.clone(), second.clone()]);

        let open: Vec<Membership> = db
            .query(&MembershipFilter {
                open: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open, vec![second]);

        let closed: Vec<Membership> = db
            .query(&MembershipFilter {
                open: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(closed, vec![first]);
    }
}
