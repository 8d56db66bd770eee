use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use cashdesk_data::{Delete, Insert, Member, MemberFilter, Query, Retrieve, Update};

use crate::{
    results::{single, Id},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;

    /// Fetch members ordered by member number
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                m.id,
                m.first_name,
                m.last_name,
                m.birthday,
                ms.id AS open_membership_id
            FROM members AS m
            LEFT JOIN memberships AS ms
                ON ms.member_id = m.id AND ms.end_at IS NULL
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND m.id = ").push_bind(id);
        }
        if let Some(first_name) = filter.first_name.clone() {
            qry.push(" AND m.first_name = ").push_bind(first_name);
        }
        if let Some(last_name) = filter.last_name.clone() {
            qry.push(" AND m.last_name = ").push_bind(last_name);
        }
        if let Some(name) = filter.name.clone() {
            let pattern = format!("%{}%", name);
            qry.push(" AND (m.first_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR m.last_name LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qry.push(" ORDER BY m.id");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;

    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let members: Vec<Member> = self.query(&filter).await?;
        Ok(single(members)?)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    first_name,
                    last_name,
                    birthday
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.first_name)
                .push_bind(&member.last_name)
                .push_bind(member.birthday);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update the personal data of a member. The open
    /// membership is not part of the member record.
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" first_name = ")
                .push_bind(&member.first_name)
                .push(", last_name = ")
                .push_bind(&member.last_name)
                .push(", birthday = ")
                .push_bind(member.birthday)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member together with its memberships and deposits
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::QueryError;

    use cashdesk_data::{Deposit, DepositFilter, Membership, MembershipFilter};

    fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_member_insert() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new("Ann", "Lee", birthday()))
            .await
            .unwrap();

        assert_eq!(member.id, 1);
        assert_eq!(member.first_name, "Ann");
        assert_eq!(member.last_name, "Lee");
        assert_eq!(member.birthday, birthday());
        assert_eq!(member.open_membership_id, None);
    }

    #[tokio::test]
    async fn test_member_insert_duplicate_last_name() {
        let db = Connection::open_test().await;
        db.insert(Member::new("Ann", "Lee", birthday())).await.unwrap();
        let result = db.insert(Member::new("Bob", "Lee", birthday())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_member_update() {
        let db = Connection::open_test().await;
        let mut member = db
            .insert(Member::new("Ann", "Lee", birthday()))
            .await
            .unwrap();
        member.first_name = "Anna".to_string();
        member.birthday = NaiveDate::from_ymd_opt(1991, 2, 3).unwrap();

        let member = db.update(member).await.unwrap();
        assert_eq!(member.first_name, "Anna");
        assert_eq!(member.last_name, "Lee");
        assert_eq!(member.birthday, NaiveDate::from_ymd_opt(1991, 2, 3).unwrap());
    }

    #[tokio::test]
    async fn test_member_filter() {
        let db = Connection::open_test().await;
        db.insert(Member::new("Ann", "Lee", birthday())).await.unwrap();
        db.insert(Member::new("Bob", "Marley", birthday())).await.unwrap();

        let members: Vec<Member> = db
            .query(&MemberFilter {
                last_name: Some("Marley".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "Bob");

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].last_name, "Lee");
        assert_eq!(members[1].last_name, "Marley");
    }

    #[tokio::test]
    async fn test_member_query_name_like() {
        let db = Connection::open_test().await;
        db.insert(Member::new("Ann", "Lee", birthday())).await.unwrap();

        let members: Vec<Member> = db
            .query(&MemberFilter {
                name: Some("aN".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(members.len(), 1);

        let members: Vec<Member> = db
            .query(&MemberFilter {
                name: Some("xyz".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(members.len(), 0);
    }

    #[tokio::test]
    async fn test_member_retrieve_not_found() {
        let db = Connection::open_test().await;
        let err = Retrieve::<Member>::retrieve(&db, 23).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<QueryError>(),
            Some(&QueryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_member_open_membership() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new("Ann", "Lee", birthday()))
            .await
            .unwrap();
        let membership = db
            .insert(Membership::new(&member, Utc::now()))
            .await
            .unwrap();

        let member: Member = db.retrieve(member.id).await.unwrap();
        assert_eq!(member.open_membership_id, Some(membership.id));
        let open = member.get_open_membership(&db).await.unwrap();
        assert_eq!(open, Some(membership.clone()));

        // Close the membership
        let membership = Membership {
            end: Some(Utc::now()),
            ..membership
        };
        db.update(membership).await.unwrap();

        let member: Member = db.retrieve(member.id).await.unwrap();
        assert_eq!(member.open_membership_id, None);
        assert_eq!(member.get_open_membership(&db).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_member_delete_cascades() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member::new("Ann", "Lee", birthday()))
            .await
            .unwrap();
        let membership = db
            .insert(Membership::new(&member, Utc::now()))
            .await
            .unwrap();
        db.insert(Deposit::new(&membership, 23.0, Utc::now()))
            .await
            .unwrap();

        db.delete(member.clone()).await.unwrap();

        let members: Vec<Member> = db.query(&MemberFilter::default()).await.unwrap();
        assert!(members.is_empty());
        let memberships: Vec<Membership> = db
            .query(&MembershipFilter::default())
            .await
            .unwrap();
        assert!(memberships.is_empty());
        let deposits: Vec<Deposit> = db.query(&DepositFilter::default()).await.unwrap();
        assert!(deposits.is_empty());
    }
}
