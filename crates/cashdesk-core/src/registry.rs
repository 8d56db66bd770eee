use chrono::NaiveDate;

use cashdesk_data::{Delete, Insert, Member, MemberFilter, Query, Retrieve};

use crate::errors::{is_not_found, Error, Result};

/// Check that a required text field is not blank
/// and return it without surrounding whitespace.
pub fn validate_name(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

/// Resolve a member number to a live member
pub async fn find_member<DB>(db: &DB, member_id: u32) -> Result<Member>
where
    DB: Retrieve<Member, Key = u32> + Send + Sync,
{
    db.retrieve(member_id).await.map_err(|err| {
        if is_not_found(&err) {
            Error::UnknownMember(member_id)
        } else {
            Error::Store(err)
        }
    })
}

/// Register a new member. The last name must not be
/// used by any other member.
pub async fn add_member<DB>(
    db: &DB,
    first_name: &str,
    last_name: &str,
    birthday: NaiveDate,
) -> Result<Member>
where
    DB: Query<Member, Filter = MemberFilter> + Insert<Member> + Send + Sync,
{
    let first_name = validate_name("first name", first_name)?;
    let last_name = validate_name("last name", last_name)?;

    let members: Vec<Member> = db
        .query(&MemberFilter {
            last_name: Some(last_name.clone()),
            ..Default::default()
        })
        .await?;
    if !members.is_empty() {
        tracing::debug!(last_name = %last_name, "rejected duplicate last name");
        return Err(Error::DuplicateName(last_name));
    }

    let member = db
        .insert(Member::new(&first_name, &last_name, birthday))
        .await?;
    tracing::info!(member_id = member.id, "member added");

    Ok(member)
}

/// Remove a member. Memberships and deposits of the
/// member are removed by the store.
pub async fn delete_member<DB>(db: &DB, member_id: u32) -> Result<()>
where
    DB: Retrieve<Member, Key = u32> + Delete<Member> + Send + Sync,
{
    let member = find_member(db, member_id).await?;
    db.delete(member).await?;
    tracing::info!(member_id, "member deleted");
    Ok(())
}
