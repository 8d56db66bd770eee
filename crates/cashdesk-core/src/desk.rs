use chrono::NaiveDate;
use tokio::sync::Mutex;

use cashdesk_data::{Deposit, DepositStatistics, Member, MemberFilter, Membership, Query};
use cashdesk_db::{schema, Connection};

use crate::{
    datetime,
    errors::{Error, Result},
    ledger, registry, statistics, Config,
};

/// The cash desk session.
///
/// All operations fail with `Error::NotInitialized` until
/// the session was initialized. Every operation runs under
/// the session lock, so state transitions never interleave.
#[derive(Debug)]
pub struct CashDesk {
    config: Config,
    db: Option<Connection>,
    lock: Mutex<()>,
}

impl CashDesk {
    /// Create an uninitialized session
    pub fn new(config: Config) -> Self {
        Self {
            config,
            db: None,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.db.is_some()
    }

    /// Open the configured database and install the schema
    pub async fn initialize(&mut self) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        let conn = Connection::open(&self.config.members_db).await?;
        self.initialize_with(conn).await
    }

    /// Initialize the session with an open connection
    pub async fn initialize_with(&mut self, conn: Connection) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        schema::install(&conn).await?;
        self.db = Some(conn);
        tracing::info!(members_db = %self.config.members_db, "cash desk initialized");
        Ok(())
    }

    fn session(&self) -> Result<&Connection> {
        self.db.as_ref().ok_or(Error::NotInitialized)
    }

    /// Register a member and return the member number
    pub async fn add_member(
        &self,
        first_name: &str,
        last_name: &str,
        birthday: NaiveDate,
    ) -> Result<u32> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        let member = registry::add_member(db, first_name, last_name, birthday).await?;
        Ok(member.id)
    }

    pub async fn delete_member(&self, member_id: u32) -> Result<()> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        registry::delete_member(db, member_id).await
    }

    pub async fn join_member(&self, member_id: u32) -> Result<Membership> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        ledger::join_member(db, member_id, datetime::now()).await
    }

    pub async fn cancel_membership(&self, member_id: u32) -> Result<Membership> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        ledger::cancel_membership(db, member_id, datetime::now()).await
    }

    pub async fn deposit(&self, member_id: u32, amount: f64) -> Result<Deposit> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        ledger::deposit(db, member_id, amount, datetime::now()).await
    }

    /// Deposit totals of the current memberships, ordered
    /// by member number
    pub async fn get_deposit_statistics(&self) -> Result<Vec<DepositStatistics>> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        statistics::deposit_statistics(db).await
    }

    pub async fn get_member(&self, member_id: u32) -> Result<Member> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        registry::find_member(db, member_id).await
    }

    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        let members: Vec<Member> = db.query(filter).await?;
        Ok(members)
    }

    /// All memberships of a member, oldest first
    pub async fn get_memberships(&self, member_id: u32) -> Result<Vec<Membership>> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        let member = registry::find_member(db, member_id).await?;
        Ok(member.get_memberships(db).await?)
    }

    /// All deposits of a member over all memberships
    pub async fn get_deposits(&self, member_id: u32) -> Result<Vec<Deposit>> {
        let db = self.session()?;
        let _guard = self.lock.lock().await;
        let member = registry::find_member(db, member_id).await?;
        Ok(member.get_deposits(db).await?)
    }
}
