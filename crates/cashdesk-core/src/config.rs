use serde::{Deserialize, Serialize};

pub const DEFAULT_MEMBERS_DB: &str = "members.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Filename or sqlite url of the members database
    pub members_db: String,
}

impl Config {
    pub fn new(members_db: &str) -> Self {
        Self {
            members_db: members_db.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MEMBERS_DB)
    }
}
