use serde::{Deserialize, Serialize};

use crate::Member;

/// The deposit total of a member's current membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositStatistics {
    pub member: Member,
    pub total_amount: f64,
}
