mod id;

pub use self::id::*;
use crate::entity::{CreatedAt, Money};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// A single amount paid against a rental. Never modified once recorded.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Payment {
    id: PaymentId,
    amount: Money,
    created_at: CreatedAt<Payment>,
}

impl Payment {
    pub fn new(id: PaymentId, amount: Money, created_at: CreatedAt<Payment>) -> Self {
        Self {
            id,
            amount,
            created_at,
        }
    }
}
