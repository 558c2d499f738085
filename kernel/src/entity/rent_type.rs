mod id;

pub use self::id::*;
use crate::entity::Money;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// Pricing tier a rental is billed under.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct RentType {
    id: RentTypeId,
    price: Money,
}

impl RentType {
    pub fn new(id: RentTypeId, price: Money) -> Self {
        Self { id, price }
    }
}
