use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{elapsed_days, parse_instant};
use crate::KernelError;

/// Contracted rental window. `to` is expected not to precede `from`, but this
/// type does not enforce it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, References, Destructure)]
pub struct RentalPeriod {
    from: OffsetDateTime,
    to: OffsetDateTime,
}

impl RentalPeriod {
    pub fn new(from: impl Into<OffsetDateTime>, to: impl Into<OffsetDateTime>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn parse(from: &str, to: &str) -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(parse_instant(from)?, parse_instant(to)?))
    }

    /// Number of whole days billed for the window.
    pub fn days(&self) -> i64 {
        elapsed_days(&self.from, &self.to)
    }

    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }

    pub fn has_elapsed(&self, now: &OffsetDateTime) -> bool {
        *now > self.to
    }
}
