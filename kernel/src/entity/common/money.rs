use std::fmt::{Display, Formatter};

use error_stack::Report;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Exact monetary amount. May be negative when a balance is overpaid.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Fromln,
    AsRefln,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Money) -> error_stack::Result<Money, KernelError> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .ok_or_else(|| overflow(format!("{self} + {rhs}")))
    }

    pub fn checked_sub(self, rhs: Money) -> error_stack::Result<Money, KernelError> {
        self.0
            .checked_sub(rhs.0)
            .map(Money)
            .ok_or_else(|| overflow(format!("{self} - {rhs}")))
    }

    pub fn checked_mul(self, times: i64) -> error_stack::Result<Money, KernelError> {
        self.0
            .checked_mul(Decimal::from(times))
            .map(Money)
            .ok_or_else(|| overflow(format!("{self} * {times}")))
    }
}

fn overflow(operation: String) -> Report<KernelError> {
    Report::new(KernelError::InvalidInput)
        .attach_printable(format!("amount overflowed computing {operation}"))
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
