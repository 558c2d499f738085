use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;

use crate::billing::BillingStatement;
use crate::entity::Rental;
use crate::pricing::PricingLookup;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RentalStatus {
    Owed,
    Partial,
    Paid,
    Returned,
    Overdue,
}

impl Display for RentalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalStatus::Owed => write!(f, "Owed"),
            RentalStatus::Partial => write!(f, "Partial"),
            RentalStatus::Paid => write!(f, "Paid"),
            RentalStatus::Returned => write!(f, "Returned"),
            RentalStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

/// Derives the status of `rental` from a statement computed for the same `now`.
///
/// The checks are ordered and the first match wins: once any payment exists an
/// overdue rental reports `Partial` rather than `Overdue`.
/// An overpaid balance counts as settled.
pub fn resolve(rental: &Rental, statement: &BillingStatement, now: &OffsetDateTime) -> RentalStatus {
    if !rental.has_payments() {
        return if rental.period().has_elapsed(now) {
            RentalStatus::Overdue
        } else {
            RentalStatus::Owed
        };
    }

    if statement.total_paid() < statement.gross_obligation() {
        RentalStatus::Partial
    } else if statement.is_settled() {
        if rental.is_returned() {
            RentalStatus::Returned
        } else {
            RentalStatus::Paid
        }
    } else {
        RentalStatus::Owed
    }
}

pub fn resolve_status<P>(
    rental: &Rental,
    pricing: &P,
    now: &OffsetDateTime,
) -> error_stack::Result<RentalStatus, KernelError>
where
    P: PricingLookup + ?Sized,
{
    let statement = BillingStatement::compute(rental, pricing, now)?;
    Ok(resolve(rental, &statement, now))
}
