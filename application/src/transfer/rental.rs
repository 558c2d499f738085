use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::pricing::PricingLookup;
use kernel::prelude::billing::{resolve, BillingStatement, RentalStatus};
use kernel::prelude::entity::{DestructRental, DestructRentalPeriod, Rental};
use kernel::KernelError;

/// Outward record of a rental. `amount_owed` and `status` are computed when
/// the record is built and never read back from storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RentalDto {
    pub id: Uuid,
    pub student_id: i64,
    pub locker_id: String,
    pub rent_type: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub rent_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub rent_to: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub returned_at: Option<OffsetDateTime>,
    pub amount_owed: Decimal,
    pub status: RentalStatus,
}

impl RentalDto {
    pub fn compute<P>(
        rental: Rental,
        pricing: &P,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError>
    where
        P: PricingLookup + ?Sized,
    {
        let statement = BillingStatement::compute(&rental, pricing, now)?;
        let status = resolve(&rental, &statement, now);
        let DestructRental {
            id,
            student_id,
            locker_id,
            rent_type,
            period,
            returned_at,
            ..
        } = rental.into_destruct();
        let DestructRentalPeriod { from, to } = period.into_destruct();
        Ok(Self {
            id: id.into(),
            student_id: student_id.into(),
            locker_id: locker_id.into(),
            rent_type: rent_type.into(),
            rent_from: from,
            rent_to: to,
            returned_at: returned_at.map(OffsetDateTime::from),
            amount_owed: statement.amount_owed().into(),
            status,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GetRentalDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetRentalsByStudentDto {
    pub student_id: i64,
}

/// Period bounds are `YYYY-MM-DDTHH:MM` (UTC) or RFC 3339 strings.
#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub student_id: i64,
    pub locker_id: String,
    pub rent_type: i32,
    pub rent_from: String,
    pub rent_to: String,
}

/// Without `returned_at` the return is stamped with the current time.
#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub rental_id: Uuid,
    pub returned_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteRentalDto {
    pub id: Uuid,
}
