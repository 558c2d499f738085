mod id;
mod period;
mod returned_at;

pub use self::{id::*, period::*, returned_at::*};
use crate::entity::{LockerId, Payment, RentTypeId, StudentId};
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

/// A locker rented by a student under a rent type.
///
/// Amount owed and status are never stored here; they are derived from the
/// period, the payments and the return instant each time they are needed.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Rental {
    id: RentalId,
    student_id: StudentId,
    locker_id: LockerId,
    rent_type: RentTypeId,
    period: RentalPeriod,
    returned_at: Option<ReturnedAt>,
    payments: Vec<Payment>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        student_id: StudentId,
        locker_id: LockerId,
        rent_type: RentTypeId,
        period: RentalPeriod,
        returned_at: Option<ReturnedAt>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            id,
            student_id,
            locker_id,
            rent_type,
            period,
            returned_at,
            payments,
        }
    }

    /// A freshly opened rental: nothing paid, locker not returned.
    pub fn open(
        id: RentalId,
        student_id: StudentId,
        locker_id: LockerId,
        rent_type: RentTypeId,
        period: RentalPeriod,
    ) -> Self {
        Self::new(id, student_id, locker_id, rent_type, period, None, Vec::new())
    }

    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    pub fn has_payments(&self) -> bool {
        !self.payments.is_empty()
    }

    pub fn record_payment(&mut self, payment: Payment) {
        self.substitute(|rental| rental.payments.push(payment));
    }

    pub fn mark_returned(&mut self, at: ReturnedAt) -> error_stack::Result<(), KernelError> {
        if self.is_returned() {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("rental {} was already returned", self.id.as_ref())));
        }
        self.substitute(|rental| *rental.returned_at = Some(at));
        Ok(())
    }
}
