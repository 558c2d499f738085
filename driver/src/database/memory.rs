use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::RentalQuery;
use kernel::interface::update::{PaymentModifier, RentalModifier};
use kernel::prelude::entity::{Payment, Rental, RentalId, ReturnedAt, StudentId};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
struct Store {
    rentals: Vec<Rental>,
}

impl Store {
    fn find(&self, id: &RentalId) -> Option<&Rental> {
        self.rentals.iter().find(|rental| rental.id() == id)
    }

    fn find_mut(&mut self, id: &RentalId) -> error_stack::Result<&mut Rental, KernelError> {
        self.rentals
            .iter_mut()
            .find(|rental| rental.id() == id)
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("rental {}", id.as_ref()))
            })
    }
}

/// Rentals kept in process memory.
///
/// Only one transaction is open at a time. It works on a copy of the store
/// that replaces the shared state on commit and is discarded otherwise.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryTransaction> for InMemoryDatabase {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Store>,
    staged: Store,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub struct InMemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<InMemoryTransaction> for InMemoryRentalRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.staged.find(id).cloned())
    }

    async fn find_by_student_id(
        &self,
        con: &mut InMemoryTransaction,
        student_id: &StudentId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        Ok(con
            .staged
            .rentals
            .iter()
            .filter(|rental| rental.student_id() == student_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalModifier<InMemoryTransaction> for InMemoryRentalRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if con.staged.find(rental.id()).is_some() {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("rental {} already exists", rental.id().as_ref())));
        }
        con.staged.rentals.push(rental.clone());
        Ok(())
    }

    async fn record_return(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.find_mut(id)?.mark_returned(returned_at.clone())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        let before = con.staged.rentals.len();
        con.staged.rentals.retain(|rental| rental.id() != id);
        if con.staged.rentals.len() == before {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("rental {}", id.as_ref())));
        }
        Ok(())
    }
}

pub struct InMemoryPaymentRepository;

#[async_trait::async_trait]
impl PaymentModifier<InMemoryTransaction> for InMemoryPaymentRepository {
    async fn append(
        &self,
        con: &mut InMemoryTransaction,
        rental_id: &RentalId,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.find_mut(rental_id)?.record_payment(payment.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::{PaymentModifier, RentalModifier};
    use kernel::prelude::entity::{
        CreatedAt, LockerId, Money, Payment, PaymentId, RentTypeId, Rental, RentalId,
        RentalPeriod, ReturnedAt, StudentId,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryPaymentRepository, InMemoryRentalRepository};

    fn rental(student: i64) -> Rental {
        Rental::open(
            RentalId::new(Uuid::new_v4()),
            StudentId::new(student),
            LockerId::new("C-12"),
            RentTypeId::new(1),
            RentalPeriod::new(
                datetime!(2024-05-01 09:00 UTC),
                datetime!(2024-05-08 09:00 UTC),
            ),
        )
    }

    fn payment(amount: Money) -> Payment {
        Payment::new(
            PaymentId::new(Uuid::new_v4()),
            amount,
            CreatedAt::new(datetime!(2024-05-02 09:00 UTC)),
        )
    }

    #[tokio::test]
    async fn committed_changes_are_visible() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let rental = rental(1);

        let mut con = db.transact().await?;
        InMemoryRentalRepository.create(&mut con, &rental).await?;
        InMemoryPaymentRepository
            .append(&mut con, rental.id(), &payment(Money::new(dec!(7.5))))
            .await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?
            .expect("rental was committed");
        assert_eq!(found.payments().len(), 1);
        assert_eq!(found.payments()[0].amount(), &Money::new(dec!(7.5)));
        Ok(())
    }

    #[tokio::test]
    async fn rolled_back_changes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let rental = rental(1);

        let mut con = db.transact().await?;
        InMemoryRentalRepository.create(&mut con, &rental).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_owned_payments() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let kept = rental(1);
        let removed = rental(1);

        let mut con = db.transact().await?;
        InMemoryRentalRepository.create(&mut con, &kept).await?;
        InMemoryRentalRepository.create(&mut con, &removed).await?;
        InMemoryPaymentRepository
            .append(&mut con, removed.id(), &payment(Money::new(dec!(3))))
            .await?;
        InMemoryRentalRepository
            .delete(&mut con, removed.id())
            .await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let rentals = InMemoryRentalRepository
            .find_by_student_id(&mut con, &StudentId::new(1))
            .await?;
        assert_eq!(rentals, vec![kept]);

        let missing = InMemoryRentalRepository
            .delete(&mut con, removed.id())
            .await
            .unwrap_err();
        assert!(matches!(missing.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn return_is_stored_once() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let rental = rental(2);
        let returned_at = ReturnedAt::new(datetime!(2024-05-09 12:00 UTC));

        let mut con = db.transact().await?;
        InMemoryRentalRepository.create(&mut con, &rental).await?;
        InMemoryRentalRepository
            .record_return(&mut con, rental.id(), &returned_at)
            .await?;
        let again = InMemoryRentalRepository
            .record_return(&mut con, rental.id(), &returned_at)
            .await
            .unwrap_err();
        assert!(matches!(again.current_context(), KernelError::Conflict));

        let found = InMemoryRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?
            .expect("rental exists in the open transaction");
        assert_eq!(found.returned_at(), &Some(returned_at));
        Ok(())
    }

    #[tokio::test]
    async fn payment_for_unknown_rental_fails() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let result = InMemoryPaymentRepository
            .append(
                &mut con,
                &RentalId::new(Uuid::new_v4()),
                &payment(Money::new(dec!(1))),
            )
            .await;
        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::NotFound
        ));
        Ok(())
    }
}
