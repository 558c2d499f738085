use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::pricing::DependOnPricingLookup;
use kernel::interface::query::DependOnRentalQuery;
use kernel::interface::update::{DependOnPaymentModifier, PaymentModifier};
use kernel::prelude::entity::{CreatedAt, Money, Payment, PaymentId, RentalId};
use kernel::KernelError;

use crate::service::rental::find_rental;
use crate::transfer::{RecordPaymentDto, RentalDto};

#[async_trait::async_trait]
pub trait RecordPaymentService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnPaymentModifier<Connection>
    + DependOnPricingLookup
    + DependOnClock
{
    /// Appends a payment and returns the rental with its recomputed balance.
    #[tracing::instrument(skip(self))]
    async fn record_payment(
        &self,
        dto: RecordPaymentDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let amount = Money::new(dto.amount);
        if amount.is_negative() {
            tracing::warn!("rejected negative payment");
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("payment amount {amount} is negative")));
        }

        let mut connection = self.database_connection().transact().await?;
        let rental_id = RentalId::new(dto.rental_id);
        let mut rental = find_rental(self.rental_query(), &mut connection, &rental_id).await?;

        let now = self.clock().now();
        let payment = Payment::new(PaymentId::new(Uuid::new_v4()), amount, CreatedAt::new(now));
        self.payment_modifier()
            .append(&mut connection, &rental_id, &payment)
            .await?;
        rental.record_payment(payment);

        let updated = RentalDto::compute(rental, self.pricing_lookup(), &now)?;
        connection.commit().await?;

        tracing::info!(
            rental = %updated.id,
            amount_owed = %updated.amount_owed,
            status = %updated.status,
            "payment recorded"
        );
        Ok(updated)
    }
}

impl<Connection: Transaction + Send, T> RecordPaymentService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnPaymentModifier<Connection>
        + DependOnPricingLookup
        + DependOnClock
{
}
