use crate::database::Transaction;
use crate::entity::{Payment, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn append(
        &self,
        con: &mut Connection,
        rental_id: &RentalId,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnPaymentModifier<Connection: Transaction>: 'static + Sync + Send {
    type PaymentModifier: PaymentModifier<Connection>;
    fn payment_modifier(&self) -> &Self::PaymentModifier;
}
