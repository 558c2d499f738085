use crate::database::Transaction;
use crate::entity::{Rental, RentalId, ReturnedAt};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;

    async fn record_return(
        &self,
        con: &mut Connection,
        id: &RentalId,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<(), KernelError>;

    /// Removes the rental together with every payment it owns.
    async fn delete(&self, con: &mut Connection, id: &RentalId)
        -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier<Connection: Transaction>: 'static + Sync + Send {
    type RentalModifier: RentalModifier<Connection>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
