use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::pricing::DependOnPricingLookup;
use kernel::interface::query::DependOnRentalQuery;
use kernel::interface::update::{DependOnPaymentModifier, DependOnRentalModifier};
use kernel::KernelError;

use crate::clock::SystemClock;
use crate::database::{
    InMemoryDatabase, InMemoryPaymentRepository, InMemoryRentalRepository, InMemoryTransaction,
};
use crate::pricing::PricingTable;

/// Wires the store, the pricing table and a clock into every capability the
/// rental services depend on.
pub struct LockerModule<C: Clock = SystemClock> {
    database: InMemoryDatabase,
    pricing: PricingTable,
    time: C,
}

impl<C: Clock> LockerModule<C> {
    pub fn new(database: InMemoryDatabase, pricing: PricingTable, clock: C) -> Self {
        Self {
            database,
            pricing,
            time: clock,
        }
    }
}

impl LockerModule<SystemClock> {
    pub fn init() -> error_stack::Result<Self, KernelError> {
        let pricing = PricingTable::from_env()?;
        tracing::info!(rent_types = pricing.len(), "locker module ready");
        Ok(Self::new(InMemoryDatabase::new(), pricing, SystemClock))
    }
}

#[async_trait::async_trait]
impl<C: Clock> DatabaseConnection<InMemoryTransaction> for LockerModule<C> {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        self.database.transact().await
    }
}

impl<C: Clock> DependOnRentalQuery<InMemoryTransaction> for LockerModule<C> {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &InMemoryRentalRepository
    }
}

impl<C: Clock> DependOnRentalModifier<InMemoryTransaction> for LockerModule<C> {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &InMemoryRentalRepository
    }
}

impl<C: Clock> DependOnPaymentModifier<InMemoryTransaction> for LockerModule<C> {
    type PaymentModifier = InMemoryPaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &InMemoryPaymentRepository
    }
}

impl<C: Clock> DependOnPricingLookup for LockerModule<C> {
    type PricingLookup = PricingTable;
    fn pricing_lookup(&self) -> &Self::PricingLookup {
        &self.pricing
    }
}

impl<C: Clock> DependOnClock for LockerModule<C> {
    type Clock = C;
    fn clock(&self) -> &Self::Clock {
        &self.time
    }
}
