use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::pricing::DependOnPricingLookup;
use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    parse_instant, LockerId, RentTypeId, Rental, RentalId, RentalPeriod, ReturnedAt, StudentId,
};
use kernel::KernelError;

use crate::transfer::{
    CreateRentalDto, DeleteRentalDto, GetRentalDto, GetRentalsByStudentDto, RentalDto,
    ReturnRentalDto,
};

#[async_trait::async_trait]
pub trait GetRentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnPricingLookup
    + DependOnClock
{
    #[tracing::instrument(skip(self))]
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self.rental_query().find_by_id(&mut connection, &id).await?;

        let now = self.clock().now();
        rental
            .map(|rental| RentalDto::compute(rental, self.pricing_lookup(), &now))
            .transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn get_rentals_by_student(
        &self,
        dto: GetRentalsByStudentDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let student_id = StudentId::new(dto.student_id);
        let rentals = self
            .rental_query()
            .find_by_student_id(&mut connection, &student_id)
            .await?;

        let now = self.clock().now();
        rentals
            .into_iter()
            .map(|rental| RentalDto::compute(rental, self.pricing_lookup(), &now))
            .collect()
    }
}

impl<Connection: Transaction + Send, T> GetRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnPricingLookup
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait CreateRentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalModifier<Connection>
    + DependOnPricingLookup
    + DependOnClock
{
    /// Opens a rental and returns it with its initial balance and status.
    /// Nothing is stored when the rent type is unknown.
    #[tracing::instrument(skip(self))]
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let period = RentalPeriod::parse(&dto.rent_from, &dto.rent_to)?;
        if !period.is_ordered() {
            tracing::warn!("rejected rental ending before it starts");
            return Err(Report::new(KernelError::InvalidInput).attach_printable(format!(
                "rental period ends ({}) before it starts ({})",
                dto.rent_to, dto.rent_from
            )));
        }

        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            StudentId::new(dto.student_id),
            LockerId::new(dto.locker_id),
            RentTypeId::new(dto.rent_type),
            period,
        );
        let now = self.clock().now();
        let created = RentalDto::compute(rental.clone(), self.pricing_lookup(), &now)?;

        let mut connection = self.database_connection().transact().await?;
        self.rental_modifier().create(&mut connection, &rental).await?;
        connection.commit().await?;

        tracing::info!(rental = %created.id, amount_owed = %created.amount_owed, "rental opened");
        Ok(created)
    }
}

impl<Connection: Transaction + Send, T> CreateRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnRentalModifier<Connection>
        + DependOnPricingLookup
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
    + DependOnPricingLookup
    + DependOnClock
{
    #[tracing::instrument(skip(self))]
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let requested = dto.returned_at.as_deref().map(parse_instant).transpose()?;

        let mut connection = self.database_connection().transact().await?;
        let now = self.clock().now();
        let returned_at = ReturnedAt::new(requested.unwrap_or(now));
        let id = RentalId::new(dto.rental_id);
        let mut rental = find_rental(self.rental_query(), &mut connection, &id).await?;

        rental.mark_returned(returned_at.clone())?;
        self.rental_modifier()
            .record_return(&mut connection, &id, &returned_at)
            .await?;
        let returned = RentalDto::compute(rental, self.pricing_lookup(), &now)?;
        connection.commit().await?;

        tracing::info!(rental = %returned.id, status = %returned.status, "locker returned");
        Ok(returned)
    }
}

impl<Connection: Transaction + Send, T> ReturnRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
        + DependOnPricingLookup
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait DeleteRentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalModifier<Connection>
{
    #[tracing::instrument(skip(self))]
    async fn delete_rental(&self, dto: DeleteRentalDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        self.rental_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("rental deleted");
        Ok(())
    }
}

impl<Connection: Transaction + Send, T> DeleteRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnRentalModifier<Connection>
{
}

pub(crate) async fn find_rental<Connection, Q>(
    query: &Q,
    connection: &mut Connection,
    id: &RentalId,
) -> error_stack::Result<Rental, KernelError>
where
    Connection: Transaction,
    Q: RentalQuery<Connection>,
{
    query.find_by_id(connection, id).await?.ok_or_else(|| {
        Report::new(KernelError::NotFound).attach_printable(format!("rental {}", id.as_ref()))
    })
}
