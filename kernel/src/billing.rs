use error_stack::ResultExt;
use time::OffsetDateTime;

use crate::entity::{elapsed_days, Money, Rental};
use crate::pricing::PricingLookup;
use crate::KernelError;

/// Fee breakdown of a rental evaluated at one instant.
///
/// Everything here is derived from the rental and the rent type price, so a
/// statement is only valid for the `now` it was computed with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BillingStatement {
    price_per_day: Money,
    rented_days: i64,
    late_days: i64,
    rental_charge: Money,
    late_fee: Money,
    gross_obligation: Money,
    total_paid: Money,
    amount_owed: Money,
}

impl BillingStatement {
    pub fn compute<P>(
        rental: &Rental,
        pricing: &P,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError>
    where
        P: PricingLookup + ?Sized,
    {
        let price = pricing
            .price_of(rental.rent_type())
            .attach_printable_lazy(|| format!("billing rental {}", rental.id().as_ref()))?;
        Self::with_price(rental, price, now)
            .attach_printable_lazy(|| format!("billing rental {}", rental.id().as_ref()))
    }

    /// Fails with `InvalidInput` when an amount exceeds the decimal range.
    pub fn with_price(
        rental: &Rental,
        price_per_day: Money,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        let rented_days = rental.period().days();
        let late_days = late_days(rental, now);
        let rental_charge = price_per_day.checked_mul(rented_days)?;
        let late_fee = price_per_day.checked_mul(late_days)?;
        let gross_obligation = rental_charge.checked_add(late_fee)?;
        let total_paid = total_paid(rental)?;
        Ok(Self {
            price_per_day,
            rented_days,
            late_days,
            rental_charge,
            late_fee,
            gross_obligation,
            total_paid,
            amount_owed: gross_obligation.checked_sub(total_paid)?,
        })
    }

    pub fn price_per_day(&self) -> Money {
        self.price_per_day
    }

    pub fn rented_days(&self) -> i64 {
        self.rented_days
    }

    pub fn late_days(&self) -> i64 {
        self.late_days
    }

    pub fn rental_charge(&self) -> Money {
        self.rental_charge
    }

    pub fn late_fee(&self) -> Money {
        self.late_fee
    }

    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    /// What the rental costs before any payment is subtracted.
    pub fn gross_obligation(&self) -> Money {
        self.gross_obligation
    }

    /// Outstanding balance. Negative when the renter overpaid.
    pub fn amount_owed(&self) -> Money {
        self.amount_owed
    }

    pub fn is_settled(&self) -> bool {
        self.amount_owed <= Money::ZERO
    }
}

pub fn total_paid(rental: &Rental) -> error_stack::Result<Money, KernelError> {
    rental
        .payments()
        .iter()
        .try_fold(Money::ZERO, |sum, payment| sum.checked_add(*payment.amount()))
}

/// Days charged as late. A returned rental is charged up to its return,
/// an unreturned one up to `now`.
pub fn late_days(rental: &Rental, now: &OffsetDateTime) -> i64 {
    let due = rental.period().to();
    match rental.returned_at() {
        Some(returned_at) => elapsed_days(due, returned_at.as_ref()).max(0),
        None if rental.period().has_elapsed(now) => elapsed_days(due, now),
        None => 0,
    }
}

pub fn late_fee<P>(
    rental: &Rental,
    pricing: &P,
    now: &OffsetDateTime,
) -> error_stack::Result<Money, KernelError>
where
    P: PricingLookup + ?Sized,
{
    BillingStatement::compute(rental, pricing, now).map(|statement| statement.late_fee())
}

pub fn compute_amount_owed<P>(
    rental: &Rental,
    pricing: &P,
    now: &OffsetDateTime,
) -> error_stack::Result<Money, KernelError>
where
    P: PricingLookup + ?Sized,
{
    BillingStatement::compute(rental, pricing, now).map(|statement| statement.amount_owed())
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::HashMap;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::{compute_amount_owed, late_fee, total_paid, BillingStatement};
    use crate::entity::{
        CreatedAt, LockerId, Money, Payment, PaymentId, RentType, RentTypeId, Rental, RentalId,
        RentalPeriod, ReturnedAt, StudentId,
    };
    use crate::pricing::PricingLookup;
    use crate::KernelError;

    pub(crate) struct FakePricing(HashMap<i32, Money>);

    impl FakePricing {
        pub(crate) fn ten_per_day() -> Self {
            Self(HashMap::from([(1, Money::new(dec!(10)))]))
        }

        pub(crate) fn with(mut self, id: i32, price: Money) -> Self {
            self.0.insert(id, price);
            self
        }
    }

    impl PricingLookup for FakePricing {
        fn find_rent_type(&self, id: &RentTypeId) -> Option<RentType> {
            self.0
                .get(id.as_ref())
                .map(|price| RentType::new(id.clone(), *price))
        }
    }

    pub(crate) const FROM: OffsetDateTime = datetime!(2024-03-01 10:00 UTC);
    pub(crate) const TO: OffsetDateTime = datetime!(2024-03-04 10:00 UTC);

    pub(crate) fn three_day_rental(rent_type: i32) -> Rental {
        Rental::open(
            RentalId::new(Uuid::new_v4()),
            StudentId::new(42),
            LockerId::new("B-104"),
            RentTypeId::new(rent_type),
            RentalPeriod::new(FROM, TO),
        )
    }

    pub(crate) fn pay(rental: &mut Rental, amount: Money) {
        rental.record_payment(Payment::new(
            PaymentId::new(Uuid::new_v4()),
            amount,
            CreatedAt::new(FROM),
        ));
    }

    #[test]
    fn nothing_paid_sums_to_zero() -> error_stack::Result<(), KernelError> {
        assert_eq!(total_paid(&three_day_rental(1))?, Money::ZERO);
        Ok(())
    }

    #[test]
    fn payments_are_summed_exactly() -> error_stack::Result<(), KernelError> {
        let mut rental = three_day_rental(1);
        pay(&mut rental, Money::new(dec!(0.1)));
        pay(&mut rental, Money::new(dec!(0.2)));
        assert_eq!(total_paid(&rental)?, Money::new(dec!(0.3)));
        Ok(())
    }

    #[test]
    fn before_due_date_only_the_period_is_charged() -> error_stack::Result<(), KernelError> {
        let rental = three_day_rental(1);
        let now = datetime!(2024-03-02 12:00 UTC);
        assert_eq!(late_fee(&rental, &FakePricing::ten_per_day(), &now)?, Money::ZERO);
        assert_eq!(
            compute_amount_owed(&rental, &FakePricing::ten_per_day(), &now)?,
            Money::new(dec!(30))
        );
        Ok(())
    }

    #[test]
    fn overdue_rental_accrues_whole_late_days() -> error_stack::Result<(), KernelError> {
        let rental = three_day_rental(1);
        let now = datetime!(2024-03-06 15:00 UTC);
        let statement = BillingStatement::compute(&rental, &FakePricing::ten_per_day(), &now)?;
        assert_eq!(statement.late_days(), 2);
        assert_eq!(statement.late_fee(), Money::new(dec!(20)));
        assert_eq!(statement.gross_obligation(), Money::new(dec!(50)));
        assert_eq!(statement.amount_owed(), Money::new(dec!(50)));
        Ok(())
    }

    #[test]
    fn late_return_is_charged_per_day_up_to_the_return() -> error_stack::Result<(), KernelError>
    {
        let mut rental = three_day_rental(1);
        rental.mark_returned(ReturnedAt::new(datetime!(2024-03-08 10:00 UTC)))?;
        let now = datetime!(2024-04-01 10:00 UTC);
        assert_eq!(
            late_fee(&rental, &FakePricing::ten_per_day(), &now)?,
            Money::new(dec!(40))
        );
        Ok(())
    }

    #[test]
    fn early_return_is_never_credited() -> error_stack::Result<(), KernelError> {
        let mut rental = three_day_rental(1);
        rental.mark_returned(ReturnedAt::new(datetime!(2024-03-02 10:00 UTC)))?;
        let now = datetime!(2024-03-10 10:00 UTC);
        assert_eq!(late_fee(&rental, &FakePricing::ten_per_day(), &now)?, Money::ZERO);
        assert_eq!(
            compute_amount_owed(&rental, &FakePricing::ten_per_day(), &now)?,
            Money::new(dec!(30))
        );
        Ok(())
    }

    #[test]
    fn overpayment_leaves_a_negative_balance() -> error_stack::Result<(), KernelError> {
        let mut rental = three_day_rental(1);
        pay(&mut rental, Money::new(dec!(45)));
        let statement = BillingStatement::compute(&rental, &FakePricing::ten_per_day(), &FROM)?;
        assert_eq!(statement.amount_owed(), Money::new(dec!(-15)));
        assert!(statement.amount_owed().is_negative());
        assert!(statement.is_settled());
        Ok(())
    }

    #[test]
    fn unknown_rent_type_yields_no_amount() {
        let rental = three_day_rental(7);
        let report = compute_amount_owed(&rental, &FakePricing::ten_per_day(), &TO).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::UnknownPricingTier
        ));
        let report = late_fee(&rental, &FakePricing::ten_per_day(), &TO).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::UnknownPricingTier
        ));
    }

    #[test]
    fn recomputation_is_stable() -> error_stack::Result<(), KernelError> {
        let mut rental = three_day_rental(1);
        pay(&mut rental, Money::new(dec!(12.5)));
        let now = datetime!(2024-03-05 11:00 UTC);
        let pricing = FakePricing::ten_per_day();
        let first = compute_amount_owed(&rental, &pricing, &now)?;
        let second = compute_amount_owed(&rental, &pricing, &now)?;
        assert_eq!(first, second);
        assert_eq!(first, Money::new(dec!(27.5)));
        Ok(())
    }

    #[test]
    fn oversized_payments_are_rejected_without_panicking() {
        let mut rental = three_day_rental(1);
        pay(&mut rental, Money::new(Decimal::MAX));
        pay(&mut rental, Money::new(Decimal::MAX));

        let report = total_paid(&rental).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidInput));
        let report =
            compute_amount_owed(&rental, &FakePricing::ten_per_day(), &FROM).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidInput));
    }

    #[test]
    fn oversized_price_is_rejected_without_panicking() {
        let pricing = FakePricing::ten_per_day().with(2, Money::new(Decimal::MAX));
        let report = BillingStatement::compute(&three_day_rental(2), &pricing, &FROM).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidInput));
    }
}
