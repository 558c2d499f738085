use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordPaymentDto {
    pub rental_id: Uuid,
    pub amount: Decimal,
}
