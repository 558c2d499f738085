use error_stack::Report;

use crate::entity::{Money, RentType, RentTypeId};
use crate::KernelError;

/// Resolves a rent type identifier into its per-day price.
///
/// Lookups are expected to be cheap local reads; nothing here retries.
pub trait PricingLookup: 'static + Sync + Send {
    fn find_rent_type(&self, id: &RentTypeId) -> Option<RentType>;

    fn price_of(&self, id: &RentTypeId) -> error_stack::Result<Money, KernelError> {
        self.find_rent_type(id)
            .map(|rent_type| *rent_type.price())
            .ok_or_else(|| {
                Report::new(KernelError::UnknownPricingTier)
                    .attach_printable(format!("rent type {} is not registered", id.as_ref()))
            })
    }
}

pub trait DependOnPricingLookup: 'static + Sync + Send {
    type PricingLookup: PricingLookup;
    fn pricing_lookup(&self) -> &Self::PricingLookup;
}
