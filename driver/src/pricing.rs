use std::collections::HashMap;
use std::path::Path;

use error_stack::{Report, ResultExt};
use rust_decimal::Decimal;
use serde::Deserialize;

use kernel::interface::pricing::PricingLookup;
use kernel::prelude::entity::{Money, RentType, RentTypeId};
use kernel::KernelError;

use crate::env;
use crate::error::{ConvertError, DriverError};

static RENT_TYPES_PATH: &str = "RENT_TYPES_PATH";

#[derive(Debug, Deserialize)]
struct RentTypeRecord {
    id: i32,
    price: Decimal,
}

/// Rent types held in memory, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    rent_types: HashMap<RentTypeId, RentType>,
}

impl PricingTable {
    pub fn new(
        rent_types: impl IntoIterator<Item = RentType>,
    ) -> error_stack::Result<Self, KernelError> {
        let mut table = HashMap::new();
        for rent_type in rent_types {
            if rent_type.price().is_negative() {
                return Err(Report::new(KernelError::InvalidInput).attach_printable(format!(
                    "rent type {} has negative price {}",
                    rent_type.id().as_ref(),
                    rent_type.price()
                )));
            }
            let id = rent_type.id().clone();
            if table.insert(id.clone(), rent_type).is_some() {
                return Err(Report::new(KernelError::InvalidInput)
                    .attach_printable(format!("rent type {} is defined twice", id.as_ref())));
            }
        }
        Ok(Self { rent_types: table })
    }

    /// Parses `[{"id": 1, "price": "10.00"}, ...]`.
    pub fn from_json(json: &str) -> error_stack::Result<Self, KernelError> {
        let records = serde_json::from_str::<Vec<RentTypeRecord>>(json)
            .map_err(DriverError::from)
            .convert_error()?;
        Self::new(
            records
                .into_iter()
                .map(|record| RentType::new(RentTypeId::new(record.id), Money::new(record.price))),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> error_stack::Result<Self, KernelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(DriverError::from)
            .convert_error()
            .attach_printable_lazy(|| format!("reading rent types from {}", path.display()))?;
        let table = Self::from_json(&json)?;
        tracing::debug!(count = table.len(), path = %path.display(), "rent types loaded");
        Ok(table)
    }

    /// Loads the file named by `RENT_TYPES_PATH`.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let path = env(RENT_TYPES_PATH)?;
        Self::from_file(path)
    }

    pub fn len(&self) -> usize {
        self.rent_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rent_types.is_empty()
    }
}

impl PricingLookup for PricingTable {
    fn find_rent_type(&self, id: &RentTypeId) -> Option<RentType> {
        self.rent_types.get(id).cloned()
    }
}
