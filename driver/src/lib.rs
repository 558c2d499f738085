use crate::error::DriverError;

pub mod clock;
pub mod database;
pub mod error;
pub mod logging;
pub mod module;
pub mod pricing;

pub(crate) fn env(key: &str) -> Result<String, DriverError> {
    dotenvy::var(key).map_err(DriverError::from)
}
