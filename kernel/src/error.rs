use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    UnknownPricingTier,
    NotFound,
    InvalidInput,
    Conflict,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::UnknownPricingTier => write!(f, "Unknown pricing tier"),
            KernelError::NotFound => write!(f, "Rental not found"),
            KernelError::InvalidInput => write!(f, "Invalid input"),
            KernelError::Conflict => write!(f, "Conflicting rental state"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
