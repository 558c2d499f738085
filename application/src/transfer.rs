mod payment;
mod rental;

pub use self::{payment::*, rental::*};
