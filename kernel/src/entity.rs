mod common;
mod locker;
mod payment;
mod rent_type;
mod rental;
mod student;

pub use self::{common::*, locker::*, payment::*, rent_type::*, rental::*, student::*};
