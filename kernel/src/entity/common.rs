mod money;
mod time;

pub use self::{money::*, time::*};
