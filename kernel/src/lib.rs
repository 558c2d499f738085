pub use crate::error::*;

mod billing;
mod clock;
mod database;
mod entity;
mod error;
mod modify;
mod pricing;
mod query;
mod status;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod billing {
        pub use crate::billing::*;
        pub use crate::status::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
    pub mod pricing {
        pub use crate::pricing::*;
    }
    pub mod clock {
        pub use crate::clock::*;
    }
}
