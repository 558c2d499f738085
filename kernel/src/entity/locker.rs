use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Code printed on the locker door, e.g. `B-104`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LockerId(String);

impl LockerId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}
