use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(UserId);
define_id_type!(BookId);
define_id_type!(CustomerId);
define_id_type!(EntryId);

impl UserId {
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(UserId(Uuid::parse_str(s)?))
    }
}

impl EntryId {
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(EntryId(Uuid::parse_str(s)?))
    }
}
