//! Identifier types for the automation domain.
//!
//! Every entity in the CRM schema uses a 64-bit integer key. Wrapping them in
//! distinct newtypes keeps account, user, stage, and platform identifiers from
//! being swapped at call sites that take several of them at once.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of a customer account.
    AccountId
);
integer_id!(
    /// Identifier of a user within an account.
    UserId
);
integer_id!(
    /// Identifier of an outreach platform (for example a social network).
    PlatformId
);
integer_id!(
    /// Identifier of a pipeline stage.
    StageId
);
integer_id!(
    /// Identifier of a lead.
    LeadId
);
integer_id!(
    /// Identifier of a lead-status lookup row.
    LeadStatusId
);
integer_id!(
    /// Identifier of a persisted automation status record.
    AutomationStatusId
);
