//! Application status.

use std::fmt;

use serde::de::{Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a passenger application.
///
/// The ledger only ever writes `Pending`; transitions to `Confirmed` or
/// `Cancelled` are made by an external admin tool writing the same store.
/// Unknown legacy values normalize to `Pending` on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ApplicationStatus {
    /// Parse a stored status string; unknown values become `Pending`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Confirmed" => ApplicationStatus::Confirmed,
            "Cancelled" => ApplicationStatus::Cancelled,
            _ => ApplicationStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Confirmed => "Confirmed",
            ApplicationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl<'de> Visitor<'de> for StatusVisitor {
            type Value = ApplicationStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ApplicationStatus, E> {
                Ok(ApplicationStatus::parse(v))
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<ApplicationStatus, E> {
                Ok(ApplicationStatus::Pending)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<ApplicationStatus, E> {
                Ok(ApplicationStatus::Pending)
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}
