//! Departure time windows.

use std::fmt;

use serde::de::{Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A departure time window chosen on the application form.
///
/// `Any` means "any time": it carries no capacity ceiling, and is the
/// stored representation of an empty or absent time string. The three
/// named windows participate in slot capacity checks.
///
/// # Examples
///
/// ```
/// use transit_server::domain::TimeSlot;
///
/// assert_eq!(TimeSlot::parse("morning"), TimeSlot::Morning);
/// assert_eq!(TimeSlot::parse(""), TimeSlot::Any);
/// assert!(TimeSlot::Morning.is_capacitated());
/// assert!(!TimeSlot::Any.is_capacitated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeSlot {
    /// No specific window; exempt from capacity checks.
    #[default]
    Any,
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// Parse a stored time string.
    ///
    /// Unknown legacy values normalize to `Any`, the same rule applied to
    /// unknown status values.
    pub fn parse(s: &str) -> Self {
        match s {
            "morning" => TimeSlot::Morning,
            "afternoon" => TimeSlot::Afternoon,
            "evening" => TimeSlot::Evening,
            _ => TimeSlot::Any,
        }
    }

    /// The wire representation (empty string for `Any`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Any => "",
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }

    /// Human-readable window label shown to passengers.
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Any => "Any time",
            TimeSlot::Morning => "Morning (6:00 AM - 12:00 PM)",
            TimeSlot::Afternoon => "Afternoon (12:00 PM - 6:00 PM)",
            TimeSlot::Evening => "Evening (6:00 PM - 10:00 PM)",
        }
    }

    /// Whether this window counts against the per-slot capacity limit.
    /// The "any time" window exists to let passengers opt out of the
    /// constraint entirely.
    pub fn is_capacitated(&self) -> bool {
        !matches!(self, TimeSlot::Any)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotVisitor;

        impl<'de> Visitor<'de> for SlotVisitor {
            type Value = TimeSlot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a time window string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<TimeSlot, E> {
                Ok(TimeSlot::parse(v))
            }

            // Legacy records may store null for "any time"
            fn visit_none<E: serde::de::Error>(self) -> Result<TimeSlot, E> {
                Ok(TimeSlot::Any)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<TimeSlot, E> {
                Ok(TimeSlot::Any)
            }
        }

        deserializer.deserialize_any(SlotVisitor)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// as_str then parse returns the original variant
        #[test]
        fn wire_roundtrip(slot in prop_oneof![
            Just(TimeSlot::Any),
            Just(TimeSlot::Morning),
            Just(TimeSlot::Afternoon),
            Just(TimeSlot::Evening),
        ]) {
            prop_assert_eq!(TimeSlot::parse(slot.as_str()), slot);
        }

        /// Parsing never panics and lands on a valid variant
        #[test]
        fn parse_total(s in ".*") {
            let slot = TimeSlot::parse(&s);
            prop_assert!(matches!(
                slot,
                TimeSlot::Any | TimeSlot::Morning | TimeSlot::Afternoon | TimeSlot::Evening
            ));
        }
    }
}
