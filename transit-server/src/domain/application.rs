//! Passenger application records and the submission form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;
use super::time_slot::TimeSlot;

/// A stored passenger application.
///
/// The wire format is the camelCase JSON the site has always stored:
/// ledger-assigned fields (`id`, `submittedAt`, `status`) alongside the
/// form fields. Fields this version doesn't know about are preserved
/// through load/persist round-trips via `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerApplication {
    /// Opaque unique token, sortable by generation order.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// Calendar date string (`YYYY-MM-DD`); the ledger compares it as an
    /// opaque string.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: TimeSlot,
    /// Whether the passenger asked for SMS alerts.
    #[serde(default)]
    pub alerts: bool,
    #[serde(default)]
    pub notes: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
    /// Unknown fields from future form versions, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PassengerApplication {
    /// Display label for the route, e.g. "Accra → Kumasi".
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

/// Error returned when a submission form fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("origin and destination must be different cities")]
    SameCity,

    #[error("invalid travel date: {0}")]
    InvalidDate(String),
}

/// A caller-populated trip application, before the ledger assigns
/// `id`, `submittedAt` and `status`.
///
/// Validation is the caller's job: the ledger's contract is capacity
/// checking and persistence, not form validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: TimeSlot,
    #[serde(default)]
    pub alerts: bool,
    #[serde(default)]
    pub notes: String,
}

impl TripForm {
    /// Validate the form before submission.
    ///
    /// Required fields must be non-empty, origin and destination must
    /// differ, and the travel date must be a real calendar date.
    pub fn validate(&self) -> Result<(), FormError> {
        let required: [(&'static str, &str); 6] = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("date", &self.date),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }

        if self.origin == self.destination {
            return Err(FormError::SameCity);
        }

        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> TripForm {
        TripForm {
            name: "Ama Mensah".into(),
            phone: "+233201234567".into(),
            email: "ama@example.com".into(),
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Morning,
            alerts: true,
            notes: String::new(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn empty_required_field_rejected() {
        for field in ["name", "phone", "email", "origin", "destination", "date"] {
            let mut form = valid_form();
            match field {
                "name" => form.name.clear(),
                "phone" => form.phone.clear(),
                "email" => form.email.clear(),
                "origin" => form.origin.clear(),
                "destination" => form.destination.clear(),
                "date" => form.date.clear(),
                _ => unreachable!(),
            }
            assert_eq!(form.validate(), Err(FormError::MissingField(field)));
        }
    }

    #[test]
    fn whitespace_only_field_rejected() {
        let mut form = valid_form();
        form.name = "   ".into();
        assert_eq!(form.validate(), Err(FormError::MissingField("name")));
    }

    #[test]
    fn same_city_rejected() {
        let mut form = valid_form();
        form.destination = form.origin.clone();
        assert_eq!(form.validate(), Err(FormError::SameCity));
    }

    #[test]
    fn bad_date_rejected() {
        let mut form = valid_form();
        form.date = "01/06/2024".into();
        assert!(matches!(form.validate(), Err(FormError::InvalidDate(_))));

        form.date = "2024-02-30".into();
        assert!(matches!(form.validate(), Err(FormError::InvalidDate(_))));
    }

    #[test]
    fn record_wire_format_is_camel_case() {
        let record = PassengerApplication {
            id: "1717245000000".into(),
            name: "Ama Mensah".into(),
            phone: "+233201234567".into(),
            email: "ama@example.com".into(),
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Morning,
            alerts: true,
            notes: String::new(),
            submitted_at: "2024-06-01T08:30:00Z".parse().unwrap(),
            status: ApplicationStatus::Pending,
            extra: serde_json::Map::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["submittedAt"], "2024-06-01T08:30:00Z");
        assert_eq!(json["time"], "morning");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["alerts"], true);
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let json = r#"{
            "id": "1",
            "name": "Kofi",
            "origin": "Accra",
            "destination": "Tamale",
            "date": "2024-06-01",
            "submittedAt": "2024-06-01T08:30:00Z",
            "seatPreference": "window"
        }"#;

        let record: PassengerApplication = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["seatPreference"], "window");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["seatPreference"], "window");
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "id": "1",
            "name": "Kofi",
            "origin": "Accra",
            "destination": "Tamale",
            "date": "2024-06-01",
            "submittedAt": "2024-06-01T08:30:00Z"
        }"#;

        let record: PassengerApplication = serde_json::from_str(json).unwrap();
        assert_eq!(record.time, TimeSlot::Any);
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert!(!record.alerts);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn route_label() {
        let json = r#"{
            "id": "1",
            "origin": "Kumasi",
            "destination": "Tamale",
            "submittedAt": "2024-06-01T08:30:00Z"
        }"#;
        let record: PassengerApplication = serde_json::from_str(json).unwrap();
        assert_eq!(record.route_label(), "Kumasi → Tamale");
    }
}
