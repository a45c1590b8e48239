//! # Records
//!
//! Rows as they come out of the spreadsheet backend and the typed records we
//! hand to the rest of the system.
//!
//! Rows are read into loose `Raw*` structs first, then validated. A row that
//! cannot become a record is rejected with a [`RowError`] instead of being
//! quietly patched up. The only field that is coerced is the guest headcount.
//!
//! ## Wire Keys
//! - Guests: `Name`, `Email`, `RSVP`, `Guest`, `Message`
//! - Entourage: `Name`, `RoleCategory`, `RoleTitle`, `Email`
//! - Principal sponsors: `MalePrincipalSponsor`, `FemalePrincipalSponsor`
use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::attendance::coerce_headcount;

pub const PENDING_EMAIL: &str = "Pending";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Row has no name")]
    MissingName,

    #[error("Unknown RSVP value {value:?} for {name}")]
    InvalidRsvp { name: String, value: String },

    #[error("Sponsor row has neither sponsor")]
    EmptySponsorRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rsvp {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Rsvp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rsvp::Yes => "Yes",
            Rsvp::No => "No",
            Rsvp::Unanswered => "",
        }
    }

    pub fn is_answered(&self) -> bool {
        *self != Rsvp::Unanswered
    }
}

impl FromStr for Rsvp {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            Ok(Rsvp::Unanswered)
        } else if trimmed.eq_ignore_ascii_case("yes") {
            Ok(Rsvp::Yes)
        } else if trimmed.eq_ignore_ascii_case("no") {
            Ok(Rsvp::No)
        } else {
            Err(trimmed.to_string())
        }
    }
}

impl fmt::Display for Rsvp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rsvp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rsvp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = loose_string(deserializer)?;

        raw.parse()
            .map_err(|value| serde::de::Error::custom(format!("unknown RSVP value {value:?}")))
    }
}

/// Contact address, `"Pending"` on the wire until the guest gives one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Email {
    Address(String),
    #[default]
    Pending,
}

impl Email {
    pub fn address(&self) -> Option<&str> {
        match self {
            Email::Address(address) => Some(address),
            Email::Pending => None,
        }
    }
}

impl From<&str> for Email {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed == PENDING_EMAIL {
            Email::Pending
        } else {
            Email::Address(trimmed.to_string())
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address().unwrap_or(PENDING_EMAIL))
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Email::from(loose_string(deserializer)?.as_str()))
    }
}

/// Accepts strings, numbers, booleans and nulls. Sheet cells come back as
/// whatever type the spreadsheet guessed.
pub fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGuest {
    #[serde(rename = "Name", default, deserialize_with = "loose_string")]
    pub name: String,

    #[serde(rename = "Email", default, deserialize_with = "loose_string")]
    pub email: String,

    #[serde(rename = "RSVP", default, deserialize_with = "loose_string")]
    pub rsvp: String,

    #[serde(rename = "Guest", default, deserialize_with = "loose_string")]
    pub guest: String,

    #[serde(rename = "Message", default, deserialize_with = "loose_string")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Email")]
    pub email: Email,

    #[serde(rename = "RSVP")]
    pub rsvp: Rsvp,

    #[serde(rename = "Guest", serialize_with = "headcount_as_string")]
    pub headcount: u32,

    #[serde(rename = "Message")]
    pub message: String,
}

fn headcount_as_string<S: Serializer>(headcount: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(headcount)
}

impl GuestRecord {
    pub fn has_responded(&self) -> bool {
        self.rsvp.is_answered()
    }

    /// Write-through of an accepted update, same fields the sheet overwrites.
    pub fn apply(&mut self, update: &GuestUpdate) {
        self.name = update.name.clone();
        self.email = update.email.clone();
        self.rsvp = update.rsvp;
        self.headcount = coerce_headcount(&update.guest);
        self.message = update.message.clone();
    }
}

impl TryFrom<RawGuest> for GuestRecord {
    type Error = RowError;

    /// The name is kept exactly as the sheet holds it, it is the update key.
    fn try_from(raw: RawGuest) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() {
            return Err(RowError::MissingName);
        }

        let rsvp = raw
            .rsvp
            .parse()
            .map_err(|value| RowError::InvalidRsvp {
                name: raw.name.trim().to_string(),
                value,
            })?;

        Ok(Self {
            email: Email::from(raw.email.as_str()),
            headcount: coerce_headcount(&raw.guest),
            message: raw.message.trim().to_string(),
            rsvp,
            name: raw.name,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateAction {
    #[serde(rename = "update")]
    Update,
}

/// Partial update sent for one invitee, keyed on the name they were found under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUpdate {
    pub action: UpdateAction,

    #[serde(rename = "originalName")]
    pub original_name: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Email", default)]
    pub email: Email,

    #[serde(rename = "RSVP")]
    pub rsvp: Rsvp,

    #[serde(rename = "Guest")]
    pub guest: String,

    #[serde(rename = "Message", default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRequest {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "Guest", default = "one_seat")]
    pub guest: String,

    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn one_seat() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntourageMember {
    #[serde(rename = "Name", default, deserialize_with = "loose_string")]
    pub name: String,

    #[serde(rename = "RoleCategory", default, deserialize_with = "loose_string")]
    pub role_category: String,

    #[serde(rename = "RoleTitle", default, deserialize_with = "loose_string")]
    pub role_title: String,

    #[serde(rename = "Email", default, deserialize_with = "loose_string")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntourageMember {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "RoleCategory")]
    pub role_category: String,

    #[serde(rename = "RoleTitle")]
    pub role_title: String,

    #[serde(rename = "Email")]
    pub email: String,
}

impl TryFrom<RawEntourageMember> for EntourageMember {
    type Error = RowError;

    fn try_from(raw: RawEntourageMember) -> Result<Self, Self::Error> {
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return Err(RowError::MissingName);
        }

        Ok(Self {
            name,
            role_category: raw.role_category.trim().to_string(),
            role_title: raw.role_title.trim().to_string(),
            email: raw.email.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSponsorPair {
    #[serde(rename = "MalePrincipalSponsor", default, deserialize_with = "loose_string")]
    pub male: String,

    #[serde(rename = "FemalePrincipalSponsor", default, deserialize_with = "loose_string")]
    pub female: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalSponsorPair {
    #[serde(rename = "MalePrincipalSponsor")]
    pub male: String,

    #[serde(rename = "FemalePrincipalSponsor")]
    pub female: String,
}

impl TryFrom<RawSponsorPair> for PrincipalSponsorPair {
    type Error = RowError;

    fn try_from(raw: RawSponsorPair) -> Result<Self, Self::Error> {
        let male = raw.male.trim().to_string();
        let female = raw.female.trim().to_string();

        if male.is_empty() && female.is_empty() {
            return Err(RowError::EmptySponsorRow);
        }

        Ok(Self { male, female })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookMessage {
    pub timestamp: String,
    pub name: String,
    pub message: String,
}

/// Keeps the rows that validate, logs the rest.
pub fn validate_rows<R, T>(rows: impl IntoIterator<Item = R>) -> Vec<T>
where
    T: TryFrom<R, Error = RowError>,
{
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            T::try_from(raw)
                .map_err(|e| warn!("Rejected row {index}: {e}"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(name: &str, rsvp: &str, guest: &str) -> RawGuest {
        RawGuest {
            name: name.to_string(),
            rsvp: rsvp.to_string(),
            guest: guest.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_guest_from_sheet_json() {
        let rows: Vec<RawGuest> = serde_json::from_value(json!([
            {
                "Name": "Anna Cruz",
                "Email": "anna@example.com",
                "RSVP": "Yes",
                "Guest": 2,
                "Message": "See you!"
            },
            { "Name": "Juan", "Email": "", "RSVP": "", "Guest": null },
        ]))
        .unwrap();

        let guests: Vec<GuestRecord> = validate_rows(rows);

        assert_eq!(guests.len(), 2);
        assert_eq!(guests[0].headcount, 2);
        assert_eq!(guests[0].rsvp, Rsvp::Yes);
        assert_eq!(guests[0].email.address(), Some("anna@example.com"));
        assert_eq!(guests[1].email, Email::Pending);
        assert_eq!(guests[1].headcount, 1);
        assert!(!guests[1].has_responded());
    }

    #[test]
    fn test_rejects_malformed_rows() {
        assert_eq!(
            GuestRecord::try_from(raw("   ", "Yes", "1")),
            Err(RowError::MissingName)
        );
        assert_eq!(
            GuestRecord::try_from(raw("Eve", "maybe", "1")),
            Err(RowError::InvalidRsvp {
                name: "Eve".to_string(),
                value: "maybe".to_string(),
            })
        );

        let guests: Vec<GuestRecord> =
            validate_rows(vec![raw("", "", ""), raw("Ann", "no", "x"), raw("Bo", "?", "")]);
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].rsvp, Rsvp::No);
        assert_eq!(guests[0].headcount, 1);
    }

    #[test]
    fn test_sheet_name_kept_verbatim() {
        let record = GuestRecord::try_from(raw(" Ann Lim ", "", "")).unwrap();

        assert_eq!(record.name, " Ann Lim ");
    }

    #[test]
    fn test_record_serializes_with_sheet_keys() {
        let record = GuestRecord::try_from(raw("Ann", "yes", "3")).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({ "Name": "Ann", "Email": "Pending", "RSVP": "Yes", "Guest": "3", "Message": "" })
        );
    }

    #[test]
    fn test_update_payload_shape() {
        let update: GuestUpdate = serde_json::from_value(json!({
            "action": "update",
            "originalName": "Ann",
            "Name": "Ann",
            "Email": "",
            "RSVP": "No",
            "Guest": "0",
            "Message": ""
        }))
        .unwrap();

        assert_eq!(update.email, Email::Pending);
        assert_eq!(update.rsvp, Rsvp::No);
        assert_eq!(serde_json::to_value(&update).unwrap()["Email"], "Pending");

        let bad_action = serde_json::from_value::<GuestUpdate>(json!({
            "action": "delete", "originalName": "Ann", "Name": "Ann", "RSVP": "No", "Guest": "0"
        }));
        assert!(bad_action.is_err());
    }

    #[test]
    fn test_apply_update() {
        let mut record = GuestRecord::try_from(raw("Ann", "", "4")).unwrap();
        let update = GuestUpdate {
            action: UpdateAction::Update,
            original_name: "Ann".to_string(),
            name: "Ann Reyes".to_string(),
            email: Email::from("ann@example.com"),
            rsvp: Rsvp::Yes,
            guest: "1".to_string(),
            message: "Congrats".to_string(),
        };

        record.apply(&update);

        assert_eq!(record.name, "Ann Reyes");
        assert_eq!(record.headcount, 1);
        assert!(record.has_responded());
    }

    #[test]
    fn test_sponsor_pairs() {
        let pairs: Vec<PrincipalSponsorPair> = validate_rows(vec![
            RawSponsorPair {
                male: "Mr. Santos".to_string(),
                female: "".to_string(),
            },
            RawSponsorPair::default(),
        ]);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].female, "");
    }
}
