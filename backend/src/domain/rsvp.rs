//! RSVP form submissions.
//!
//! The site posts the form as camelCase JSON. [`RsvpSubmission::validate`]
//! checks every field and reports each failure as an [`AppError::Form`] whose
//! user message comes from the form message table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AppError;
use super::error_builders::{FieldErrorOptions, create_form_error};
use super::postal_code::validate_postal_code;

/// Largest companion count a guest may register.
pub const MAX_COMPANIONS: u8 = 5;
const MAX_NAME_CHARS: usize = 50;
const MAX_ADDRESS_CHARS: usize = 200;
const MAX_TEXT_CHARS: usize = 1000;

/// Whether the guest will attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    /// The guest will attend.
    Attending,
    /// The guest sends regrets.
    Declining,
}

/// RSVP form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    /// Invitation the reply belongs to, when the guest arrived via a link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_id: Option<String>,
    /// Guest's full name.
    #[serde(default)]
    pub name: String,
    /// Name reading in hiragana.
    #[serde(default)]
    pub furigana: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone, digits with optional hyphens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal code for mailed items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Attendance reply; absent until the guest picks one.
    #[serde(default)]
    pub attendance: Option<Attendance>,
    /// Additional people attending with the guest.
    #[serde(default)]
    pub companions: u8,
    /// Dietary restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    /// Free-form message to the couple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn reject(field: &str, rule: &str, message: &str, input: impl Into<Value>) -> AppError {
    create_form_error(FieldErrorOptions::new(message, field, rule).input_value(input))
}

fn is_hiragana_reading(value: &str) -> bool {
    value
        .chars()
        .all(|c| matches!(c, 'ぁ'..='ゖ' | 'ー' | ' ' | '\u{3000}'))
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !value.chars().any(char::is_whitespace)
}

fn is_phone_number(value: &str) -> bool {
    let digits: Vec<char> = value.chars().filter(|c| *c != '-').collect();
    matches!(digits.len(), 10 | 11) && digits.iter().all(char::is_ascii_digit)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl RsvpSubmission {
    /// Check every field, returning all failures at once.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::RsvpSubmission;
    ///
    /// let submission: RsvpSubmission = serde_json::from_value(serde_json::json!({
    ///     "name": "山田 花子",
    ///     "furigana": "やまだ はなこ",
    ///     "email": "hanako@example.com",
    ///     "attendance": "attending",
    /// }))
    /// .expect("decode submission");
    /// assert!(submission.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), Vec<AppError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(reject("name", "required", "name is empty", name));
        } else if name.chars().count() > MAX_NAME_CHARS {
            errors.push(reject("name", "maxLength", "name is too long", name));
        }

        let furigana = self.furigana.trim();
        if furigana.is_empty() {
            errors.push(reject("furigana", "required", "furigana is empty", furigana));
        } else if !is_hiragana_reading(furigana) {
            errors.push(reject(
                "furigana",
                "pattern",
                "furigana must be hiragana",
                furigana,
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(reject("email", "required", "email is empty", email));
        } else if !is_plausible_email(email) {
            errors.push(reject("email", "email", "email is malformed", email));
        }

        if let Some(phone) = non_blank(self.phone.as_deref()) {
            if !is_phone_number(phone) {
                errors.push(reject("phone", "phone", "phone is malformed", phone));
            }
        }

        if let Some(code) = non_blank(self.postal_code.as_deref()) {
            if !validate_postal_code(code) {
                errors.push(reject(
                    "postalCode",
                    "postalCode",
                    "postal code is malformed",
                    code,
                ));
            }
        }

        if self
            .address
            .as_deref()
            .is_some_and(|address| address.chars().count() > MAX_ADDRESS_CHARS)
        {
            errors.push(reject(
                "address",
                "maxLength",
                "address is too long",
                Value::Null,
            ));
        }

        if self.attendance.is_none() {
            errors.push(reject(
                "attendance",
                "required",
                "attendance is missing",
                Value::Null,
            ));
        }

        if self.companions > MAX_COMPANIONS {
            errors.push(reject(
                "companions",
                "maxLength",
                "too many companions",
                self.companions,
            ));
        }

        for (field, text) in [
            ("allergies", self.allergies.as_deref()),
            ("message", self.message.as_deref()),
        ] {
            if text.is_some_and(|t| t.chars().count() > MAX_TEXT_CHARS) {
                errors.push(reject(
                    field,
                    "maxLength",
                    "text exceeds the length limit",
                    Value::Null,
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
