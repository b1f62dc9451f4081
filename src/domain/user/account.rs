//! User account record, sign-up form and profile edits.
//!
//! Passwords are stored exactly as entered. Accounts only personalize the
//! app; nothing here is an authorization boundary.

use serde::{Deserialize, Serialize};

use super::AccountError;
use crate::domain::foundation::{Timestamp, UserId};

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Fallback greeting when no name is known.
pub const DEFAULT_GREETING_NAME: &str = "User";

/// One entry of the persisted `users` list (and the `currentUser` copy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    /// Plain text; see module docs.
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub profile: ProfileDetails,
}

/// Optional profile fields filled in after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
}

impl UserRecord {
    /// Case-insensitive email comparison used for uniqueness and sign-in.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// A profile counts as complete once a phone number is on file.
    pub fn is_profile_complete(&self) -> bool {
        !self.phone.trim().is_empty()
    }

    pub fn greeting_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            DEFAULT_GREETING_NAME
        } else {
            name
        }
    }

    /// Overwrites the editable fields with a validated profile edit.
    pub fn apply_profile(&mut self, edit: ProfileEdit) {
        self.full_name = edit.full_name;
        self.email = edit.email;
        self.phone = edit.phone;
        self.profile = edit.details;
    }
}

/// Raw sign-up input.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl SignUpForm {
    /// Checks required fields and password rules, then builds the record.
    /// Email uniqueness is checked by the caller against the stored list.
    pub fn into_user(self, now: Timestamp) -> Result<UserRecord, AccountError> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        if full_name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AccountError::MissingRequiredFields);
        }
        if self.password != self.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(UserRecord {
            id: UserId::new(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: self.password,
            phone: self.phone.trim().to_string(),
            created_at: now,
            profile: ProfileDetails::default(),
        })
    }
}

/// Validated profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEdit {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub details: ProfileDetails,
}

/// Raw edit-profile input.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub details: ProfileDetails,
}

impl ProfileForm {
    /// Name and email are always required; phone only while completing a
    /// freshly registered profile.
    pub fn validate(self, is_new_user: bool) -> Result<ProfileEdit, AccountError> {
        let full_name = self.full_name.trim().to_string();
        let email = self.email.trim().to_string();
        if full_name.is_empty() || email.is_empty() {
            return Err(AccountError::MissingNameOrEmail);
        }
        let phone = self.phone.trim().to_string();
        if is_new_user && phone.is_empty() {
            return Err(AccountError::PhoneRequired);
        }

        Ok(ProfileEdit {
            full_name,
            email,
            phone,
            details: normalize(self.details),
        })
    }
}

fn normalize(details: ProfileDetails) -> ProfileDetails {
    fn clean(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    ProfileDetails {
        date_of_birth: clean(details.date_of_birth),
        gender: clean(details.gender),
        blood_type: clean(details.blood_type),
        allergies: clean(details.allergies),
        medications: clean(details.medications),
        emergency_contact: clean(details.emergency_contact),
        emergency_phone: clean(details.emergency_phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            phone: String::new(),
        }
    }

    #[test]
    fn sign_up_builds_record_without_phone() {
        let user = form().into_user(Timestamp::now()).unwrap();
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.password, "secret1");
        assert!(!user.is_profile_complete());
    }

    #[test]
    fn sign_up_requires_all_fields() {
        let err = SignUpForm {
            confirm_password: String::new(),
            ..form()
        }
        .into_user(Timestamp::now())
        .unwrap_err();
        assert_eq!(err, AccountError::MissingRequiredFields);
    }

    #[test]
    fn sign_up_rejects_mismatched_passwords_before_length() {
        let err = SignUpForm {
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..form()
        }
        .into_user(Timestamp::now())
        .unwrap_err();
        assert_eq!(err, AccountError::PasswordMismatch);
    }

    #[test]
    fn sign_up_rejects_short_password() {
        let err = SignUpForm {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..form()
        }
        .into_user(Timestamp::now())
        .unwrap_err();
        assert_eq!(err, AccountError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn email_comparison_ignores_case() {
        let user = form().into_user(Timestamp::now()).unwrap();
        assert!(user.has_email("ADA@Example.com"));
        assert!(!user.has_email("bob@example.com"));
    }

    #[test]
    fn greeting_falls_back_to_user() {
        let mut user = form().into_user(Timestamp::now()).unwrap();
        assert_eq!(user.greeting_name(), "Ada Lovelace");
        user.full_name = "  ".into();
        assert_eq!(user.greeting_name(), "User");
    }

    #[test]
    fn profile_form_requires_phone_only_for_new_users() {
        let edit = ProfileForm {
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            edit.clone().validate(true).unwrap_err(),
            AccountError::PhoneRequired
        );
        assert!(edit.validate(false).is_ok());
    }

    #[test]
    fn profile_form_drops_blank_optional_fields() {
        let edit = ProfileForm {
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
            details: ProfileDetails {
                gender: Some("  ".into()),
                blood_type: Some(" O+ ".into()),
                ..Default::default()
            },
        }
        .validate(true)
        .unwrap();
        assert_eq!(edit.details.gender, None);
        assert_eq!(edit.details.blood_type.as_deref(), Some("O+"));
    }

    #[test]
    fn record_round_trips_with_flattened_profile() {
        let mut user = form().into_user(Timestamp::now()).unwrap();
        user.profile.allergies = Some("penicillin".into());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert_eq!(json["allergies"], "penicillin");
        assert!(json.get("gender").is_none());

        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
