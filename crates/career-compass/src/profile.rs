//! Student profile as stored by the gateway and as edited through the profile form.

use serde::{Deserialize, Serialize};

use crate::session::{Identity, UserId};

/// Stored student profile, one per user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub current_town: String,
    pub preferred_city: String,
    pub tenth_marks: Option<f32>,
    pub twelfth_marks: Option<f32>,
}

impl UserProfile {
    /// Preferred city when one has been entered.
    pub fn preferred_city(&self) -> Option<&str> {
        let city = self.preferred_city.trim();
        (!city.is_empty()).then_some(city)
    }
}

/// Editable form representation; every field is free text as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub current_town: String,
    pub preferred_city: String,
    pub tenth_marks: String,
    pub twelfth_marks: String,
}

impl ProfileForm {
    /// Prefill from the stored profile, falling back to the identity's email.
    pub fn prefill(profile: Option<&UserProfile>, identity: &Identity) -> Self {
        let identity_email = identity.email.clone().unwrap_or_default();
        match profile {
            Some(profile) => Self {
                full_name: profile.full_name.clone(),
                email: if profile.email.is_empty() {
                    identity_email
                } else {
                    profile.email.clone()
                },
                phone: profile.phone.clone(),
                current_town: profile.current_town.clone(),
                preferred_city: profile.preferred_city.clone(),
                tenth_marks: format_marks(profile.tenth_marks),
                twelfth_marks: format_marks(profile.twelfth_marks),
            },
            None => Self {
                email: identity_email,
                ..Self::default()
            },
        }
    }

    pub fn into_profile(self, user_id: UserId) -> Result<UserProfile, ProfileError> {
        let tenth_marks = parse_marks("tenth_marks", &self.tenth_marks)?;
        let twelfth_marks = parse_marks("twelfth_marks", &self.twelfth_marks)?;

        Ok(UserProfile {
            user_id,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            current_town: self.current_town.trim().to_string(),
            preferred_city: self.preferred_city.trim().to_string(),
            tenth_marks,
            twelfth_marks,
        })
    }
}

fn format_marks(marks: Option<f32>) -> String {
    marks.map(|value| value.to_string()).unwrap_or_default()
}

fn parse_marks(field: &'static str, raw: &str) -> Result<Option<f32>, ProfileError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: f32 = raw.parse().map_err(|_| ProfileError::InvalidMarks {
        field,
        value: raw.to_string(),
    })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ProfileError::MarksOutOfRange { field, value });
    }

    Ok(Some(value))
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be a number (got '{value}')")]
    InvalidMarks { field: &'static str, value: String },
    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    MarksOutOfRange { field: &'static str, value: f32 },
}
