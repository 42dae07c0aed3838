use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// A single person as stored in the `personas` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub nacimiento: String,
    pub numero: String,
    pub gmail: String,
    pub profesion: String,
    #[serde(rename = "certificado_N")]
    #[sqlx(rename = "certificado_N")]
    pub certificado_n: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateUserRecord {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: String,
    /// Expected as YYYY-MM-DD, stored as given.
    pub nacimiento: String,
    pub numero: String,
    #[validate(
        email(message = "gmail must be a valid email address"),
        custom(function = "validate_email_domain")
    )]
    pub gmail: String,
    pub profesion: String,
    #[serde(rename = "certificado_N")]
    pub certificado_n: String,
}

/// Body of `PUT /users/{id}`.
///
/// Leaving out `certificado_N` keeps the stored certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateUserRecord {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: String,
    pub nacimiento: String,
    pub numero: String,
    #[validate(
        email(message = "gmail must be a valid email address"),
        custom(function = "validate_email_domain")
    )]
    pub gmail: String,
    pub profesion: String,
    #[serde(
        rename = "certificado_N",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificado_n: Option<String>,
}

/// The domain must be a dotted host name: `pedro@pedro`, `a@localhost` and
/// address literals such as `a@[127.0.0.1]` are rejected.
pub fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("");

    let labels: Vec<&str> = domain.split('.').collect();
    let well_formed = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        });

    if well_formed {
        Ok(())
    } else {
        let mut error = ValidationError::new("email_domain");
        error.message = Some(Cow::from("gmail must use a dotted domain name"));
        Err(error)
    }
}

impl UserRecord {
    pub fn from_create(id: i64, input: CreateUserRecord) -> Self {
        Self {
            id,
            username: input.username,
            nacimiento: input.nacimiento,
            numero: input.numero,
            gmail: input.gmail,
            profesion: input.profesion,
            certificado_n: input.certificado_n,
        }
    }
}
