//! Registration, login and OTP verification
//!
//! The auth endpoints live next to the task API but need no credential. A successful
//! sign-in yields a [`Session`] that the caller typically hands to a
//! [`SessionStore`](crate::session::SessionStore).

use std::error::Error;
use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::session::Session;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("the email regex is valid"));

/// Minimal password length accepted at registration
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Serialize)]
struct SignUpRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpRequest<'a> {
    email: &'a str,
    otp_code: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    name: String,
    email: String,
    access_token: String,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Field-level validation errors for the registration form.
///
/// Unlike remote-call failures (which become transient notices), these are meant to
/// be displayed next to the offending field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegistrationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl Display for RegistrationErrors {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut messages = Vec::new();
        if let Some(m) = &self.name { messages.push(m.as_str()); }
        if let Some(m) = &self.email { messages.push(m.as_str()); }
        if let Some(m) = &self.password { messages.push(m.as_str()); }
        write!(f, "{}", messages.join(" "))
    }
}

/// Validate the registration fields before any network call
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), RegistrationErrors> {
    let mut errors = RegistrationErrors::default();

    if name.trim().is_empty() {
        errors.name = Some("Name is required.".to_string());
    }
    if EMAIL_RE.is_match(email) == false {
        errors.email = Some("Invalid email format.".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.password = Some(format!("Password must be at least {} characters long.", MIN_PASSWORD_LEN));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A client for the sign-up/sign-in/OTP endpoints
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Create a client against the configured default server
    pub fn with_default_url() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::api_base_url())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Register a new account. On success the server emails an OTP to verify,
    /// see [`Self::verify_otp`]
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
        validate_registration(name, email, password).map_err(|errors| errors.to_string())?;

        let response = self.http
            .post(self.endpoint("auth/signup/"))
            .json(&SignUpRequest { name, email, password })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    /// Confirm the OTP code received by email after a [`Self::sign_up`]
    pub async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<(), Box<dyn Error>> {
        if otp_code.trim().is_empty() {
            return Err("OTP is required.".into());
        }

        let response = self.http
            .post(self.endpoint("auth/verify-otp/"))
            .json(&VerifyOtpRequest { email, otp_code })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    /// Exchange credentials for a session carrying the bearer token
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Box<dyn Error>> {
        let response = self.http
            .post(self.endpoint("auth/signin/"))
            .json(&SignInRequest { email, password })
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(api_error(response).await);
        }

        let reply = response.json::<SignInResponse>().await?;
        Ok(Session {
            name: reply.name,
            email: reply.email,
            token: reply.access_token,
        })
    }
}

/// Turn an error reply into a displayable error, keeping the server's `message`
/// field when there is one
async fn api_error(response: reqwest::Response) -> Box<dyn Error> {
    let status = response.status();
    match response.json::<ApiMessage>().await {
        Ok(reply) => format!("{} ({})", reply.message, status).into(),
        Err(_) => format!("Unexpected HTTP status code {:?}", status).into(),
    }
}
