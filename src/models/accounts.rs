use serde::{Deserialize, Serialize};

/// Fixed error string shown whenever sign-up fails, regardless of the reason.
pub const SIGNUP_ERROR: &str = "Invalid sign up - try again";
/// Shown whenever login fails; never reveals which part was wrong.
pub const LOGIN_ERROR: &str = "Invalid login - try again";

/// Sign-up form: username plus password and confirmation.
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Login form.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Account form document, rendered blank on GET and with the fixed error
/// string when a submission is rejected.
#[derive(Serialize)]
pub struct AccountFormView {
    pub error: Option<&'static str>,
}

/// Validate a sign-up submission. Returns the trimmed username, or the reason
/// the submission was rejected (logged, never shown to the user).
pub fn validate_signup(form: &SignupForm) -> Result<String, String> {
    let username = form.username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err("username must be 1-32 characters".into());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("username must contain only letters, digits, and underscores".into());
    }
    if form.password1.len() < 8 || form.password1.len() > 128 {
        return Err("password must be 8-128 characters".into());
    }
    if form.password1 != form.password2 {
        return Err("password confirmation does not match".into());
    }
    Ok(username.to_string())
}
