//! Account registration input.

use validator::Validate;

use docshare_core::error::AppError;

/// Details for a new account, validated before anything is sent.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    /// Display name.
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    /// Contact email, also used to log in.
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl Registration {
    /// Build registration input from its parts.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Validate the input, collecting every problem into one message.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| {
            let mut messages: Vec<String> = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            messages.sort();
            AppError::validation(messages.join("; "))
        })
    }
}
