use serde::Deserialize;
use validator::Validate;

use crate::domain::types::LoginEmail;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Credentials posted from the login page.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Checks the credentials are present and well-formed.
    ///
    /// There is no credential store; any such pair is accepted.
    pub fn identity(&self) -> Result<LoginEmail, FormError> {
        self.validate()?;
        LoginEmail::new(self.email.as_str())
            .map_err(|err| FormError::Malformed(err.to_string()))
    }
}
