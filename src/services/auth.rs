//! Mocked authentication gate.

use actix_identity::Identity;

use crate::domain::types::LoginEmail;
use crate::forms::auth::LoginForm;
use crate::services::{ServiceError, ServiceResult};

/// Capability answering whether the current visitor may book.
pub trait AuthProvider {
    fn is_authenticated(&self) -> bool;
}

impl AuthProvider for Option<Identity> {
    fn is_authenticated(&self) -> bool {
        self.as_ref().is_some_and(|identity| identity.id().is_ok())
    }
}

impl AuthProvider for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `auth` is authenticated.
pub fn ensure_authenticated<A>(auth: &A) -> ServiceResult<()>
where
    A: AuthProvider + ?Sized,
{
    if auth.is_authenticated() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Accepts any well-formed email with a non-empty password.
pub fn login(form: &LoginForm) -> ServiceResult<LoginEmail> {
    form.identity()
        .map_err(|_| ServiceError::Form("Please enter valid credentials".to_string()))
}
