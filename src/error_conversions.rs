//! Error conversion glue between the form and service layers.

use crate::forms::FormError;
use crate::services::ServiceError;

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Search(err) => ServiceError::Form(err.to_string()),
            other => ServiceError::Form(other.to_string()),
        }
    }
}
