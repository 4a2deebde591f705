use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    InvalidField { field: &'static str, expected: &'static str },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    NotFound(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl ApplicationError {
    /// Message for the single-field `{error}` response body. Persistence and
    /// availability details stay in the logs; clients get a terse line.
    pub fn client_message(&self) -> String {
        match self {
            Self::Domain(error) => error.to_string(),
            Self::NotFound(message) => message.clone(),
            Self::Persistence(_) => "Failed to create order".to_string(),
            Self::Unavailable(_) => {
                "The catalog is temporarily unavailable. Please retry shortly.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn domain_errors_surface_their_own_message() {
        let error = ApplicationError::from(DomainError::MissingField("phone"));
        assert_eq!(error.client_message(), "missing required field `phone`");
        assert_eq!(error.to_string(), "missing required field `phone`");
    }

    #[test]
    fn invalid_field_names_the_expected_shape() {
        let error = DomainError::InvalidField { field: "pizzas", expected: "an array" };
        assert_eq!(error.to_string(), "field `pizzas` must be an array");
    }

    #[test]
    fn not_found_passes_its_message_through() {
        let error = ApplicationError::NotFound("Product not found".to_string());
        assert_eq!(error.client_message(), "Product not found");
    }

    #[test]
    fn persistence_failures_have_a_client_safe_message() {
        let error = ApplicationError::Persistence("disk full".to_string());
        assert_eq!(error.client_message(), "Failed to create order");
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn unavailable_catalog_has_a_client_safe_message() {
        let error = ApplicationError::Unavailable("db.json: permission denied".to_string());
        assert!(error.client_message().contains("temporarily unavailable"));
        assert!(error.to_string().contains("permission denied"));
    }
}
