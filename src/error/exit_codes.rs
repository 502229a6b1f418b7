use crate::error::AdoptError;

pub fn get_exit_code(error: &AdoptError) -> i32 {
    match error {
        AdoptError::InvalidParameter { .. }
        | AdoptError::ConfigError(_)
        | AdoptError::UnsupportedApiVersion(_) => 2,

        AdoptError::TransportFailure { .. } | AdoptError::MalformedResponse { .. } => 20,

        AdoptError::RateLimitExceeded { .. } => 75, // EX_TEMPFAIL

        AdoptError::Io(_) => 1,
    }
}
