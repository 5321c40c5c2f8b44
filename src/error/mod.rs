mod appdock;
mod transient;

pub use appdock::{ApiErrorBody, ApiErrorObject, AppdockError};
pub use transient::{Transient, is_transient_message};
