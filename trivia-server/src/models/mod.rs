//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod question;
pub mod pagination;
pub mod lenient;

pub use validation::ValidationError;
pub use category::{Category, DEFAULT_CATEGORIES};
pub use question::{NewQuestion, Question};
pub use pagination::{Pagination, PaginationParams};
