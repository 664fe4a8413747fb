//! Core domain types: the error taxonomy and model family value object.

pub mod error;
pub mod model;

pub use error::{ClassifiedError, ErrorKind};
pub use model::ModelFamily;
