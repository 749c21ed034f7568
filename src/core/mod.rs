pub mod error;
pub mod types;

pub use error::{PasteError, Result};
pub use types::{EncodedContent, Paste, PasteId};
