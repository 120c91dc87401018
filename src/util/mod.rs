//! Small helpers shared by the news client and the UI.
//!
//! - **URL validation**: endpoint and browser-open checks
//! - **Text**: width-aware truncation and sanitizing remote text

mod text;
mod url_validator;

pub use text::{display_width, single_line, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_endpoint, validate_url_for_open, UrlValidationError};
