use crate::quickinput::InputValidation;
use once_cell::sync::Lazy;
use regex::Regex;

static HTTP_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("scheme pattern is a valid regex"));

/// Placeholder shown in the add-domain prompt
pub const ADD_DOMAIN_PLACEHOLDER: &str = "https://www.microsoft.com";

/// Message shown while the add-domain input is flagged
pub const ADD_DOMAIN_VALIDATION_MESSAGE: &str =
    "Trusted domains usually start with http:// or https://";

/// Flag input that does not look like an http(s) URL
///
/// Flagged input is not rejected here; the flow decides.
pub fn validate_domain_input(text: &str) -> InputValidation {
    let text = text.trim();
    if HTTP_SCHEME.is_match(text) {
        InputValidation::accepted(text)
    } else {
        InputValidation::flagged()
    }
}
