//! User-facing messages for upstream and local error codes.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Shown when neither the code nor the upstream message is usable.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error.";

lazy_static! {
    static ref ERROR_MESSAGES: HashMap<&'static str, &'static str> = HashMap::from([
        // Gem guide: authentication
        ("user_unauthenticated", "The gem pricing service rejected our credentials. Please try again later."),
        ("invalid_api_key", "The gem pricing service API key is invalid."),
        ("expired_api_key", "The gem pricing service API key has expired."),
        ("invalid_token", "The gem pricing service rejected our access token."),
        // Gem guide: request attributes
        ("no_weight_provided", "Please enter the carat weight of the gemstone."),
        ("invalid_weight", "Weights must be positive numbers."),
        ("no_shape_provided", "Please select the diamond's cut."),
        ("invalid_shape", "That diamond cut is not recognised."),
        ("no_color_provided", "Please select the diamond's color grade."),
        ("invalid_color", "That diamond color grade is not recognised."),
        ("no_clarity_provided", "Please select the diamond's clarity grade."),
        ("invalid_clarity", "That diamond clarity grade is not recognised."),
        ("invalid_gem_type", "That gemstone type is not in the price guide."),
        ("price_not_found", "No price is listed for that combination of attributes."),
        ("server_error", "The pricing service is having trouble right now. Please try again later."),
        // Local failures
        ("gem_service_unreachable", "Could not reach the gem pricing service."),
        ("metal_service_unreachable", "Could not reach the metal pricing service."),
        ("upstream_timeout", "A pricing service took too long to respond. Please try again."),
        ("malformed_upstream_response", "A pricing service returned an unexpected response."),
        ("gem_service_not_configured", "Gem pricing is not configured on this server."),
        ("metal_service_not_configured", "Metal pricing is not configured on this server."),
        ("unsupported_metal", "That metal cannot be priced."),
        ("invalid_request_body", "The request could not be read. Please check your inputs."),
        ("value_out_of_range", "The weight or price is too large to estimate. Please check your inputs."),
    ]);
}

/// Translate an error code into a message for the end user.
///
/// Known codes map to a fixed message. Unknown or absent codes fall back to
/// the raw upstream message, then to [`UNKNOWN_ERROR_MESSAGE`].
pub fn human_message(code: Option<&str>, raw_message: Option<&str>) -> String {
    code.and_then(|c| ERROR_MESSAGES.get(c))
        .map(|m| m.to_string())
        .or_else(|| {
            raw_message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}
