/// Classification of a pricing failure.
///
/// Used by the estimate service to pick the user-facing code and by the HTTP
/// layer to pick a status code.
///
/// | Class | Typical cause |
/// |-------|---------------|
/// | `Input` | Missing or invalid gem attribute reported by the upstream |
/// | `Authentication` | Invalid, expired or missing upstream credentials |
/// | `Upstream` | Upstream 5xx or an unclassified non-2xx answer |
/// | `Transport` | Connection refused, DNS failure, TLS failure |
/// | `Timeout` | Upstream did not answer within the client timeout |
/// | `Malformed` | Response body could not be decoded |
/// | `NotConfigured` | Provider has no base URL or API key |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    Input,
    Authentication,
    Upstream,
    Transport,
    Timeout,
    Malformed,
    NotConfigured,
}

impl FailureClass {
    /// Classify a structured upstream error from its HTTP status and code.
    pub fn from_upstream(status: u16, code: Option<&str>) -> Self {
        if let Some(code) = code {
            if is_auth_code(code) {
                return Self::Authentication;
            }
            if code.starts_with("no_") || code.starts_with("invalid_") {
                return Self::Input;
            }
            if code == "server_error" {
                return Self::Upstream;
            }
        }

        match status {
            401 | 403 => Self::Authentication,
            400 | 404 | 422 => Self::Input,
            _ => Self::Upstream,
        }
    }
}

fn is_auth_code(code: &str) -> bool {
    matches!(
        code,
        "user_unauthenticated" | "invalid_api_key" | "expired_api_key" | "invalid_token"
    )
}
