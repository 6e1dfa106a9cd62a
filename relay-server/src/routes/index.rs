//! Root endpoint.

pub const WELCOME_MESSAGE: &str = "Welcome to the Google App Engine Real-Time Analytics Application!";

/// GET / - Static welcome text, independent of configuration
pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}
