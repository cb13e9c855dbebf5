pub mod login;
pub use self::login::LoginHandler;

pub mod signup;
pub use self::signup::SignupHandler;

#[cfg(test)]
mod test_support;

use crate::customer::phone::DEFAULT_COUNTRY_CODE;
use secrecy::SecretString;

/// Settings shared by both handlers.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    country_code: String,
    verbose_errors: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            verbose_errors: true,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    #[must_use]
    pub const fn with_verbose_errors(mut self, verbose_errors: bool) -> Self {
        self.verbose_errors = verbose_errors;
        self
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Whether raw collaborator error text is echoed to callers.
    #[must_use]
    pub const fn verbose_errors(&self) -> bool {
        self.verbose_errors
    }
}

// empty strings count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn present_secret(value: Option<String>) -> Option<SecretString> {
    present(value).map(SecretString::from)
}
