pub mod serve;

use std::fmt;

/// Which Lambda function this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Signup,
    Login,
}

impl Function {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Signup => "customer_signup",
            Self::Login => "customer_login",
        }
    }

    #[must_use]
    pub const fn about(self) -> &'static str {
        match self {
            Self::Signup => "Register customers by mobile number",
            Self::Login => "Authenticate customers by mobile number and password",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub enum Action {
    Serve(serve::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Serve(args) => serve::execute(args).await,
        }
    }
}
