pub mod error;
pub mod handlers;
pub mod phone;
pub mod profile;
pub mod response;

pub use self::error::AuthError;
pub use self::handlers::{HandlerConfig, LoginHandler, SignupHandler};
pub use self::response::ApiGatewayResponse;
