mod authorize;
mod callback;
mod exchange;
mod refresh;
mod service;

pub use authorize::{AUTHORIZE_PATH, BeginAuthorizationCommand};
pub use callback::CallbackCommand;
pub use exchange::{TokenExchanger, classify};
pub use refresh::{NO_REFRESH_TOKEN, REFRESH_TOKEN_NOT_STRING, RefreshTokenCommand};
pub use service::{OAuthClientSettings, OAuthCommandService};
