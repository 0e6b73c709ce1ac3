pub mod grant;
pub mod outcome;

pub use grant::{GrantKind, TokenGrant};
pub use outcome::TokenExchangeOutcome;
