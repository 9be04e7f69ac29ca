mod claims;
mod session;
mod token;

pub use claims::SessionClaims;
pub use session::{Session, SessionStore};
pub use token::decode_claims;
