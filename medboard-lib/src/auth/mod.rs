//! Authentication
//!
//! Login protocols live in the backend; this module only carries the bearer
//! token and the persisted session slice.

mod session;
mod token;

pub use session::AuthSlice;
pub use session::SessionHandle;
pub use session::SessionUser;
pub use token::AccessToken;
pub use token::NoToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
