//! Static-secret authorization and password hashing.
//!
//! There are no sessions or users here: admin calls carry a token that must
//! equal `ADMIN_TOKEN`, bot calls carry `Authorization: Bearer <BOT_SECRET>`.

pub mod errors;
pub mod gate;
pub mod password;

pub use errors::GateError;
pub use gate::AuthGate;
pub use password::PasswordHasher;
