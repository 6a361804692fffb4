pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod naming;
pub mod session;
pub mod vault;

pub use errors::{LockboxError, Result};
pub use naming::canonicalize;
pub use session::{Session, SessionGuard};
pub use vault::{detect_legacy, migrate, Secret, SecretSet, Store};
