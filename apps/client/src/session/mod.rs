//! Session state: where the token lives, how it is read, and the local
//! authentication check built on top of it.

pub mod guard;
pub mod storage;
pub mod token;

pub use guard::SessionGuard;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
pub use token::{Claims, TokenStore, TOKEN_KEY};
