#[cfg(feature = "async-tokio")]
mod async_tokio;
mod issuer;
mod lock;
mod state;
mod status;

pub use issuer::*;
pub use lock::*;
pub use status::*;
