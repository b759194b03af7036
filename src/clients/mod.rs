pub mod azure;
pub mod flexible;
pub mod mock;

pub use azure::*;
pub use flexible::*;
pub use mock::*;
