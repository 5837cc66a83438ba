//! External service integrations.

pub mod netsuite_client {
    pub use crate::netsuite_client::*;
}

pub mod signer {
    pub use crate::signer::*;
}
