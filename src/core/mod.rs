// Domain-layer modules and shared errors/models
pub mod prospect {
    pub use crate::prospect::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
