use serde::{Deserialize, Serialize};

pub mod companies;
pub mod jobs;

pub use companies::*;
pub use jobs::*;

#[derive(Default, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub healthy: bool,
    pub db: bool,
}
