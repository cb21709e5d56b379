use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Default, Clone, Debug, FromRow, Serialize, Deserialize)]
pub struct ApiKey {
    pub name: String,
    pub key: String,
    pub blocked: bool,
}

impl ApiKey {
    pub fn new(name: &str) -> Self {
        use base64::Engine;
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let key: Vec<u8> = (0..24).map(|_| rng.gen::<u8>()).collect();
        let key = base64::prelude::BASE64_URL_SAFE.encode(key);
        Self {
            name: name.into(),
            key,
            blocked: false,
        }
    }
}
