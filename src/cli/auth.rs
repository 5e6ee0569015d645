use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, error, spotify, success, types::PkceToken};

pub async fn auth(config: Config, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(Arc::new(config), shared_state).await {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
