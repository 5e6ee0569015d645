use std::path::PathBuf;

use chrono::Utc;

use crate::{config::Config, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    config: Config,
    token: Token,
}

impl TokenManager {
    pub fn new(config: &Config, token: Token) -> Self {
        TokenManager {
            config: config.clone(),
            token,
        }
    }

    pub async fn load(config: &Config) -> Result<Self, String> {
        let content = async_fs::read_to_string(config.token_path())
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(config, token))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = self.token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when
    /// it is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let new_token = spotify::auth::refresh_token(&self.config, &self.token.refresh_token)
                .await
                .map_err(|e| e.to_string())?;
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path(&self) -> PathBuf {
        self.config.token_path()
    }
}
