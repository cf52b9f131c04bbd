//! Per-process session state.
//!
//! Shared by every view, mutated only by explicit user actions (login,
//! account switch, wallet switch, language change). The text pack is
//! copy-on-replace: readers hold an `Arc` snapshot.

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::domain::{Account, Wallet};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub mod notifications;
pub mod storage;
pub mod textpack;

pub use notifications::{Category, Channel, NotificationSettings};
pub use storage::ClientStorage;
pub use textpack::TextPack;

pub struct Session {
    api: Arc<ApiClient>,
    config: Config,
    storage: ClientStorage,
    pub token: Option<String>,
    pub tokens: Vec<String>,
    pub account: Option<Account>,
    pub language: String,
    text_pack: Arc<TextPack>,
    pub wallets: Vec<Wallet>,
    pub current_wallet: Option<Wallet>,
}

impl Session {
    pub fn new(api: Arc<ApiClient>, config: Config, storage: ClientStorage) -> Self {
        Session {
            api,
            config,
            storage,
            token: None,
            tokens: Vec::new(),
            account: None,
            language: "en".to_string(),
            text_pack: Arc::new(TextPack::default()),
            wallets: Vec::new(),
            current_wallet: None,
        }
    }

    /// Load persisted state and resolve the account.
    ///
    /// An `Unauthorized` or `NotFound` while holding a stale token clears
    /// the token and leaves the session logged out without raising; the
    /// caller routes to registration/login when `account` stays `None`.
    pub async fn init(&mut self) -> Result<(), AppError> {
        self.token = self.storage.token();
        self.tokens = self.storage.tokens();
        if let Some(language) = self.storage.language() {
            self.language = language;
        }
        if let Some(pack) = self.storage.text_pack() {
            self.text_pack = Arc::new(TextPack::new(pack));
        }
        self.api.set_token(self.token.clone());

        if self.token.is_none() {
            return Ok(());
        }
        match self.api.account_get().await {
            Ok(account) => {
                self.account = Some(account);
                self.load_wallets().await?;
                Ok(())
            }
            Err(ApiError::Unauthorized) | Err(ApiError::NotFound) => {
                warn!("stale token, clearing");
                self.clear_token()?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Log in, persist the token and resolve the account.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AppError> {
        let token = self.api.session_create(username, password).await?;
        self.adopt_token(token)?;
        self.account = Some(self.api.account_get().await?);
        self.load_wallets().await?;
        Ok(())
    }

    fn adopt_token(&mut self, token: String) -> Result<(), AppError> {
        self.storage.set_token(Some(&token))?;
        if !self.tokens.contains(&token) {
            self.tokens.push(token.clone());
            self.storage.set_tokens(&self.tokens)?;
        }
        self.api.set_token(Some(token.clone()));
        self.token = Some(token);
        Ok(())
    }

    /// Clear the token (stored as an explicit null) and drop account state.
    pub fn clear_token(&mut self) -> Result<(), AppError> {
        self.storage.set_token(None)?;
        self.api.set_token(None);
        self.token = None;
        self.account = None;
        self.wallets.clear();
        self.current_wallet = None;
        Ok(())
    }

    /// Append a token for account switching, bounded by `max_accounts`.
    pub fn add_account(&mut self, token: String) -> Result<(), AppError> {
        if self.tokens.len() >= self.config.max_accounts {
            return Err(AppError::Validation(format!(
                "at most {} accounts",
                self.config.max_accounts
            )));
        }
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
            self.storage.set_tokens(&self.tokens)?;
        }
        Ok(())
    }

    /// Swap the active token to another stored account.
    pub async fn change_account(&mut self, token: &str) -> Result<(), AppError> {
        if !self.tokens.iter().any(|t| t == token) {
            return Err(AppError::Validation("unknown account token".to_string()));
        }
        self.storage.set_token(Some(token))?;
        self.api.set_token(Some(token.to_string()));
        self.token = Some(token.to_string());
        self.account = Some(self.api.account_get().await?);
        self.load_wallets().await?;
        Ok(())
    }

    /// Fetch wallets; an empty list gets a wallet named "Default" created
    /// before continuing. The current wallet is restored by persisted id.
    pub async fn load_wallets(&mut self) -> Result<(), AppError> {
        let mut wallets = self.api.wallet_list().await?;
        if wallets.is_empty() {
            info!("no wallets, creating Default");
            let wallet = self.api.wallet_create("Default").await?;
            wallets.push(wallet);
        }
        let persisted = self.storage.current_wallet();
        self.current_wallet = wallets
            .iter()
            .find(|w| Some(w.id) == persisted)
            .or_else(|| wallets.first())
            .cloned();
        self.wallets = wallets;
        Ok(())
    }

    /// Switch the active wallet and persist the choice.
    pub fn set_current_wallet(&mut self, id: i64) -> Result<(), AppError> {
        let wallet = self
            .wallets
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| AppError::Validation("unknown wallet".to_string()))?;
        self.storage.set_current_wallet(Some(id))?;
        self.current_wallet = Some(wallet);
        Ok(())
    }

    /// Change language: fetch the new pack, swap it atomically, persist.
    pub async fn set_language(&mut self, language: &str) -> Result<(), AppError> {
        let pack = self.api.text_pack_get(language).await?;
        self.storage.set_language(language)?;
        self.storage.set_text_pack(&pack)?;
        self.language = language.to_string();
        self.text_pack = Arc::new(TextPack::new(pack));
        Ok(())
    }

    /// Snapshot of the current text pack for view-lifetime reads.
    pub fn text_pack(&self) -> Arc<TextPack> {
        Arc::clone(&self.text_pack)
    }

    /// Localized text lookup with the `"404 <key>"` sentinel.
    pub fn gtv(&self, key: &str) -> String {
        self.text_pack.gtv(key)
    }

    pub fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests();
        let api = Arc::new(ApiClient::from_config(&config));
        let storage = ClientStorage::open(dir.path().join("client.json")).unwrap();
        (dir, Session::new(api, config, storage))
    }

    #[test]
    fn test_gtv_sentinel_before_pack_load() {
        let (_dir, session) = session();
        assert_eq!(session.gtv("anything"), "404 anything");
    }

    #[test]
    fn test_add_account_bounded() {
        let (_dir, mut session) = session();
        for i in 0..3 {
            session.add_account(format!("t{}", i)).unwrap();
        }
        assert!(matches!(
            session.add_account("t3".to_string()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_add_account_dedup() {
        let (_dir, mut session) = session();
        session.add_account("t".to_string()).unwrap();
        session.add_account("t".to_string()).unwrap();
        assert_eq!(session.tokens.len(), 1);
    }

    #[test]
    fn test_clear_token_resets_state() {
        let (_dir, mut session) = session();
        session.token = Some("t".to_string());
        session.wallets.push(Wallet {
            id: 1,
            name: "Default".to_string(),
            value: 0,
            value_banned: 0,
            value_can_minus: 0,
            commission_pack_id: 1,
        });
        session.clear_token().unwrap();
        assert_eq!(session.token, None);
        assert!(session.wallets.is_empty());
        assert!(session.current_wallet.is_none());
    }

    #[tokio::test]
    async fn test_init_without_token_stays_logged_out() {
        let (_dir, mut session) = session();
        session.init().await.unwrap();
        assert!(session.account.is_none());
        assert!(session.token.is_none());
    }
}
