use board_core::{StorageError, TokenStore, parse_token};

const TOKEN_KEY: &str = "board_token";

/// Токен в `localStorage` браузера.
pub(crate) struct LocalStorageTokenStore;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("window is not available".to_string()))?;
    window
        .local_storage()
        .map_err(|_| StorageError::Unavailable("failed to access localStorage".to_string()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        let storage = local_storage().ok()?;
        let raw = storage.get_item(TOKEN_KEY).ok()??;
        parse_token(&raw)
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| StorageError::Write("failed to save token".to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| StorageError::Write("failed to clear token".to_string()))
    }
}
