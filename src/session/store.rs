use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store is unavailable: {0}")]
    Unavailable(String),
}

/// The single persistent slot holding the bearer token.
///
/// Tokens are written whole and removed whole; nothing edits one in place.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn read(&self) -> Result<Option<String>, StoreError>;
    async fn write(&self, token: &str) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.read().await.clone())
    }

    async fn write(&self, token: &str) -> Result<(), StoreError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read().await.expect("read"), None);

        store.write("a.b.c").await.expect("write");
        assert_eq!(store.read().await.expect("read").as_deref(), Some("a.b.c"));

        store.write("d.e.f").await.expect("write");
        assert_eq!(store.read().await.expect("read").as_deref(), Some("d.e.f"));

        store.clear().await.expect("clear");
        assert_eq!(store.read().await.expect("read"), None);
    }
}
