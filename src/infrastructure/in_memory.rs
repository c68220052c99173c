use crate::domain::ports::{CorrelationToken, IntentResolver, UserNotifier};
use crate::error::{Result, UpiError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// One call made to [`IntentResolver::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    pub uri: Url,
    pub chooser_title: String,
    pub token: CorrelationToken,
}

/// A host that lives entirely in memory.
///
/// Whether a UPI handler is "installed" is fixed at construction. Every
/// dispatch is recorded instead of launching anything. Clones share the record.
#[derive(Default, Clone)]
pub struct InMemoryIntentResolver {
    handler_installed: bool,
    fail_dispatch: bool,
    dispatches: Arc<RwLock<Vec<DispatchRecord>>>,
}

impl InMemoryIntentResolver {
    /// Creates a host on which a UPI app is installed.
    pub fn with_handler() -> Self {
        Self {
            handler_installed: true,
            ..Self::default()
        }
    }

    /// Creates a host with no UPI app installed.
    pub fn without_handler() -> Self {
        Self::default()
    }

    /// Makes every dispatch fail with [`UpiError::Host`].
    pub fn failing_dispatch(mut self) -> Self {
        self.fail_dispatch = true;
        self
    }

    /// Returns every dispatch made so far, oldest first.
    pub async fn dispatches(&self) -> Vec<DispatchRecord> {
        self.dispatches.read().await.clone()
    }
}

#[async_trait]
impl IntentResolver for InMemoryIntentResolver {
    async fn has_handler(&self, _uri: &Url) -> Result<bool> {
        Ok(self.handler_installed)
    }

    async fn dispatch(
        &self,
        uri: &Url,
        chooser_title: &str,
        token: CorrelationToken,
    ) -> Result<()> {
        if self.fail_dispatch {
            return Err(UpiError::Host("dispatch rejected".to_string()));
        }
        let mut dispatches = self.dispatches.write().await;
        dispatches.push(DispatchRecord {
            uri: uri.clone(),
            chooser_title: chooser_title.to_string(),
            token,
        });
        Ok(())
    }
}

/// Collects user notifications instead of showing them.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<RwLock<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message shown so far, oldest first.
    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl UserNotifier for RecordingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.write().await.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolver_records_dispatches() {
        let resolver = InMemoryIntentResolver::with_handler();
        let uri = Url::parse("upi://pay?pa=a&cu=INR").unwrap();

        assert!(resolver.has_handler(&uri).await.unwrap());
        resolver
            .dispatch(&uri, "Pay Using", CorrelationToken::PAYMENT)
            .await
            .unwrap();

        let shared = resolver.clone();
        let dispatches = shared.dispatches().await;
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].uri, uri);
    }

    #[tokio::test]
    async fn test_resolver_without_handler() {
        let resolver = InMemoryIntentResolver::without_handler();
        let uri = Url::parse("upi://pay").unwrap();
        assert!(!resolver.has_handler(&uri).await.unwrap());
    }

    #[tokio::test]
    async fn test_notifier_records_messages() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first").await;
        notifier.notify("second").await;
        assert_eq!(notifier.messages().await, vec!["first", "second"]);
    }
}
