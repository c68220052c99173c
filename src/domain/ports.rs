use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// Tag that matches a result coming back from the host to the request that
/// caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationToken(pub u32);

impl CorrelationToken {
    pub const PAYMENT: Self = Self(101);
}

impl Default for CorrelationToken {
    fn default() -> Self {
        Self::PAYMENT
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host's application resolution and launch facility.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Whether at least one installed application can open `uri`.
    async fn has_handler(&self, uri: &Url) -> Result<bool>;
    /// Presents a chooser titled `chooser_title` and launches the pick.
    async fn dispatch(
        &self,
        uri: &Url,
        chooser_title: &str,
        token: CorrelationToken,
    ) -> Result<()>;
}

/// Briefly shows a message to the user. Fire and forget.
#[async_trait]
pub trait UserNotifier: Send + Sync {
    async fn notify(&self, message: &str);
}

pub type IntentResolverBox = Box<dyn IntentResolver>;
pub type UserNotifierBox = Box<dyn UserNotifier>;
