use crate::application::registry::{PendingPayment, ResultRegistry};
use crate::domain::payment_request::PaymentRequest;
use crate::domain::ports::{CorrelationToken, IntentResolverBox, UserNotifierBox};
use crate::error::Result;

pub const DEFAULT_CHOOSER_TITLE: &str = "Pay Using";
pub const NO_HANDLER_MESSAGE: &str = "No UPI app found, please install one to continue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Label shown on the host's application chooser.
    pub chooser_title: String,
    pub correlation_token: CorrelationToken,
    /// Shown to the user when no installed app can open the link.
    pub no_handler_message: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            correlation_token: CorrelationToken::PAYMENT,
            no_handler_message: NO_HANDLER_MESSAGE.to_string(),
        }
    }
}

/// What happened to a payment hand-off.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A UPI app chooser was launched. The handle resolves once the host
    /// delivers the app's response through the [`ResultRegistry`].
    Dispatched(PendingPayment),
    /// Nothing installed can open `upi://` links; the user has been told.
    NoHandler,
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Turns payment requests into `upi://pay` links and hands them to the host.
pub struct PaymentDispatcher {
    resolver: IntentResolverBox,
    notifier: UserNotifierBox,
    registry: ResultRegistry,
    config: DispatcherConfig,
}

impl PaymentDispatcher {
    /// Creates a dispatcher with the default chooser title and token `101`.
    ///
    /// # Arguments
    ///
    /// * `resolver` - The host's resolution and launch facility.
    /// * `notifier` - Where the "no UPI app" message goes.
    pub fn new(resolver: IntentResolverBox, notifier: UserNotifierBox) -> Self {
        Self::with_config(resolver, notifier, DispatcherConfig::default())
    }

    /// Creates a dispatcher with an explicit chooser title, token and message.
    pub fn with_config(
        resolver: IntentResolverBox,
        notifier: UserNotifierBox,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            resolver,
            notifier,
            registry: ResultRegistry::new(),
            config,
        }
    }

    /// The registry the host delivers payment responses to.
    pub fn registry(&self) -> ResultRegistry {
        self.registry.clone()
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Builds the pay link for the given fields and launches a UPI app
    /// chooser, or tells the user no UPI app is installed.
    ///
    /// The inputs are not validated. A missing handler is reported through
    /// the notifier and [`DispatchOutcome::NoHandler`], never as an `Err`;
    /// errors only come from the host adapters themselves.
    pub async fn initiate_payment(
        &self,
        amount: &str,
        note: &str,
        payee_name: &str,
        payee_address: &str,
    ) -> Result<DispatchOutcome> {
        self.initiate(&PaymentRequest::new(amount, note, payee_name, payee_address))
            .await
    }

    /// Same as [`PaymentDispatcher::initiate_payment`], for an already built request.
    pub async fn initiate(&self, request: &PaymentRequest) -> Result<DispatchOutcome> {
        let uri = request.to_uri()?;

        if !self.resolver.has_handler(&uri).await? {
            tracing::warn!(%uri, "no application can handle payment link");
            self.notifier.notify(&self.config.no_handler_message).await;
            return Ok(DispatchOutcome::NoHandler);
        }

        let token = self.config.correlation_token;
        let pending = self.registry.register(token).await;
        if let Err(e) = self
            .resolver
            .dispatch(&uri, &self.config.chooser_title, token)
            .await
        {
            self.registry.cancel(&pending).await;
            return Err(e);
        }

        tracing::info!(%uri, %token, "payment chooser dispatched");
        Ok(DispatchOutcome::Dispatched(pending))
    }
}
