use crate::domain::payment_response::PaymentResponse;
use crate::domain::ports::CorrelationToken;
use crate::error::{Result, UpiError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};

/// Routes payment responses back to whoever is waiting on a correlation token.
///
/// Clones share the same table, so the host side can hold one to call
/// [`ResultRegistry::deliver`] while the dispatcher registers waiters.
#[derive(Default, Clone)]
pub struct ResultRegistry {
    waiters: Arc<Mutex<Waiters>>,
}

#[derive(Default)]
struct Waiters {
    next_id: u64,
    by_token: HashMap<CorrelationToken, Waiter>,
}

/// A registered waiter. `id` tells apart registrations sharing a token.
struct Waiter {
    id: u64,
    sender: oneshot::Sender<PaymentResponse>,
}

impl ResultRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a waiter for `token`. A waiter already registered under the
    /// same token is dropped and its [`PendingPayment::wait`] fails.
    pub async fn register(&self, token: CorrelationToken) -> PendingPayment {
        let (sender, receiver) = oneshot::channel();
        let mut waiters = self.waiters.lock().await;
        let id = waiters.next_id;
        waiters.next_id += 1;
        if waiters.by_token.insert(token, Waiter { id, sender }).is_some() {
            tracing::debug!(%token, "replaced pending payment waiter");
        }
        PendingPayment {
            token,
            id,
            receiver,
        }
    }

    /// Hands `response` to the waiter for `token`.
    ///
    /// Returns `false` when nobody is waiting, or the waiter already gave up.
    pub async fn deliver(&self, token: CorrelationToken, response: PaymentResponse) -> bool {
        let waiter = self.waiters.lock().await.by_token.remove(&token);
        match waiter {
            Some(waiter) => waiter.sender.send(response).is_ok(),
            None => {
                tracing::warn!(%token, "payment response with no pending request");
                false
            }
        }
    }

    /// Drops the waiter behind `pending`.
    ///
    /// A later registration under the same token is left alone; returns
    /// `false` when the stored waiter is not the one `pending` came from.
    pub async fn cancel(&self, pending: &PendingPayment) -> bool {
        let mut waiters = self.waiters.lock().await;
        match waiters.by_token.get(&pending.token) {
            Some(waiter) if waiter.id == pending.id => {
                waiters.by_token.remove(&pending.token);
                true
            }
            _ => false,
        }
    }

    /// Number of tokens with a waiter still registered.
    pub async fn pending_count(&self) -> usize {
        self.waiters.lock().await.by_token.len()
    }
}

/// Handle to the response of a dispatched payment.
#[derive(Debug)]
pub struct PendingPayment {
    token: CorrelationToken,
    id: u64,
    receiver: oneshot::Receiver<PaymentResponse>,
}

impl PendingPayment {
    /// The token the host will deliver this payment's response on.
    pub fn token(&self) -> CorrelationToken {
        self.token
    }

    /// Waits for the UPI application's response. There is no timeout.
    pub async fn wait(self) -> Result<PaymentResponse> {
        self.receiver
            .await
            .map_err(|_| UpiError::ResultChannelClosed)
    }
}
