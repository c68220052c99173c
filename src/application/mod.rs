//! Application layer orchestrating the payment hand-off.
//!
//! `PaymentDispatcher` builds the pay link, asks the host whether anything can
//! open it, and either launches a chooser or notifies the user. Responses from
//! the chosen app are routed back through `ResultRegistry`.

pub mod dispatcher;
pub mod registry;
