pub mod payment_request;
pub mod payment_response;
pub mod ports;
