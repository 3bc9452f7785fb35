//! The single outbound call carrying a signup to the remote endpoint.

pub mod http;

pub use http::HttpTransport;

use std::future::Future;

use crate::domain::SignupPayload;
use crate::error::TransportError;

/// What a successful call brought back. The body is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReceipt {
    pub status: u16,
    pub body: String,
}

/// Sends one signup. Implementations make exactly one request per call and
/// never retry.
pub trait SignupTransport: Send + Sync + 'static {
    fn submit(
        &self,
        payload: SignupPayload,
    ) -> impl Future<Output = Result<TransportReceipt, TransportError>> + Send;
}
