//! # Mock Framework
//!
//! Utilities for testing the form service without a network.
//!
//! Use [`create_mock_transport`] to get a transport and a receiver. Hand the
//! transport to the service, then use [`expect_submission`] to take the next
//! outbound call and answer it with whatever the test needs.

use tokio::sync::{mpsc, oneshot};

use crate::domain::SignupPayload;
use crate::error::TransportError;
use crate::transport::{SignupTransport, TransportReceipt};

pub type Reply = oneshot::Sender<Result<TransportReceipt, TransportError>>;

/// A transport whose calls arrive on a channel the test controls.
///
/// Each call waits until the test answers it, which lets tests observe the
/// form while the request is in flight.
#[derive(Clone)]
pub struct MockTransport {
    sender: mpsc::Sender<(SignupPayload, Reply)>,
}

impl SignupTransport for MockTransport {
    async fn submit(&self, payload: SignupPayload) -> Result<TransportReceipt, TransportError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send((payload, reply))
            .await
            .map_err(|_| TransportError::Network("mock endpoint closed".to_string()))?;
        response
            .await
            .map_err(|_| TransportError::Network("mock endpoint hung up".to_string()))?
    }
}

pub fn create_mock_transport(buffer_size: usize) -> (MockTransport, mpsc::Receiver<(SignupPayload, Reply)>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockTransport { sender }, receiver)
}

/// Takes the next outbound call, if one is made.
pub async fn expect_submission(receiver: &mut mpsc::Receiver<(SignupPayload, Reply)>) -> Option<(SignupPayload, Reply)> {
    receiver.recv().await
}

pub fn created() -> Result<TransportReceipt, TransportError> {
    Ok(TransportReceipt { status: 201, body: r#"{"status":"created"}"#.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignupForm;

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(4);

        let call = tokio::spawn(async move {
            let payload = SignupForm::new("Jo", "Doe", "jo@doe.com", "pw", "pw").to_payload();
            transport.submit(payload).await
        });

        let (payload, reply) = expect_submission(&mut receiver).await.expect("Expected a submission");
        assert_eq!(payload.first_name, "Jo");
        reply.send(created()).unwrap();

        assert_eq!(call.await.unwrap().unwrap().status, 201);
    }
}
