use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::clients::SignupClient;
use crate::domain::Field;
use crate::form::{FormState, Phase};
use crate::messages::{FormRequest, Response, Settlement, SubmitOutcome};
use crate::presentation::{render, submit_button};
use crate::transport::SignupTransport;
use crate::validation::FieldErrors;

/// The form component as an actor.
///
/// Input events and transport completions are handled one at a time on the
/// loop in [`SignupService::run`], so the state needs no locking. The network
/// call itself runs on a spawned task and reports back through `settled_rx`.
pub struct SignupService<T: SignupTransport> {
    receiver: mpsc::Receiver<FormRequest>,
    settled_tx: mpsc::UnboundedSender<Settlement>,
    settled_rx: mpsc::UnboundedReceiver<Settlement>,
    phase_tx: watch::Sender<Phase>,
    state: FormState,
    transport: Arc<T>,
    /// Bumped on every remount; settlements from older lifecycles are dropped.
    lifecycle: u64,
}

impl<T: SignupTransport> SignupService<T> {
    pub fn new(buffer_size: usize, transport: T) -> (Self, SignupClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let service = Self {
            receiver,
            settled_tx,
            settled_rx,
            phase_tx,
            state: FormState::new(),
            transport: Arc::new(transport),
            lifecycle: 0,
        };
        let client = SignupClient::new(sender, phase_rx);
        (service, client)
    }

    #[instrument(name = "signup_service", skip(self))]
    pub async fn run(mut self) {
        info!("SignupService starting");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(FormRequest::SetValue { field, value, respond_to }) => {
                        self.handle_set_value(field, value, respond_to);
                    }
                    Some(FormRequest::Blur { field, respond_to }) => {
                        self.handle_blur(field, respond_to);
                    }
                    Some(FormRequest::Submit { respond_to }) => {
                        self.handle_submit(respond_to);
                    }
                    Some(FormRequest::Snapshot { respond_to }) => {
                        let _ = respond_to.send(self.state.clone());
                    }
                    Some(FormRequest::Render { respond_to }) => {
                        let _ = respond_to.send(render(&self.state));
                    }
                    Some(FormRequest::Remount { respond_to }) => {
                        self.handle_remount(respond_to);
                    }
                    Some(FormRequest::Shutdown) | None => {
                        info!("SignupService shutting down");
                        break;
                    }
                },
                Some(settlement) = self.settled_rx.recv() => {
                    self.handle_settlement(settlement);
                }
            }
        }

        info!("SignupService stopped");
    }

    /// Values are never recorded; password fields go through here too.
    #[instrument(fields(field = %field), skip(self, value, respond_to))]
    fn handle_set_value(&mut self, field: Field, value: String, respond_to: Response<FieldErrors>) {
        debug!("Processing set_value request");
        self.state.set_value(field, value);
        let _ = respond_to.send(self.state.errors().clone());
    }

    #[instrument(fields(field = %field), skip(self, respond_to))]
    fn handle_blur(&mut self, field: Field, respond_to: Response<FieldErrors>) {
        debug!("Processing blur request");
        self.state.blur(field);
        if let Some(error) = self.state.visible_error(field) {
            debug!(error, "Field invalid");
        }
        let _ = respond_to.send(self.state.errors().clone());
    }

    #[instrument(fields(lifecycle = self.lifecycle), skip(self, respond_to))]
    fn handle_submit(&mut self, respond_to: Response<SubmitOutcome>) {
        debug!("Processing submit request");

        if submit_button(&self.state).disabled {
            debug!("Submit control disabled, ignoring");
            let _ = respond_to.send(SubmitOutcome::Ignored);
            return;
        }

        let payload = match self.state.begin_submit() {
            Ok(payload) => payload,
            Err(errors) => {
                warn!(error_count = errors.len(), "Signup blocked by validation");
                let _ = respond_to.send(SubmitOutcome::Rejected(errors));
                return;
            }
        };
        self.publish_phase();

        let transport = Arc::clone(&self.transport);
        let settled_tx = self.settled_tx.clone();
        let lifecycle = self.lifecycle;
        tokio::spawn(
            async move {
                let result = transport.submit(payload).await;
                // Nobody to tell if the service has already stopped.
                let _ = settled_tx.send(Settlement { lifecycle, result });
            }
            .in_current_span(),
        );

        info!("Signup submitted");
        let _ = respond_to.send(SubmitOutcome::Accepted);
    }

    #[instrument(fields(lifecycle = settlement.lifecycle), skip(self, settlement))]
    fn handle_settlement(&mut self, settlement: Settlement) {
        if settlement.lifecycle != self.lifecycle {
            debug!(current = self.lifecycle, "Dropping settlement from a discarded form");
            return;
        }

        let succeeded = match &settlement.result {
            Ok(receipt) => {
                info!(status = receipt.status, response = %describe_body(&receipt.body), "Signup accepted");
                true
            }
            Err(e) => {
                error!(error = %e, "Signup submission failed");
                false
            }
        };

        self.state.settle(succeeded);
        self.publish_phase();
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remount(&mut self, respond_to: Response<()>) {
        self.lifecycle += 1;
        self.state = FormState::new();
        self.publish_phase();
        info!(lifecycle = self.lifecycle, "Form remounted");
        let _ = respond_to.send(());
    }

    fn publish_phase(&self) {
        self.phase_tx.send_replace(self.state.phase());
    }
}

/// JSON bodies are logged compacted, anything else verbatim.
fn describe_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_body() {
        assert_eq!(describe_body("{ \"id\" : 7 }"), "{\"id\":7}");
        assert_eq!(describe_body("created"), "created");
    }
}
