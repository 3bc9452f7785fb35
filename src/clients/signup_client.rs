use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{Field, SignupForm};
use crate::error::SignupError;
use crate::form::{FormState, Phase};
use crate::messages::{FormRequest, SubmitOutcome};
use crate::presentation::RenderedForm;
use crate::validation::FieldErrors;

/// Client for interacting with the form service. Cheap to clone.
#[derive(Clone)]
pub struct SignupClient {
    sender: mpsc::Sender<FormRequest>,
    phase: watch::Receiver<Phase>,
}

impl SignupClient {
    pub fn new(sender: mpsc::Sender<FormRequest>, phase: watch::Receiver<Phase>) -> Self {
        Self { sender, phase }
    }

    /// Follows `Idle`/`Submitting` transitions.
    pub fn phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Waits until no submission is in flight.
    #[instrument(skip(self))]
    pub async fn wait_until_idle(&self) -> Result<(), SignupError> {
        let mut phase = self.phase();
        phase
            .wait_for(|phase| *phase == Phase::Idle)
            .await
            .map(|_| ())
            .map_err(|_| SignupError::ActorCommunication("Actor dropped".to_string()))
    }

    /// Types a whole record into the form, field by field, leaving each one
    /// as a user tabbing through would.
    #[instrument(skip_all)]
    pub async fn fill(&self, form: &SignupForm) -> Result<FieldErrors, SignupError> {
        let mut errors = FieldErrors::default();
        for field in Field::ALL {
            self.set_value(field, form.get(field).to_string()).await?;
            errors = self.blur(field).await?;
        }
        Ok(errors)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), SignupError> {
        debug!("Sending request");
        self.sender
            .send(FormRequest::Shutdown)
            .await
            .map_err(|_| SignupError::ActorCommunication("Actor closed".to_string()))
    }
}

client_method!(SignupClient => fn set_value(field: Field, value: String) -> FieldErrors as FormRequest::SetValue);
client_method!(SignupClient => fn blur(field: Field) -> FieldErrors as FormRequest::Blur);
client_method!(SignupClient => fn submit() -> SubmitOutcome as FormRequest::Submit);
client_method!(SignupClient => fn snapshot() -> FormState as FormRequest::Snapshot);
client_method!(SignupClient => fn render() -> RenderedForm as FormRequest::Render);
client_method!(SignupClient => fn remount() -> () as FormRequest::Remount);
