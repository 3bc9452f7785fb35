use tokio::sync::oneshot;

use crate::domain::Field;
use crate::error::{SignupError, TransportError};
use crate::form::FormState;
use crate::presentation::RenderedForm;
use crate::transport::TransportReceipt;
use crate::validation::FieldErrors;

/// Reply channel carried by every request.
pub type Response<T> = oneshot::Sender<T>;

/// What happened to a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record was valid; the call is now in flight.
    Accepted,
    /// Record was invalid; nothing was sent.
    Rejected(FieldErrors),
    /// The submit control was disabled.
    Ignored,
}

impl SubmitOutcome {
    /// `Ok(true)` once the call is in flight, `Ok(false)` if the press was
    /// ignored, and the field errors if the record was invalid.
    pub fn into_result(self) -> Result<bool, SignupError> {
        match self {
            SubmitOutcome::Accepted => Ok(true),
            SubmitOutcome::Ignored => Ok(false),
            SubmitOutcome::Rejected(errors) => Err(errors.into()),
        }
    }
}

/// Input events and queries delivered to the form service.
#[derive(Debug)]
pub enum FormRequest {
    SetValue {
        field: Field,
        value: String,
        respond_to: Response<FieldErrors>,
    },
    Blur {
        field: Field,
        respond_to: Response<FieldErrors>,
    },
    Submit {
        respond_to: Response<SubmitOutcome>,
    },
    Snapshot {
        respond_to: Response<FormState>,
    },
    Render {
        respond_to: Response<RenderedForm>,
    },
    Remount {
        respond_to: Response<()>,
    },
    Shutdown,
}

/// Completion of a transport call, tagged with the render lifecycle that
/// started it.
#[derive(Debug)]
pub struct Settlement {
    pub lifecycle: u64,
    pub result: Result<TransportReceipt, TransportError>,
}
