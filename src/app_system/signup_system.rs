use tracing::{error, info};

use crate::clients::SignupClient;
use crate::config::SignupConfig;
use crate::error::SignupError;
use crate::signup_actor::SignupService;
use crate::transport::{HttpTransport, SignupTransport};

/// Starts the form service and owns its task.
pub struct SignupSystem {
    pub client: SignupClient,
    handle: tokio::task::JoinHandle<()>,
}

impl SignupSystem {
    /// Wires the form to the HTTP endpoint named in `config`.
    pub fn new(config: &SignupConfig) -> Result<Self, SignupError> {
        let transport = HttpTransport::new(config)?;
        info!(endpoint = %transport.endpoint(), "Starting signup system");
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<T: SignupTransport>(config: &SignupConfig, transport: T) -> Self {
        let (service, client) = SignupService::new(config.buffer_size.max(1), transport);
        let handle = tokio::spawn(service.run());
        Self { client, handle }
    }

    pub async fn shutdown(self) -> Result<(), SignupError> {
        info!("Shutting down system...");

        // Other clones of the client may still be alive, so ask explicitly
        // rather than relying on the channel closing.
        if let Err(e) = self.client.shutdown().await {
            info!(error = %e, "Service already stopped");
        }
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(SignupError::ActorCommunication(format!("Actor task failed: {:?}", e)));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
