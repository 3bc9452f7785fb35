mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod form;
mod messages;
mod presentation;
mod signup_actor;
mod transport;
mod validation;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, SignupSystem};
use crate::config::SignupConfig;
use crate::domain::SignupForm;
use crate::validation::validate;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting signup form");

    let config = SignupConfig::default();
    let system = SignupSystem::new(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("signup");
    async {
        let form = SignupForm::new("Jo", "Doe", "jo@doe.com", "secret1", "secret1");
        let errors = validate(&form);
        if !errors.is_empty() {
            warn!(%errors, "Sample record is invalid");
        }
        system.client.fill(&form).await?;

        if system.client.submit().await?.into_result()? {
            info!("Waiting for the endpoint");
        } else {
            warn!("Submit control was disabled");
        }
        info!("{}", system.client.render().await?);

        system.client.wait_until_idle().await?;
        info!("{}", system.client.render().await?);
        Ok::<_, crate::error::SignupError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| {
        error!(error = %e, "Signup flow failed");
        e.to_string()
    })?;

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Signup form closed");
    Ok(())
}
