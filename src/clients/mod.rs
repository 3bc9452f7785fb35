//! Handles through which callers talk to the form service.

/// Generates a client method that sends a request carrying a oneshot reply
/// channel and waits for the answer. A closed channel on either side becomes
/// `SignupError::ActorCommunication`.
///
/// Spans skip all arguments: field values may be passwords.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        #[allow(dead_code)]
        impl $client {
            #[tracing::instrument(skip_all)]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, crate::error::SignupError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| crate::error::SignupError::ActorCommunication("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| crate::error::SignupError::ActorCommunication("Actor dropped".to_string()))
            }
        }
    };
}

pub mod signup_client;

pub use signup_client::*;
