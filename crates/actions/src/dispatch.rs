//! Routes one interaction through a feature handler and records the result.
//!
//! An interaction moves through `received -> matched -> handled -> recorded`
//! before its response is returned, or short-circuits to "no response" when
//! it is unmatched or the handler does not recognise its kind. Only a
//! malformed envelope is reported to the caller as an error.

use std::sync::Arc;

use shared::{
    domain::{InteractionId, InteractionType},
    protocol::{ActionMetadata, InteractionEnvelope, InteractionResponse, RoutePattern},
};
use storage::CorrelationStore;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{custom_id::InvalidCustomId, routing};

/// One feature's business logic behind a set of route patterns.
pub trait InteractionHandler: Send + Sync {
    fn supported_interactions(&self) -> Vec<RoutePattern>;

    fn metadata(&self) -> ActionMetadata;

    fn handle(&self, envelope: &InteractionEnvelope) -> Result<InteractionResponse, HandleError>;
}

#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidCustomId),
    #[error("no handler for {interaction_type} `{candidate}`")]
    UnhandledKind {
        interaction_type: InteractionType,
        candidate: String,
    },
    #[error("malformed interaction: {0}")]
    Malformed(String),
}

impl HandleError {
    pub fn unhandled(envelope: &InteractionEnvelope) -> Self {
        Self::UnhandledKind {
            interaction_type: envelope.interaction_type(),
            candidate: envelope.candidate().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed interaction {id}: {reason}")]
    MalformedEnvelope { id: InteractionId, reason: String },
}

pub struct Dispatcher<H> {
    handler: H,
    patterns: Vec<RoutePattern>,
    store: Arc<CorrelationStore>,
}

impl<H: InteractionHandler> Dispatcher<H> {
    /// Captures the handler's route patterns once; they are not re-read.
    pub fn new(handler: H, store: Arc<CorrelationStore>) -> Self {
        let patterns = handler.supported_interactions();
        Self {
            handler,
            patterns,
            store,
        }
    }

    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    pub fn store(&self) -> &Arc<CorrelationStore> {
        &self.store
    }

    pub fn metadata(&self) -> ActionMetadata {
        self.handler.metadata()
    }

    #[instrument(
        skip(self, envelope),
        fields(
            interaction_id = %envelope.id,
            interaction_type = %envelope.interaction_type(),
        )
    )]
    pub fn dispatch(
        &self,
        envelope: InteractionEnvelope,
    ) -> Result<Option<InteractionResponse>, DispatchError> {
        if !routing::matches(&envelope, &self.patterns) {
            debug!(candidate = envelope.candidate(), "interaction not routed here");
            return Ok(None);
        }
        debug!("interaction matched");

        let response = match self.handler.handle(&envelope) {
            Ok(response) => response,
            Err(HandleError::Malformed(reason)) => {
                warn!(%reason, "rejecting malformed interaction");
                return Err(DispatchError::MalformedEnvelope {
                    id: envelope.id,
                    reason,
                });
            }
            Err(error) => {
                warn!(%error, "interaction produced no response");
                return Ok(None);
            }
        };
        debug!("interaction handled");

        self.store.record(envelope, response.clone());
        Ok(Some(response))
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
