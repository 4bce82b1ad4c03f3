//! Interaction routing for chat-platform actions.
//!
//! A feature implements [`InteractionHandler`]; a [`Dispatcher`] decides
//! whether an inbound interaction belongs to it, runs the handler, and
//! records the request/response pair in the shared correlation store.

pub mod custom_id;
pub mod dispatch;
pub mod poll;
pub mod routing;

pub use custom_id::{CustomId, InvalidCustomId};
pub use dispatch::{DispatchError, Dispatcher, HandleError, InteractionHandler};
pub use poll::PollAction;
