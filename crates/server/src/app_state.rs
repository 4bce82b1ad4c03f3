use std::sync::Arc;

use actions::{Dispatcher, PollAction};
use storage::CorrelationStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dispatcher: Arc<Dispatcher<PollAction>>,
    pub(crate) store: Arc<CorrelationStore>,
}

impl AppState {
    pub(crate) fn new(store: CorrelationStore) -> Self {
        let store = Arc::new(store);
        let dispatcher = Arc::new(Dispatcher::new(PollAction::new(), Arc::clone(&store)));
        Self { dispatcher, store }
    }
}
