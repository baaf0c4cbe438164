use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ExecuteError;
use crate::models::{Action, ActionKind, Outcome, Prediction};

/// Read-only inputs handed to an executor for one subscription. Outcomes are
/// always sorted ascending by index. `correlation` carries the token written
/// by the create step; it is only populated on update events.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionInput<'a> {
    pub prediction_id: &'a str,
    pub prediction: &'a Prediction,
    pub outcomes: &'a [Outcome],
    pub correlation: Option<&'a str>,
}

/// One external effect per action kind. Implementations recover expected
/// failures (transport, missing referenced data) as [`ExecuteError`] values
/// rather than panicking; the `Some` result is a correlation token the
/// dispatcher persists after a create event.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    fn kind(&self) -> ActionKind;

    async fn on_create(
        &self,
        action: &Action,
        input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError>;

    async fn on_update(
        &self,
        action: &Action,
        input: &ExecutionInput<'_>,
    ) -> Result<Option<String>, ExecuteError>;
}

/// Kind-to-executor registration map, fixed at dispatcher construction.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<ActionKind, Arc<dyn ActionExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executors.insert(executor.kind(), executor);
        self
    }

    pub fn get(&self, kind: ActionKind) -> Option<&Arc<dyn ActionExecutor>> {
        self.executors.get(&kind)
    }

    /// The kinds a registered executor exists for. Applied to the
    /// subscription query up front, so intentionally-ignored kinds never
    /// surface as handler errors.
    pub fn eligible_kinds(&self) -> Vec<ActionKind> {
        self.executors.keys().copied().collect()
    }
}
