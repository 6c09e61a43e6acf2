//! Named UI actions and the handlers registered against them.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{form::FormState, handler::TriggerResult};

/// Action name the order sync trigger is registered under.
pub const SYNC_ORDERS_ACTION: &str = "sync_amazon_orders";

#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, form: &FormState) -> TriggerResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("action '{0}' is already registered")]
    Duplicate(String),
    #[error("no handler registered for action '{0}'")]
    UnknownAction(String),
}

#[derive(Default, Clone)]
pub struct ActionRegistry {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        debug!(action = %name, "registered action handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    pub async fn dispatch(
        &self,
        name: &str,
        form: &FormState,
    ) -> Result<TriggerResult, RegistryError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAction(name.to_string()))?;
        debug!(action = name, "dispatching action");
        Ok(handler.handle(form).await)
    }

    pub fn actions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
