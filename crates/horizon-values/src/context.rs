//! Ambient information passed to converters.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::types::CommandTable;

/// Where a conversion happens: the document base URI, the commands in scope,
/// and any other services a converter may look up by type.
#[derive(Clone, Default)]
pub struct ConversionContext {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    base_uri: Option<Url>,
    commands: Option<Arc<CommandTable>>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URI relative references resolve against.
    pub fn with_base_uri(mut self, base_uri: Url) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Set the commands looked up before the standard ones.
    pub fn with_commands(mut self, commands: impl Into<Arc<CommandTable>>) -> Self {
        self.commands = Some(commands.into());
        self
    }

    /// Add a service, replacing any previous one of the same type.
    pub fn with_service<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.insert_service(service);
        self
    }

    /// Add a service in place.
    pub fn insert_service<T: Any + Send + Sync>(&mut self, service: T) {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
    }

    /// Look a service up by type.
    pub fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    pub fn base_uri(&self) -> Option<&Url> {
        self.base_uri.as_ref()
    }

    pub fn commands(&self) -> Option<&CommandTable> {
        self.commands.as_deref()
    }
}

impl fmt::Debug for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionContext")
            .field("services", &self.services.len())
            .field("base_uri", &self.base_uri.as_ref().map(Url::as_str))
            .field("commands", &self.commands.as_ref().map(|table| table.len()))
            .finish()
    }
}

static_assertions::assert_impl_all!(ConversionContext: Send, Sync);
