//! Converter lookup and caching.
//!
//! [`ConverterRegistry::resolve`] finds the converter for a [`ValueType`] by
//! trying, in order:
//!
//! 1. the built-in primitive converters, including nullable primitives;
//! 2. explicit registrations (only [`Visibility::Public`] ones are honored);
//! 3. structural rules: enums, URIs, other nullable types, and named types
//!    that inherit a converter from their base type;
//! 4. [`DefaultConverter`], which only passes strings through.
//!
//! Resolved converters are cached per registry. Invalidation replaces the
//! cache and bumps its generation; a resolution that started before an
//! invalidation is retried rather than inserted into the new cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use horizon_values_core::logging::targets;
use horizon_values_core::{ConnectionId, PerfSpan, Signal};
use parking_lot::RwLock;

use crate::converter::{DefaultConverter, TypeConverter};
use crate::converters::{self, EnumConverter, NullableConverter, UriConverter, primitive};
use crate::error::Result;
use crate::refresh;
use crate::value::{Value, ValueType};

/// Who may see a registered converter.
///
/// Only public registrations take part in resolution; the others are
/// reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

/// Builds a converter instance on demand.
pub type ConverterFactory = Arc<dyn Fn() -> Arc<dyn TypeConverter> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    visibility: Visibility,
    factory: ConverterFactory,
}

#[derive(Default)]
struct CacheState {
    generation: u64,
    entries: HashMap<ValueType, Arc<dyn TypeConverter>>,
}

/// Resolves and caches converters by value type.
pub struct ConverterRegistry {
    registrations: RwLock<HashMap<ValueType, Registration>>,
    cache: RwLock<CacheState>,
    handle_refresh: AtomicBool,
}

impl ConverterRegistry {
    /// A registry with the built-in domain converters registered.
    pub fn new() -> Self {
        let registry = Self::empty();
        converters::register_builtin(&registry);
        registry
    }

    /// A registry without explicit registrations. Primitive, enum and URI
    /// types still resolve.
    pub fn empty() -> Self {
        Self {
            registrations: RwLock::new(HashMap::new()),
            cache: RwLock::new(CacheState::default()),
            handle_refresh: AtomicBool::new(true),
        }
    }

    /// The process-wide registry, subscribed to
    /// [`refresh::type_descriptions_changed`].
    pub fn global() -> &'static Arc<ConverterRegistry> {
        static GLOBAL: OnceLock<Arc<ConverterRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = Arc::new(ConverterRegistry::new());
            registry.attach_refresh(refresh::type_descriptions_changed());
            registry
        })
    }

    /// Register a converter factory for `ty`, replacing any previous one.
    pub fn register<F>(&self, ty: ValueType, visibility: Visibility, factory: F)
    where
        F: Fn() -> Arc<dyn TypeConverter> + Send + Sync + 'static,
    {
        tracing::debug!(target: targets::REGISTRY, %ty, ?visibility, "converter registered");
        self.registrations.write().insert(
            ty,
            Registration {
                visibility,
                factory: Arc::new(factory),
            },
        );
        self.invalidate_all();
    }

    /// Register a shared converter instance publicly.
    pub fn register_converter(&self, ty: ValueType, converter: Arc<dyn TypeConverter>) {
        self.register(ty, Visibility::Public, move || Arc::clone(&converter));
    }

    /// Remove the registration for `ty`. Returns true if there was one.
    pub fn unregister(&self, ty: &ValueType) -> bool {
        let removed = self.registrations.write().remove(ty).is_some();
        if removed {
            self.invalidate_all();
        }
        removed
    }

    /// Returns true if `ty` has an explicit registration of any visibility.
    pub fn is_registered(&self, ty: &ValueType) -> bool {
        self.registrations.read().contains_key(ty)
    }

    /// The converter for `ty`. Never fails; unknown types get
    /// [`DefaultConverter`].
    pub fn resolve(&self, ty: &ValueType) -> Arc<dyn TypeConverter> {
        loop {
            let generation = {
                let cache = self.cache.read();
                if let Some(converter) = cache.entries.get(ty) {
                    return Arc::clone(converter);
                }
                cache.generation
            };

            let converter = self.build(ty);

            let mut cache = self.cache.write();
            if cache.generation != generation {
                tracing::trace!(target: targets::REGISTRY, %ty, "cache invalidated during resolve, retrying");
                continue;
            }
            return Arc::clone(cache.entries.entry(ty.clone()).or_insert(converter));
        }
    }

    /// Drop every cached converter.
    pub fn invalidate_all(&self) {
        let mut cache = self.cache.write();
        let dropped = cache.entries.len();
        cache.generation = cache.generation.wrapping_add(1);
        cache.entries = HashMap::new();
        tracing::debug!(
            target: targets::REGISTRY,
            generation = cache.generation,
            dropped,
            "converter cache invalidated"
        );
    }

    /// Number of cached converters.
    pub fn cached_count(&self) -> usize {
        self.cache.read().entries.len()
    }

    /// Whether refresh notifications clear the cache.
    pub fn handle_refresh(&self) -> bool {
        self.handle_refresh.load(Ordering::Acquire)
    }

    /// Make refresh notifications clear the cache, or be ignored.
    pub fn set_handle_refresh(&self, handle: bool) {
        self.handle_refresh.store(handle, Ordering::Release);
    }

    /// Clear the cache whenever `signal` fires, as long as this registry is
    /// alive and handles refreshes.
    pub fn attach_refresh(self: &Arc<Self>, signal: &Signal<()>) -> ConnectionId {
        let weak: Weak<Self> = Arc::downgrade(self);
        signal.connect(move |_| {
            if let Some(registry) = weak.upgrade() {
                registry.on_refresh();
            }
        })
    }

    fn on_refresh(&self) {
        if self.handle_refresh() {
            self.invalidate_all();
        } else {
            tracing::trace!(target: targets::REGISTRY, "refresh ignored");
        }
    }

    /// Drop user registrations and the cache; the built-in registrations are
    /// restored.
    pub fn reset(&self) {
        self.registrations.write().clear();
        converters::register_builtin(self);
        self.invalidate_all();
    }

    /// Parse `text` as a value of `ty` with the current culture.
    pub fn convert_from_string(&self, ty: &ValueType, text: &str) -> Result<Value> {
        self.resolve(ty).convert_from_string(text)
    }

    /// Format `value` with the converter for its own type.
    pub fn convert_to_string(&self, value: &Value) -> Result<String> {
        match value.value_type() {
            Some(ty) => self.resolve(&ty).convert_to_string(value),
            None => Ok(String::new()),
        }
    }

    fn build(&self, ty: &ValueType) -> Arc<dyn TypeConverter> {
        let _span = PerfSpan::new("registry::build");
        self.build_specific(ty).unwrap_or_else(|| {
            tracing::trace!(target: targets::REGISTRY, %ty, tier = 4, "using default converter");
            Arc::new(DefaultConverter)
        })
    }

    /// Tiers one to three.
    fn build_specific(&self, ty: &ValueType) -> Option<Arc<dyn TypeConverter>> {
        if let Some(converter) = primitive::converter_for(ty) {
            tracing::trace!(target: targets::REGISTRY, %ty, tier = 1, "primitive converter");
            return Some(converter);
        }

        if let Some(converter) = self.registered(ty) {
            tracing::trace!(target: targets::REGISTRY, %ty, tier = 2, "registered converter");
            return Some(converter);
        }

        let converter: Arc<dyn TypeConverter> = match ty {
            ValueType::Enum(enum_type) => Arc::new(EnumConverter::new(*enum_type)),
            ValueType::Uri => Arc::new(UriConverter),
            ValueType::Nullable(inner) => {
                Arc::new(NullableConverter::new((**inner).clone(), self.resolve(inner)))
            }
            ValueType::Named { .. } => {
                let mut base = ty.base();
                while let Some(current) = base {
                    if let Some(converter) = self.build_specific(current) {
                        tracing::trace!(target: targets::REGISTRY, %ty, base = %current, tier = 3, "inherited converter");
                        return Some(converter);
                    }
                    base = current.base();
                }
                return None;
            }
            _ => return None,
        };
        tracing::trace!(target: targets::REGISTRY, %ty, tier = 3, converter = converter.name(), "structural converter");
        Some(converter)
    }

    fn registered(&self, ty: &ValueType) -> Option<Arc<dyn TypeConverter>> {
        let registration = self.registrations.read().get(ty).cloned()?;
        if registration.visibility != Visibility::Public {
            tracing::warn!(
                target: targets::REGISTRY,
                %ty,
                visibility = ?registration.visibility,
                "ignoring converter registration that is not public"
            );
            return None;
        }
        Some((registration.factory)())
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.read();
        f.debug_struct("ConverterRegistry")
            .field("registrations", &self.registrations.read().len())
            .field("cached", &cache.entries.len())
            .field("generation", &cache.generation)
            .field("handle_refresh", &self.handle_refresh())
            .finish()
    }
}

static_assertions::assert_impl_all!(ConverterRegistry: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_resolve_is_cached() {
        let registry = ConverterRegistry::new();
        let first = registry.resolve(&ValueType::Color);
        let second = registry.resolve(&ValueType::Color);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached_count(), 1);
    }

    #[test]
    fn test_invalidate_produces_fresh_instances() {
        let registry = ConverterRegistry::new();
        let before = registry.resolve(&ValueType::Color);
        registry.invalidate_all();
        assert_eq!(registry.cached_count(), 0);
        let after = registry.resolve(&ValueType::Color);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_tiers() {
        let registry = ConverterRegistry::new();
        assert_eq!(registry.resolve(&ValueType::I32).name(), "Int32Converter");
        assert_eq!(registry.resolve(&ValueType::Color).name(), "ColorConverter");
        assert_eq!(registry.resolve(&ValueType::Uri).name(), "UriConverter");
        assert_eq!(
            registry.resolve(&ValueType::named("Opacity", Some(ValueType::F64))).name(),
            "DoubleConverter"
        );
        assert_eq!(registry.resolve(&ValueType::named("Widget", None)).name(), "DefaultConverter");
    }

    #[test]
    fn test_non_public_registration_falls_through() {
        let registry = ConverterRegistry::empty();
        registry.register(ValueType::Color, Visibility::Internal, || {
            Arc::new(crate::converters::ColorConverter::new())
        });
        assert!(registry.is_registered(&ValueType::Color));
        assert_eq!(registry.resolve(&ValueType::Color).name(), "DefaultConverter");
    }

    #[test]
    fn test_refresh_handling() {
        let registry = Arc::new(ConverterRegistry::new());
        let signal = Signal::<()>::new();
        registry.attach_refresh(&signal);

        registry.resolve(&ValueType::Key);
        signal.emit(());
        assert_eq!(registry.cached_count(), 0);

        registry.set_handle_refresh(false);
        registry.resolve(&ValueType::Key);
        signal.emit(());
        assert_eq!(registry.cached_count(), 1);
    }

    #[test]
    fn test_reset_restores_builtins() {
        let registry = ConverterRegistry::new();
        registry.unregister(&ValueType::Color);
        assert_eq!(registry.resolve(&ValueType::Color).name(), "DefaultConverter");
        registry.reset();
        let color = registry
            .convert_from_string(&ValueType::Color, "Red")
            .unwrap();
        assert_eq!(color.as_color().map(Color::argb), Some(0xFFFF0000));
    }
}
