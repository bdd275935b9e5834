//! tsreflect_registry: the consumer-facing reflection registry.
//!
//! Holds the metadata keys the transformer writes under, the runtime
//! value model, the metadata store, the `Reflective` marker, and the
//! query API consumers use after declarations have evaluated.

pub mod store;
pub mod value;

pub use store::MetadataStore;
pub use value::{ClassHandle, Environment, FunctionValue, NativeFunction, TargetKey, Value};

use indexmap::IndexMap;
use tsreflect_descriptors::PropertyKey;

/// Metadata key for class and property type descriptors.
pub const TYPE_METADATA_KEY: &str = "tsreflect:type";
/// Metadata key for the per-parent direct-subclass list.
pub const SUBCLASS_METADATA_KEY: &str = "tsreflect:subtypes";
/// Metadata key for the per-class shorthand-property aggregate.
pub const SHORTHAND_PROPERTIES_METADATA_KEY: &str = "tsreflect:shorthand-properties";

/// The well-known property that nominally marks a decorator as
/// reflective. The marker value itself does nothing at runtime.
pub const REFLECTIVE_MARKER_KEY: &str = "__is_reflective_decorator";

/// The marker value: a no-op tag carrying the well-known property. At
/// the boundary the decorator is a callable; since applying it does
/// nothing, a plain property-bearing object stands in for it here and
/// the evaluator never invokes bare identifier decorators.
pub fn reflective_marker<'a>() -> Value<'a> {
    let mut properties = IndexMap::new();
    properties.insert(REFLECTIVE_MARKER_KEY.to_string(), Value::Bool(true));
    Value::Object(properties)
}

/// Whether a value carries the reflective marker property.
pub fn is_reflective_marker(value: &Value<'_>) -> bool {
    value
        .as_object()
        .and_then(|properties| properties.get(REFLECTIVE_MARKER_KEY))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// The canonical string form of a property key, shared by the store
/// writers and the lookup API so numeric keys round-trip.
pub fn property_key_text(key: &PropertyKey) -> String {
    match key {
        PropertyKey::String(name) => name.clone(),
        PropertyKey::Number(value) => number_key_text(*value),
    }
}

/// Canonical string form of a numeric key (integral values print without
/// a fractional part).
pub fn number_key_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// The type descriptor attached to a class, if it was processed.
pub fn get_type<'s, 'a>(store: &'s MetadataStore<'a>, class: &ClassHandle) -> Option<&'s Value<'a>> {
    store.get_own_metadata(TYPE_METADATA_KEY, class, None)
}

/// The type descriptor of a property, by (class, property key).
///
/// Falls back to the class's own shorthand aggregate. The aggregate is
/// keyed per class with no inheritance merge, yet this fallback consults
/// it unconditionally; a shorthand property of a reflective parent is
/// therefore invisible when queried through a non-reflective subclass.
/// That asymmetry is preserved deliberately rather than resolved here.
pub fn get_prop_type<'s, 'a>(
    store: &'s MetadataStore<'a>,
    class: &ClassHandle,
    key: &PropertyKey,
) -> Option<&'s Value<'a>> {
    let property = property_key_text(key);
    store
        .get_own_metadata(TYPE_METADATA_KEY, class, Some(&property))
        .or_else(|| {
            store
                .get_own_metadata(SHORTHAND_PROPERTIES_METADATA_KEY, class, None)
                .and_then(Value::as_object)
                .and_then(|aggregate| aggregate.get(&property))
        })
}

/// The direct subclasses registered under a class, in registration order.
pub fn get_subclasses(store: &MetadataStore<'_>, class: &ClassHandle) -> Option<Vec<ClassHandle>> {
    let list = store.get_own_metadata(SUBCLASS_METADATA_KEY, class, None)?;
    Some(
        list.as_array()
            .unwrap_or(&[])
            .iter()
            .filter_map(|entry| entry.as_class().cloned())
            .collect(),
    )
}

/// All leaf subclasses of a class, depth-first over the registry.
/// A registered class with no registered subclasses of its own counts
/// as a leaf, including one that was never otherwise processed.
pub fn get_all_leaf_subclasses(store: &MetadataStore<'_>, class: &ClassHandle) -> Vec<ClassHandle> {
    let subclasses = get_subclasses(store, class).unwrap_or_default();

    subclasses
        .into_iter()
        .flat_map(|subclass| {
            let leaves = get_all_leaf_subclasses(store, &subclass);
            if leaves.is_empty() {
                vec![subclass]
            } else {
                leaves
            }
        })
        .collect()
}
