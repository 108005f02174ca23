//! Serialization contract shared by every Graph model.
//!
//! Models keep no plain fields: their state lives in an [`InMemoryBackingStore`]
//! and typed accessors convert to and from the stored JSON values. Use
//! [`backed_model!`](crate::backed_model) to declare one and
//! [`polymorphic_model!`](crate::polymorphic_model) to declare a family of
//! models selected by their `@odata.type` discriminator.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{GraphError, Result};
use crate::store::{BackingStore, InMemoryBackingStore};

pub const ODATA_TYPE_KEY: &str = "@odata.type";

/// A type that can be built from a JSON node and written back as a request body.
pub trait Parsable: Sized {
    /// Build the concrete value for `node`, inspecting `@odata.type` where the
    /// type is polymorphic.
    fn create_from_discriminator_value(node: Value) -> Result<Self>;

    /// JSON form used as request content.
    fn serialize_content(&self) -> Result<Value>;
}

/// A model whose state lives in a backing store.
pub trait BackedModel {
    fn backing_store(&self) -> &InMemoryBackingStore;
    fn backing_store_mut(&mut self) -> &mut InMemoryBackingStore;
    fn from_backing_store(store: InMemoryBackingStore) -> Self;
}

/// Read `key` from the store and convert it to `T`. Null, missing and
/// mismatched values read as `None`.
pub fn read_property<T: DeserializeOwned>(store: &InMemoryBackingStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(property = key, error = %e, "stored value does not match property type");
            None
        }
    }
}

/// Write `value` under `key`; `None` records an explicit null.
pub fn write_property<T: Serialize>(store: &mut InMemoryBackingStore, key: &str, value: Option<T>) {
    let node = match value {
        None => Value::Null,
        Some(v) => match serde_json::to_value(v) {
            Ok(node) => node,
            Err(e) => {
                warn!(property = key, error = %e, "failed to convert property value");
                return;
            }
        },
    };
    store.set(key, node);
}

/// Entries whose keys are neither declared properties nor `@odata.type`.
pub fn additional_data(store: &InMemoryBackingStore, properties: &[&str]) -> Map<String, Value> {
    store
        .all_entries()
        .into_iter()
        .filter(|(k, _)| k != ODATA_TYPE_KEY && !properties.contains(&k.as_str()))
        .collect()
}

/// Load a JSON object into a fresh store. Loaded values start clean.
pub fn parse_backed<M: BackedModel>(node: Value) -> Result<M> {
    let Value::Object(map) = node else {
        return Err(GraphError::Deserialization(format!(
            "expected a JSON object, got {}",
            node_kind(&node)
        )));
    };
    let mut store = InMemoryBackingStore::new();
    store.set_initialization_completed(false);
    for (key, value) in map {
        store.set(&key, value);
    }
    store.set_initialization_completed(true);
    Ok(M::from_backing_store(store))
}

/// Changed values only, including explicit nulls for values cleared by the caller.
pub fn serialize_changes(store: &InMemoryBackingStore) -> Value {
    Value::Object(store.changed_entries().into_iter().collect())
}

/// All non-null values.
pub fn full_object(store: &InMemoryBackingStore) -> Value {
    Value::Object(
        store
            .all_entries()
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect(),
    )
}

pub fn discriminator(node: &Value) -> Option<&str> {
    node.get(ODATA_TYPE_KEY)?.as_str()
}

fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Parsable for Value {
    fn create_from_discriminator_value(node: Value) -> Result<Self> {
        Ok(node)
    }

    fn serialize_content(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

/// Declare a model backed by an [`InMemoryBackingStore`].
///
/// ```ignore
/// backed_model! {
///     /// An eDiscovery case.
///     pub struct EdiscoveryCase ["#microsoft.graph.security.ediscoveryCase"] {
///         "id" => id, set_id: String,
///         "displayName" => display_name, set_display_name: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! backed_model {
    (@odata_type) => {
        ::core::option::Option::None
    };
    (@odata_type $odata:literal) => {
        ::core::option::Option::Some($odata)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $([$odata:literal])? {
            $(
                $(#[$fmeta:meta])*
                $key:literal => $getter:ident, $setter:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name {
            backing_store: $crate::store::InMemoryBackingStore,
        }

        impl $name {
            pub const ODATA_TYPE: ::core::option::Option<&'static str> =
                $crate::backed_model!(@odata_type $($odata)?);
            pub const PROPERTIES: &'static [&'static str] = &[$($key),*];

            pub fn new() -> Self {
                let mut backing_store = $crate::store::InMemoryBackingStore::new();
                if let ::core::option::Option::Some(odata_type) = Self::ODATA_TYPE {
                    $crate::store::BackingStore::set(
                        &mut backing_store,
                        $crate::model::ODATA_TYPE_KEY,
                        $crate::__private::serde_json::Value::String(odata_type.to_string()),
                    );
                }
                Self { backing_store }
            }

            pub fn odata_type(&self) -> ::core::option::Option<::std::string::String> {
                $crate::model::read_property(&self.backing_store, $crate::model::ODATA_TYPE_KEY)
            }

            pub fn additional_data(
                &self,
            ) -> $crate::__private::serde_json::Map<::std::string::String, $crate::__private::serde_json::Value> {
                $crate::model::additional_data(&self.backing_store, Self::PROPERTIES)
            }

            pub fn set_additional_data(&mut self, key: &str, value: $crate::__private::serde_json::Value) {
                $crate::store::BackingStore::set(&mut self.backing_store, key, value);
            }

            $(
                $(#[$fmeta])*
                pub fn $getter(&self) -> ::core::option::Option<$ty> {
                    $crate::model::read_property(&self.backing_store, $key)
                }

                pub fn $setter(&mut self, value: ::core::option::Option<$ty>) {
                    $crate::model::write_property(&mut self.backing_store, $key, value);
                }
            )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::model::BackedModel for $name {
            fn backing_store(&self) -> &$crate::store::InMemoryBackingStore {
                &self.backing_store
            }

            fn backing_store_mut(&mut self) -> &mut $crate::store::InMemoryBackingStore {
                &mut self.backing_store
            }

            fn from_backing_store(backing_store: $crate::store::InMemoryBackingStore) -> Self {
                Self { backing_store }
            }
        }

        impl $crate::model::Parsable for $name {
            fn create_from_discriminator_value(
                node: $crate::__private::serde_json::Value,
            ) -> $crate::error::Result<Self> {
                $crate::model::parse_backed(node)
            }

            fn serialize_content(&self) -> $crate::error::Result<$crate::__private::serde_json::Value> {
                ::core::result::Result::Ok($crate::model::serialize_changes(&self.backing_store))
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("values", &$crate::model::full_object(&self.backing_store))
                    .finish()
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::model::full_object(&self.backing_store),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let node = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::model::Parsable>::create_from_discriminator_value(node)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

/// Declare an enum over a family of backed models keyed by `@odata.type`.
/// Unknown or missing discriminators fall back to the `base` variant.
#[macro_export]
macro_rules! polymorphic_model {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            base: $fallback:ident($base:ty),
            $(
                $(#[$vmeta:meta])*
                $variant:ident($inner:ty) = $odata:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis enum $name {
            $fallback($base),
            $(
                $(#[$vmeta])*
                $variant($inner),
            )*
        }

        impl $name {
            pub fn odata_type(&self) -> ::core::option::Option<::std::string::String> {
                match self {
                    Self::$fallback(m) => m.odata_type(),
                    $(Self::$variant(m) => m.odata_type(),)*
                }
            }
        }

        impl $crate::model::Parsable for $name {
            fn create_from_discriminator_value(
                node: $crate::__private::serde_json::Value,
            ) -> $crate::error::Result<Self> {
                let kind = $crate::model::discriminator(&node).map(str::to_owned);
                match kind.as_deref() {
                    $(
                        ::core::option::Option::Some($odata) => ::core::result::Result::Ok(Self::$variant(
                            <$inner as $crate::model::Parsable>::create_from_discriminator_value(node)?,
                        )),
                    )*
                    _ => ::core::result::Result::Ok(Self::$fallback(
                        <$base as $crate::model::Parsable>::create_from_discriminator_value(node)?,
                    )),
                }
            }

            fn serialize_content(&self) -> $crate::error::Result<$crate::__private::serde_json::Value> {
                match self {
                    Self::$fallback(m) => $crate::model::Parsable::serialize_content(m),
                    $(Self::$variant(m) => $crate::model::Parsable::serialize_content(m),)*
                }
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                match self {
                    Self::$fallback(m) => $crate::__private::serde::Serialize::serialize(m, serializer),
                    $(Self::$variant(m) => $crate::__private::serde::Serialize::serialize(m, serializer),)*
                }
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let node = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::model::Parsable>::create_from_discriminator_value(node)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

/// One page of a Graph collection.
#[derive(Debug, Clone)]
pub struct CollectionResponse<T> {
    pub value: Vec<T>,
    pub next_link: Option<String>,
    pub count: Option<i64>,
}

impl<T> Default for CollectionResponse<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
            count: None,
        }
    }
}

impl<T: Parsable> Parsable for CollectionResponse<T> {
    fn create_from_discriminator_value(node: Value) -> Result<Self> {
        let Value::Object(mut map) = node else {
            return Err(GraphError::Deserialization(format!(
                "expected a collection object, got {}",
                node_kind(&node)
            )));
        };
        let value = match map.remove("value") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(T::create_from_discriminator_value)
                .collect::<Result<Vec<_>>>()?,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(GraphError::Deserialization(format!(
                    "collection 'value' must be an array, got {}",
                    node_kind(&other)
                )));
            }
        };
        let next_link = map
            .get("@odata.nextLink")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let count = map.get("@odata.count").and_then(Value::as_i64);
        Ok(Self {
            value,
            next_link,
            count,
        })
    }

    fn serialize_content(&self) -> Result<Value> {
        let mut map = Map::new();
        let items = self
            .value
            .iter()
            .map(Parsable::serialize_content)
            .collect::<Result<Vec<_>>>()?;
        map.insert("value".into(), Value::Array(items));
        if let Some(ref link) = self.next_link {
            map.insert("@odata.nextLink".into(), Value::String(link.clone()));
        }
        if let Some(count) = self.count {
            map.insert("@odata.count".into(), Value::from(count));
        }
        Ok(Value::Object(map))
    }
}

/// OData flag enum: a set of members written as `"a,b,c"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags<T>(pub Vec<T>);

impl<T> Flags<T> {
    pub fn new(members: impl IntoIterator<Item = T>) -> Self {
        Self(members.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: PartialEq> Flags<T> {
    pub fn contains(&self, member: &T) -> bool {
        self.0.contains(member)
    }
}

impl<T> Default for Flags<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Serialize> Serialize for Flags<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut names = Vec::with_capacity(self.0.len());
        for member in &self.0 {
            match serde_json::to_value(member).map_err(serde::ser::Error::custom)? {
                Value::String(name) => names.push(name),
                other => {
                    return Err(serde::ser::Error::custom(format!(
                        "flag member must serialize as a string, got {other}"
                    )));
                }
            }
        }
        serializer.serialize_str(&names.join(","))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Flags<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                serde_json::from_value(Value::String(name.to_string()))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<std::result::Result<Vec<T>, _>>()
            .map(Flags)
    }
}

/// Scalar response bodies returned by `send_primitive`.
pub trait Primitive: Sized {
    fn from_body(body: &[u8]) -> Result<Self>;
}

fn body_text(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body)
        .map(str::trim)
        .map_err(|e| GraphError::Deserialization(format!("response is not UTF-8: {e}")))
}

macro_rules! parsed_primitive {
    ($($ty:ty),*) => {
        $(
            impl Primitive for $ty {
                fn from_body(body: &[u8]) -> Result<Self> {
                    let text = body_text(body)?;
                    text.parse().map_err(|e| {
                        GraphError::Deserialization(format!(
                            "expected {} but got '{text}': {e}",
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

parsed_primitive!(i32, i64, f64, bool);

impl Primitive for String {
    fn from_body(body: &[u8]) -> Result<Self> {
        body_text(body).map(str::to_owned)
    }
}

impl Primitive for bytes::Bytes {
    fn from_body(body: &[u8]) -> Result<Self> {
        Ok(bytes::Bytes::copy_from_slice(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    enum Colour {
        Red,
        DarkBlue,
    }

    crate::backed_model! {
        /// Test model.
        pub struct Widget ["#test.widget"] {
            "id" => id, set_id: String,
            "displayName" => display_name, set_display_name: String,
            "size" => size, set_size: i32,
            "createdDateTime" => created_date_time, set_created_date_time: DateTime<Utc>,
            "colours" => colours, set_colours: Flags<Colour>,
        }
    }

    crate::backed_model! {
        pub struct Gadget ["#test.gadget"] {
            "id" => id, set_id: String,
            "voltage" => voltage, set_voltage: f64,
        }
    }

    crate::polymorphic_model! {
        pub enum Device {
            base: Widget(Widget),
            Gadget(Gadget) = "#test.gadget",
        }
    }

    #[test]
    fn new_model_carries_odata_type_and_dirty_values() {
        let mut w = Widget::new();
        w.set_display_name(Some("first".into()));
        w.set_size(Some(3));

        assert_eq!(w.odata_type().as_deref(), Some("#test.widget"));
        let body = w.serialize_content().unwrap();
        assert_eq!(
            body,
            json!({"@odata.type": "#test.widget", "displayName": "first", "size": 3})
        );
    }

    #[test]
    fn parsed_model_serializes_only_changes() {
        let node = json!({
            "@odata.type": "#test.widget",
            "id": "w1",
            "displayName": "before",
            "size": 10,
            "extra": {"nested": true}
        });
        let mut w = Widget::create_from_discriminator_value(node).unwrap();
        assert_eq!(w.id().as_deref(), Some("w1"));
        assert_eq!(w.size(), Some(10));
        assert_eq!(w.additional_data().get("extra"), Some(&json!({"nested": true})));

        w.set_display_name(Some("after".into()));
        w.set_size(None);
        assert_eq!(
            w.serialize_content().unwrap(),
            json!({"displayName": "after", "size": null})
        );
    }

    #[test]
    fn mismatched_value_reads_as_none() {
        let w = Widget::create_from_discriminator_value(json!({"size": "large"})).unwrap();
        assert_eq!(w.size(), None);
    }

    #[test]
    fn date_time_property() {
        let w = Widget::create_from_discriminator_value(
            json!({"createdDateTime": "2024-03-01T12:30:00Z"}),
        )
        .unwrap();
        let created = w.created_date_time().unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Widget::create_from_discriminator_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn flags_round_trip_through_comma_list() {
        let w = Widget::create_from_discriminator_value(json!({"colours": "red, darkBlue"}))
            .unwrap();
        let colours = w.colours().unwrap();
        assert!(colours.contains(&Colour::Red));
        assert!(colours.contains(&Colour::DarkBlue));

        let mut fresh = Widget::new();
        fresh.set_colours(Some(Flags::new([Colour::DarkBlue, Colour::Red])));
        assert_eq!(
            fresh.serialize_content().unwrap()["colours"],
            json!("darkBlue,red")
        );
    }

    #[test]
    fn polymorphic_factory_uses_discriminator() {
        let gadget =
            Device::create_from_discriminator_value(json!({"@odata.type": "#test.gadget", "voltage": 1.5}))
                .unwrap();
        match gadget {
            Device::Gadget(g) => assert_eq!(g.voltage(), Some(1.5)),
            other => panic!("unexpected variant: {other:?}"),
        }

        let fallback =
            Device::create_from_discriminator_value(json!({"@odata.type": "#test.unknown", "id": "x"}))
                .unwrap();
        assert!(matches!(fallback, Device::Widget(_)));
        assert_eq!(fallback.odata_type().as_deref(), Some("#test.unknown"));
    }

    #[test]
    fn nested_models_deserialize_through_serde() {
        #[derive(Deserialize)]
        struct Holder {
            device: Device,
        }
        let h: Holder =
            serde_json::from_value(json!({"device": {"@odata.type": "#test.gadget", "id": "g"}}))
                .unwrap();
        assert!(matches!(h.device, Device::Gadget(_)));
    }

    #[test]
    fn collection_response_parses_links_and_items() {
        let node = json!({
            "@odata.count": 2,
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/next",
            "value": [{"id": "a"}, {"id": "b"}]
        });
        let page = CollectionResponse::<Widget>::create_from_discriminator_value(node).unwrap();
        assert_eq!(page.value.len(), 2);
        assert_eq!(page.value[1].id().as_deref(), Some("b"));
        assert_eq!(page.count, Some(2));
        assert!(page.next_link.is_some());
    }

    #[test]
    fn primitives_parse_trimmed_text() {
        assert_eq!(i64::from_body(b"42\n").unwrap(), 42);
        assert!(bool::from_body(b"true").unwrap());
        assert!(i64::from_body(b"forty").is_err());
        assert_eq!(String::from_body(b" hi ").unwrap(), "hi");
    }
}
