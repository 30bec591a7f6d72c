//! # Component Interface
//!
//! The boundary between a UI framework and the snapshot engine. A framework
//! exposes its tree by implementing [`Component`], which lowers a node to
//! [`RawValue`]: plain data that may still contain nested components and
//! framework-specific scalars. Nothing here is canonical yet; that is the job
//! of [`crate::normalize`].
//!
//! [`Element`] is a small generic node (`type` + `namespace` + `props`) that
//! covers HTML-like component libraries and is what the tests build trees with.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A node of a UI tree that can be snapshot-tested.
pub trait Component: fmt::Debug + Send + Sync {
    /// Converts the node to raw serializable data.
    fn to_raw(&self) -> RawValue;
}

/// A framework scalar with no direct JSON form (dates, identifiers, ...).
///
/// These are resolved by a [`crate::encode::ScalarEncoder`] during normalization.
pub trait CustomScalar: fmt::Debug + Send + Sync {
    /// Name used in error messages when no encoder claims the value.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Raw data produced by [`Component::to_raw`].
#[derive(Debug, Clone)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
    /// Fixed-size group; encodes exactly like a list.
    Tuple(Vec<RawValue>),
    /// String-keyed entries in framework order. A repeated key keeps the last value.
    Map(Vec<(String, RawValue)>),
    Component(Arc<dyn Component>),
    Custom(Arc<dyn CustomScalar>),
}

impl RawValue {
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        RawValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        V: Into<RawValue>,
        I: IntoIterator<Item = V>,
    {
        RawValue::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn custom<S: CustomScalar + 'static>(scalar: S) -> Self {
        RawValue::Custom(Arc::new(scalar))
    }
}

macro_rules! raw_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for RawValue {
                fn from(value: $ty) -> Self {
                    RawValue::$variant(<$cast>::from(value))
                }
            }
        )*
    };
}

raw_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
    &str => Str as String,
}

impl From<usize> for RawValue {
    fn from(value: usize) -> Self {
        RawValue::UInt(value as u64)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

impl From<Element> for RawValue {
    fn from(element: Element) -> Self {
        RawValue::Component(Arc::new(element))
    }
}

macro_rules! custom_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl CustomScalar for $ty {
                fn type_name(&self) -> &'static str {
                    $name
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }

            impl From<$ty> for RawValue {
                fn from(value: $ty) -> Self {
                    RawValue::custom(value)
                }
            }
        )*
    };
}

custom_scalar! {
    uuid::Uuid => "Uuid",
    chrono::NaiveDate => "NaiveDate",
    chrono::NaiveDateTime => "NaiveDateTime",
    chrono::DateTime<chrono::Utc> => "DateTime<Utc>",
    chrono::DateTime<chrono::FixedOffset> => "DateTime<FixedOffset>",
}

/// Generic declarative node: `{type, namespace, props}`.
///
/// ```rust
/// # use ui_snapshot_engine::component::Element;
/// let tree = Element::new("Div")
///     .prop("id", "test-id")
///     .children(vec![Element::new("P").children(vec!["wow!"])]);
/// # let _ = tree;
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    type_name: String,
    namespace: Option<String>,
    props: Vec<(String, RawValue)>,
}

impl Element {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: None,
            props: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets a prop, replacing an earlier value for the same name.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.props.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.props.push((name, value)),
        }
        self
    }

    pub fn children(self, children: impl Into<RawValue>) -> Self {
        self.prop("children", children)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl Component for Element {
    fn to_raw(&self) -> RawValue {
        let mut entries = vec![
            ("type".to_string(), RawValue::Str(self.type_name.clone())),
            ("props".to_string(), RawValue::Map(self.props.clone())),
        ];
        if let Some(namespace) = &self.namespace {
            entries.push(("namespace".to_string(), RawValue::Str(namespace.clone())));
        }
        RawValue::Map(entries)
    }
}
