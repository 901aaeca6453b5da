//! Parse-tree and writer abstractions that every model plugs into.
//!
//! Models never touch JSON directly. Deserialization walks a [`ParseNode`]
//! tree and dispatches each property through the model's field map;
//! serialization pushes fields, in a fixed order, into a
//! [`SerializationWriter`]. The JSON implementations live in [`json`].

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde_json::Value;

use crate::{
    ODATA_TYPE_KEY,
    errors::{EnumParseError, Error, Result},
};

pub mod duration;
pub mod json;

/// Properties that a model does not declare, kept verbatim for round-tripping.
pub type AdditionalData = serde_json::Map<String, Value>;

/// Assigns one wire property onto a model.
pub type FieldDeserializer<T> = Box<dyn Fn(&mut T, &dyn ParseNode) -> Result<()>>;

/// Wire name to handler map, one entry per declared property.
pub type FieldDeserializers<T> = HashMap<&'static str, FieldDeserializer<T>>;

/// Wraps a closure as a [`FieldDeserializer`].
pub fn field<T, F>(assign: F) -> FieldDeserializer<T>
where
    F: Fn(&mut T, &dyn ParseNode) -> Result<()> + 'static,
{
    Box::new(assign)
}

/// Lifts a base type's field map onto a type that embeds the base.
pub fn inherit<B, T>(base: FieldDeserializers<B>, project: fn(&mut T) -> &mut B) -> FieldDeserializers<T>
where
    B: 'static,
    T: 'static,
{
    base.into_iter()
        .map(|(key, assign)| {
            let lifted = field(move |target: &mut T, node: &dyn ParseNode| {
                assign(project(target), node)
            });
            (key, lifted)
        })
        .collect()
}

/// Lifts a variant's field map onto an enum that may hold that variant.
///
/// The projection returns `None` when the enum holds another variant, which
/// surfaces as a type mismatch instead of a silent drop.
pub fn narrow<B, T>(
    variant: FieldDeserializers<B>,
    project: fn(&mut T) -> Option<&mut B>,
    variant_name: &'static str,
) -> FieldDeserializers<T>
where
    B: 'static,
    T: 'static,
{
    variant
        .into_iter()
        .map(|(key, assign)| {
            let lifted = field(move |target: &mut T, node: &dyn ParseNode| match project(target) {
                Some(inner) => assign(inner, node),
                None => Err(Error::type_mismatch(variant_name, "another variant")),
            });
            (key, lifted)
        })
        .collect()
}

/// Access to the bag of unmodeled properties.
pub trait AdditionalDataHolder {
    fn additional_data(&self) -> &AdditionalData;
    fn additional_data_mut(&mut self) -> &mut AdditionalData;
}

/// A model that can be populated from a parse tree and written to a writer.
pub trait Parsable: AdditionalDataHolder {
    /// Handlers for every property this type declares, including inherited ones.
    fn field_deserializers(&self) -> FieldDeserializers<Self>
    where
        Self: Sized;

    /// Writes declared fields in order, then the additional data.
    fn serialize(&self, writer: &mut dyn SerializationWriter) -> Result<()>;
}

/// Builds the instance that a parse node's properties get assigned onto.
pub trait ParsableFactory: Parsable + Sized {
    fn create_from_discriminator_value(node: &dyn ParseNode) -> Result<Self>;
}

/// A closed enum whose wire form is one fixed string per variant.
pub trait GraphEnum: Copy + Eq + FromStr<Err = EnumParseError> + fmt::Display + 'static {
    const TYPE_NAME: &'static str;

    fn all() -> &'static [Self];
    fn as_str(&self) -> &'static str;
}

/// A value type that can appear as a model property.
pub trait FieldValue: Sized {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>>;
    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()>;
}

/// One node of a parsed document.
pub trait ParseNode {
    fn child_node(&self, key: &str) -> Option<Box<dyn ParseNode + '_>>;
    /// Elements of an array node; `None` for null.
    fn collection_nodes(&self) -> Result<Option<Vec<Box<dyn ParseNode + '_>>>>;
    /// Properties of an object node in document order; `None` for null.
    fn object_properties(&self) -> Result<Option<Vec<(&str, Box<dyn ParseNode + '_>)>>>;
    fn is_null(&self) -> bool;

    fn string_value(&self) -> Result<Option<String>>;
    fn bool_value(&self) -> Result<Option<bool>>;
    fn i32_value(&self) -> Result<Option<i32>>;
    fn i64_value(&self) -> Result<Option<i64>>;
    fn f32_value(&self) -> Result<Option<f32>>;
    fn f64_value(&self) -> Result<Option<f64>>;
    fn byte_array_value(&self) -> Result<Option<Vec<u8>>>;
    fn date_time_value(&self) -> Result<Option<DateTime<Utc>>>;
    /// `Edm.Date`, e.g. `2024-05-01`.
    fn date_value(&self) -> Result<Option<NaiveDate>>;
    /// `Edm.TimeOfDay`, e.g. `02:00:00`.
    fn time_value(&self) -> Result<Option<NaiveTime>>;
    fn duration_value(&self) -> Result<Option<TimeDelta>>;
    /// The node as a raw JSON value, used for additional data.
    fn untyped_value(&self) -> Value;
}

impl dyn ParseNode + '_ {
    /// Value of the `@odata.type` property, if the node is an object carrying one.
    pub fn discriminator_value(&self) -> Result<Option<String>> {
        match self.child_node(ODATA_TYPE_KEY) {
            Some(node) => node.string_value(),
            None => Ok(None),
        }
    }

    pub fn object_value<T: ParsableFactory>(&self) -> Result<Option<T>> {
        if self.is_null() {
            return Ok(None);
        }
        let mut value = T::create_from_discriminator_value(self)?;
        self.assign_field_values(&mut value)?;
        Ok(Some(value))
    }

    /// Objects of an array node; null elements are skipped.
    pub fn collection_of_object_values<T: ParsableFactory>(&self) -> Result<Option<Vec<T>>> {
        let Some(items) = self.collection_nodes()? else {
            return Ok(None);
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            if let Some(value) = item.object_value::<T>()? {
                values.push(value);
            }
        }
        Ok(Some(values))
    }

    /// Runs the target's field map over this node's properties.
    ///
    /// Properties without a handler are stored in the target's additional data.
    pub fn assign_field_values<T: Parsable>(&self, target: &mut T) -> Result<()> {
        let Some(properties) = self.object_properties()? else {
            return Err(Error::type_mismatch("object", "null"));
        };
        let deserializers = target.field_deserializers();
        for (key, node) in properties {
            match deserializers.get(key) {
                Some(assign) => assign(target, &*node)?,
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(property = key, "storing unmodeled property");
                    target
                        .additional_data_mut()
                        .insert(key.to_string(), node.untyped_value());
                }
            }
        }
        Ok(())
    }
}

/// Destination for a model's fields.
///
/// A `None` key writes into the enclosing array (or the document root).
pub trait SerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: &str) -> Result<()>;
    fn write_bool_value(&mut self, key: Option<&str>, value: bool) -> Result<()>;
    fn write_i32_value(&mut self, key: Option<&str>, value: i32) -> Result<()>;
    fn write_i64_value(&mut self, key: Option<&str>, value: i64) -> Result<()>;
    fn write_f32_value(&mut self, key: Option<&str>, value: f32) -> Result<()>;
    fn write_f64_value(&mut self, key: Option<&str>, value: f64) -> Result<()>;
    fn write_byte_array_value(&mut self, key: Option<&str>, value: &[u8]) -> Result<()>;
    fn write_date_time_value(&mut self, key: Option<&str>, value: &DateTime<Utc>) -> Result<()>;
    fn write_date_value(&mut self, key: Option<&str>, value: &NaiveDate) -> Result<()>;
    fn write_time_value(&mut self, key: Option<&str>, value: &NaiveTime) -> Result<()>;
    fn write_duration_value(&mut self, key: Option<&str>, value: &TimeDelta) -> Result<()>;
    fn write_null_value(&mut self, key: Option<&str>) -> Result<()>;
    fn write_untyped_value(&mut self, key: Option<&str>, value: &Value) -> Result<()>;

    fn start_object(&mut self, key: Option<&str>) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;
    fn start_collection(&mut self, key: Option<&str>) -> Result<()>;
    fn end_collection(&mut self) -> Result<()>;

    fn write_additional_data(&mut self, data: &AdditionalData) -> Result<()> {
        for (key, value) in data {
            self.write_untyped_value(Some(key), value)?;
        }
        Ok(())
    }

    /// The serialized document; fails if an object or collection is still open.
    fn content(&self) -> Result<Vec<u8>>;
}

impl dyn SerializationWriter + '_ {
    pub fn write_object_value<T: Parsable + ?Sized>(&mut self, key: Option<&str>, value: &T) -> Result<()> {
        self.start_object(key)?;
        value.serialize(self)?;
        self.end_object()
    }

    pub fn write_collection_of_object_values<T: Parsable>(&mut self, key: Option<&str>, values: &[T]) -> Result<()> {
        self.start_collection(key)?;
        for value in values {
            self.write_object_value(None, value)?;
        }
        self.end_collection()
    }
}

/// Raw bytes carried as base64 on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteArray(pub Vec<u8>);

impl Deref for ByteArray {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for ByteArray {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<ByteArray> for Vec<u8> {
    fn from(value: ByteArray) -> Self {
        value.0
    }
}

macro_rules! primitive_field_value {
    ($ty:ty, $read:ident, $write:ident) => {
        impl FieldValue for $ty {
            fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
                node.$read()
            }

            fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
                writer.$write(key, *self)
            }
        }
    };
}

primitive_field_value!(bool, bool_value, write_bool_value);
primitive_field_value!(i32, i32_value, write_i32_value);
primitive_field_value!(i64, i64_value, write_i64_value);
primitive_field_value!(f32, f32_value, write_f32_value);
primitive_field_value!(f64, f64_value, write_f64_value);

impl FieldValue for String {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        node.string_value()
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_string_value(key, self)
    }
}

impl FieldValue for ByteArray {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        Ok(node.byte_array_value()?.map(ByteArray))
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_byte_array_value(key, &self.0)
    }
}

impl FieldValue for DateTime<Utc> {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        node.date_time_value()
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_date_time_value(key, self)
    }
}

impl FieldValue for NaiveDate {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        node.date_value()
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_date_value(key, self)
    }
}

impl FieldValue for NaiveTime {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        node.time_value()
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_time_value(key, self)
    }
}

impl FieldValue for TimeDelta {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        node.duration_value()
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.write_duration_value(key, self)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    /// Null elements are skipped.
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        let Some(items) = node.collection_nodes()? else {
            return Ok(None);
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            if let Some(value) = T::read(&*item)? {
                values.push(value);
            }
        }
        Ok(Some(values))
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        writer.start_collection(key)?;
        for value in self {
            value.write(None, writer)?;
        }
        writer.end_collection()
    }
}
