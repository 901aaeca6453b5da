//! JSON implementations of [`ParseNode`] and [`SerializationWriter`].

use std::borrow::Cow;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Utc};
use serde_json::{Map, Number, Value};

use super::{ParseNode, SerializationWriter, duration};
use crate::errors::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A node over a parsed JSON document.
///
/// The root node owns its document; child nodes borrow from it.
#[derive(Debug, Clone)]
pub struct JsonParseNode<'a> {
    value: Cow<'a, Value>,
}

impl JsonParseNode<'static> {
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(content)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl<'a> JsonParseNode<'a> {
    pub fn borrowed(value: &'a Value) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::type_mismatch(expected, kind_of(&self.value))
    }

    fn string_ref(&self, expected: &'static str) -> Result<Option<&str>> {
        match self.value() {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            _ => Err(self.mismatch(expected)),
        }
    }

    fn number(&self, expected: &'static str) -> Result<Option<&Number>> {
        match self.value() {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(n)),
            _ => Err(self.mismatch(expected)),
        }
    }

    fn integer(&self, target: &'static str) -> Result<Option<i64>> {
        let Some(number) = self.number(target)? else {
            return Ok(None);
        };
        number.as_i64().map(Some).ok_or_else(|| Error::NumberOutOfRange {
            value: number.to_string(),
            target,
        })
    }
}

impl ParseNode for JsonParseNode<'_> {
    fn child_node(&self, key: &str) -> Option<Box<dyn ParseNode + '_>> {
        self.value
            .as_object()
            .and_then(|object| object.get(key))
            .map(|child| Box::new(JsonParseNode::borrowed(child)) as Box<dyn ParseNode + '_>)
    }

    fn collection_nodes(&self) -> Result<Option<Vec<Box<dyn ParseNode + '_>>>> {
        match self.value() {
            Value::Null => Ok(None),
            Value::Array(items) => Ok(Some(
                items
                    .iter()
                    .map(|item| Box::new(JsonParseNode::borrowed(item)) as Box<dyn ParseNode + '_>)
                    .collect(),
            )),
            _ => Err(self.mismatch("array")),
        }
    }

    fn object_properties(&self) -> Result<Option<Vec<(&str, Box<dyn ParseNode + '_>)>>> {
        match self.value() {
            Value::Null => Ok(None),
            Value::Object(object) => Ok(Some(
                object
                    .iter()
                    .map(|(key, child)| {
                        (
                            key.as_str(),
                            Box::new(JsonParseNode::borrowed(child)) as Box<dyn ParseNode + '_>,
                        )
                    })
                    .collect(),
            )),
            _ => Err(self.mismatch("object")),
        }
    }

    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn string_value(&self) -> Result<Option<String>> {
        Ok(self.string_ref("string")?.map(str::to_string))
    }

    fn bool_value(&self) -> Result<Option<bool>> {
        match self.value() {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            _ => Err(self.mismatch("bool")),
        }
    }

    fn i32_value(&self) -> Result<Option<i32>> {
        let Some(value) = self.integer("i32")? else {
            return Ok(None);
        };
        i32::try_from(value).map(Some).map_err(|_| Error::NumberOutOfRange {
            value: value.to_string(),
            target: "i32",
        })
    }

    fn i64_value(&self) -> Result<Option<i64>> {
        self.integer("i64")
    }

    fn f32_value(&self) -> Result<Option<f32>> {
        let Some(value) = self.f64_value()? else {
            return Ok(None);
        };
        let narrowed = value as f32;
        if value.is_finite() && !narrowed.is_finite() {
            return Err(Error::NumberOutOfRange {
                value: value.to_string(),
                target: "f32",
            });
        }
        Ok(Some(narrowed))
    }

    fn f64_value(&self) -> Result<Option<f64>> {
        Ok(self.number("number")?.and_then(Number::as_f64))
    }

    fn byte_array_value(&self) -> Result<Option<Vec<u8>>> {
        match self.string_ref("base64 string")? {
            Some(encoded) => Ok(Some(STANDARD.decode(encoded)?)),
            None => Ok(None),
        }
    }

    fn date_time_value(&self) -> Result<Option<DateTime<Utc>>> {
        match self.string_ref("date-time string")? {
            Some(raw) => Ok(Some(
                DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
            )),
            None => Ok(None),
        }
    }

    fn date_value(&self) -> Result<Option<NaiveDate>> {
        match self.string_ref("date string")? {
            Some(raw) => Ok(Some(NaiveDate::parse_from_str(raw, DATE_FORMAT)?)),
            None => Ok(None),
        }
    }

    fn time_value(&self) -> Result<Option<NaiveTime>> {
        match self.string_ref("time string")? {
            Some(raw) => Ok(Some(NaiveTime::parse_from_str(raw, TIME_FORMAT)?)),
            None => Ok(None),
        }
    }

    fn duration_value(&self) -> Result<Option<TimeDelta>> {
        match self.string_ref("duration string")? {
            Some(raw) => duration::parse(raw).map(Some),
            None => Ok(None),
        }
    }

    fn untyped_value(&self) -> Value {
        self.value().clone()
    }
}

#[derive(Debug)]
enum Frame {
    Object { key: Option<String>, map: Map<String, Value> },
    Collection { key: Option<String>, items: Vec<Value> },
}

/// Builds a JSON document from a sequence of writer calls.
#[derive(Debug, Default)]
pub struct JsonSerializationWriter {
    stack: Vec<Frame>,
    root: Option<Value>,
    pretty: bool,
}

impl JsonSerializationWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The document written so far, once every object and collection is closed.
    pub fn value(&self) -> Result<&Value> {
        if !self.stack.is_empty() {
            return Err(Error::Writer(format!(
                "{} object(s) or collection(s) still open",
                self.stack.len()
            )));
        }
        self.root
            .as_ref()
            .ok_or_else(|| Error::Writer("nothing has been written".to_string()))
    }

    pub fn into_value(self) -> Result<Value> {
        self.value()?;
        self.root
            .ok_or_else(|| Error::Writer("nothing has been written".to_string()))
    }

    fn put(&mut self, key: Option<&str>, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { map, .. }) => {
                let key = key.ok_or_else(|| {
                    Error::Writer("object members must be written with a key".to_string())
                })?;
                if map.contains_key(key) {
                    return Err(Error::Writer(format!("property {key:?} written twice")));
                }
                map.insert(key.to_string(), value);
            }
            Some(Frame::Collection { items, .. }) => items.push(value),
            None => {
                if let Some(key) = key {
                    return Err(Error::Writer(format!(
                        "no open object to hold property {key:?}"
                    )));
                }
                if self.root.is_some() {
                    return Err(Error::Writer("document root already written".to_string()));
                }
                self.root = Some(value);
            }
        }
        Ok(())
    }

    fn float(value: f64) -> Result<Value> {
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| Error::Writer(format!("{value} cannot be represented in JSON")))
    }
}

impl SerializationWriter for JsonSerializationWriter {
    fn write_string_value(&mut self, key: Option<&str>, value: &str) -> Result<()> {
        self.put(key, Value::String(value.to_string()))
    }

    fn write_bool_value(&mut self, key: Option<&str>, value: bool) -> Result<()> {
        self.put(key, Value::Bool(value))
    }

    fn write_i32_value(&mut self, key: Option<&str>, value: i32) -> Result<()> {
        self.put(key, Value::from(value))
    }

    fn write_i64_value(&mut self, key: Option<&str>, value: i64) -> Result<()> {
        self.put(key, Value::from(value))
    }

    fn write_f32_value(&mut self, key: Option<&str>, value: f32) -> Result<()> {
        self.put(key, Self::float(f64::from(value))?)
    }

    fn write_f64_value(&mut self, key: Option<&str>, value: f64) -> Result<()> {
        self.put(key, Self::float(value)?)
    }

    fn write_byte_array_value(&mut self, key: Option<&str>, value: &[u8]) -> Result<()> {
        self.put(key, Value::String(STANDARD.encode(value)))
    }

    fn write_date_time_value(&mut self, key: Option<&str>, value: &DateTime<Utc>) -> Result<()> {
        self.put(
            key,
            Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        )
    }

    fn write_date_value(&mut self, key: Option<&str>, value: &NaiveDate) -> Result<()> {
        self.put(key, Value::String(value.format(DATE_FORMAT).to_string()))
    }

    fn write_time_value(&mut self, key: Option<&str>, value: &NaiveTime) -> Result<()> {
        self.put(key, Value::String(value.format(TIME_FORMAT).to_string()))
    }

    fn write_duration_value(&mut self, key: Option<&str>, value: &TimeDelta) -> Result<()> {
        self.put(key, Value::String(duration::format(value)))
    }

    fn write_null_value(&mut self, key: Option<&str>) -> Result<()> {
        self.put(key, Value::Null)
    }

    fn write_untyped_value(&mut self, key: Option<&str>, value: &Value) -> Result<()> {
        self.put(key, value.clone())
    }

    fn start_object(&mut self, key: Option<&str>) -> Result<()> {
        self.stack.push(Frame::Object {
            key: key.map(str::to_string),
            map: Map::new(),
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { key, map }) => self.put(key.as_deref(), Value::Object(map)),
            Some(frame) => {
                self.stack.push(frame);
                Err(Error::Writer("end_object called while a collection is open".to_string()))
            }
            None => Err(Error::Writer("end_object called with no open object".to_string())),
        }
    }

    fn start_collection(&mut self, key: Option<&str>) -> Result<()> {
        self.stack.push(Frame::Collection {
            key: key.map(str::to_string),
            items: Vec::new(),
        });
        Ok(())
    }

    fn end_collection(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Collection { key, items }) => self.put(key.as_deref(), Value::Array(items)),
            Some(frame) => {
                self.stack.push(frame);
                Err(Error::Writer("end_collection called while an object is open".to_string()))
            }
            None => Err(Error::Writer(
                "end_collection called with no open collection".to_string(),
            )),
        }
    }

    fn content(&self) -> Result<Vec<u8>> {
        let value = self.value()?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }
}
