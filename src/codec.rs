//! Content-type keyed registry of parse-node and writer factories.
//!
//! [`Codec`] is the entry point for turning request/response bodies into
//! models and back. JSON is registered out of the box; other formats plug in
//! through [`ParseNodeFactory`] and [`SerializationWriterFactory`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    JSON_CONTENT_TYPE,
    errors::{Error, Result},
    serialization::{
        Parsable, ParsableFactory, ParseNode, SerializationWriter,
        json::{JsonParseNode, JsonSerializationWriter},
    },
};

/// Builds parse trees for one content type.
pub trait ParseNodeFactory: Send + Sync {
    /// Normalized content type this factory handles, e.g. `application/json`.
    fn valid_content_type(&self) -> &str;
    fn parse_node(&self, content: &[u8]) -> Result<Box<dyn ParseNode>>;
}

/// Builds writers for one content type.
pub trait SerializationWriterFactory: Send + Sync {
    fn valid_content_type(&self) -> &str;
    fn serialization_writer(&self) -> Box<dyn SerializationWriter>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParseNodeFactory;

impl ParseNodeFactory for JsonParseNodeFactory {
    fn valid_content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn parse_node(&self, content: &[u8]) -> Result<Box<dyn ParseNode>> {
        Ok(Box::new(JsonParseNode::from_slice(content)?))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializationWriterFactory {
    pub pretty: bool,
}

impl SerializationWriterFactory for JsonSerializationWriterFactory {
    fn valid_content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn serialization_writer(&self) -> Box<dyn SerializationWriter> {
        Box::new(JsonSerializationWriter::new().pretty(self.pretty))
    }
}

/// Codec configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Content type used by the `*_default` helpers (defaults to `application/json`).
    pub default_content_type: Option<String>,
    /// Pretty-print JSON output (defaults to false).
    pub pretty: Option<bool>,
}

#[derive(Clone)]
pub struct Codec {
    default_content_type: String,
    parse_node_factories: HashMap<String, Arc<dyn ParseNodeFactory>>,
    writer_factories: HashMap<String, Arc<dyn SerializationWriterFactory>>,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parse_nodes: Vec<_> = self.parse_node_factories.keys().collect();
        parse_nodes.sort();
        let mut writers: Vec<_> = self.writer_factories.keys().collect();
        writers.sort();
        f.debug_struct("Codec")
            .field("default_content_type", &self.default_content_type)
            .field("parse_node_factories", &parse_nodes)
            .field("writer_factories", &writers)
            .finish()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::with_json(JSON_CONTENT_TYPE.to_string(), false)
    }
}

impl Codec {
    pub fn new(cfg: Config) -> Result<Self> {
        let default_content_type = match cfg.default_content_type.as_deref() {
            Some(raw) => normalize_content_type(raw)
                .ok_or_else(|| Error::Config(format!("invalid default content type: {raw:?}")))?,
            None => JSON_CONTENT_TYPE.to_string(),
        };
        if default_content_type != JSON_CONTENT_TYPE {
            return Err(Error::Config(format!(
                "no built-in factory for default content type {default_content_type}"
            )));
        }
        Ok(Self::with_json(default_content_type, cfg.pretty.unwrap_or(false)))
    }

    fn with_json(default_content_type: String, pretty: bool) -> Self {
        let mut codec = Self {
            default_content_type,
            parse_node_factories: HashMap::new(),
            writer_factories: HashMap::new(),
        };
        codec.register_parse_node_factory(JsonParseNodeFactory);
        codec.register_serialization_writer_factory(JsonSerializationWriterFactory { pretty });
        codec
    }

    pub fn default_content_type(&self) -> &str {
        &self.default_content_type
    }

    /// Registers `factory` for its content type, replacing any previous one.
    pub fn register_parse_node_factory(&mut self, factory: impl ParseNodeFactory + 'static) {
        let key = normalize_content_type(factory.valid_content_type())
            .unwrap_or_else(|| factory.valid_content_type().to_ascii_lowercase());
        #[cfg(feature = "tracing")]
        tracing::debug!(content_type = %key, "registered parse node factory");
        self.parse_node_factories.insert(key, Arc::new(factory));
    }

    /// Registers `factory` for its content type, replacing any previous one.
    pub fn register_serialization_writer_factory(
        &mut self,
        factory: impl SerializationWriterFactory + 'static,
    ) {
        let key = normalize_content_type(factory.valid_content_type())
            .unwrap_or_else(|| factory.valid_content_type().to_ascii_lowercase());
        #[cfg(feature = "tracing")]
        tracing::debug!(content_type = %key, "registered serialization writer factory");
        self.writer_factories.insert(key, Arc::new(factory));
    }

    pub fn parse_node(&self, content_type: &str, content: &[u8]) -> Result<Box<dyn ParseNode>> {
        let factory = lookup(&self.parse_node_factories, content_type)?;
        factory.parse_node(content)
    }

    pub fn serialization_writer(&self, content_type: &str) -> Result<Box<dyn SerializationWriter>> {
        let factory = lookup(&self.writer_factories, content_type)?;
        Ok(factory.serialization_writer())
    }

    /// Parses one model from `content`.
    ///
    /// A `null` document is a type mismatch, not an empty model.
    pub fn deserialize<T: ParsableFactory>(&self, content_type: &str, content: &[u8]) -> Result<T> {
        let node = self.parse_node(content_type, content)?;
        node.object_value::<T>()?
            .ok_or_else(|| Error::type_mismatch("object", "null"))
    }

    /// Parses a top-level array of models.
    pub fn deserialize_collection<T: ParsableFactory>(
        &self,
        content_type: &str,
        content: &[u8],
    ) -> Result<Vec<T>> {
        let node = self.parse_node(content_type, content)?;
        node.collection_of_object_values::<T>()?
            .ok_or_else(|| Error::type_mismatch("array", "null"))
    }

    pub fn serialize<T: Parsable + ?Sized>(&self, content_type: &str, value: &T) -> Result<Vec<u8>> {
        let mut writer = self.serialization_writer(content_type)?;
        writer.write_object_value(None, value)?;
        writer.content()
    }

    pub fn serialize_collection<T: Parsable>(&self, content_type: &str, values: &[T]) -> Result<Vec<u8>> {
        let mut writer = self.serialization_writer(content_type)?;
        writer.write_collection_of_object_values(None, values)?;
        writer.content()
    }

    /// [`Codec::deserialize`] with the configured default content type.
    pub fn deserialize_default<T: ParsableFactory>(&self, content: &[u8]) -> Result<T> {
        self.deserialize(&self.default_content_type, content)
    }

    /// [`Codec::serialize`] with the configured default content type.
    pub fn serialize_default<T: Parsable + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.serialize(&self.default_content_type, value)
    }
}

fn lookup<'a, F: ?Sized>(factories: &'a HashMap<String, Arc<F>>, content_type: &str) -> Result<&'a F> {
    let found = normalize_content_type(content_type).and_then(|key| factories.get(&key));
    match found {
        Some(factory) => Ok(factory.as_ref()),
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(content_type, "no factory registered for content type");
            Err(Error::UnsupportedContentType(content_type.to_string()))
        }
    }
}

/// Reduces a media type to the key factories are registered under.
///
/// Parameters are dropped, case is folded and structured-syntax suffixes
/// collapse onto their base format:
/// `application/vnd.api+json; charset=utf-8` becomes `application/json`.
pub fn normalize_content_type(raw: &str) -> Option<String> {
    let essence = raw.split_once(';').map_or(raw, |(essence, _)| essence);
    let essence = essence.trim().to_ascii_lowercase();
    let (kind, subtype) = essence.split_once('/')?;
    let subtype = subtype.rsplit_once('+').map_or(subtype, |(_, suffix)| suffix);
    if kind.is_empty() || subtype.is_empty() || subtype.contains('/') {
        return None;
    }
    Some(format!("{kind}/{subtype}"))
}

/// Serializes a model as compact JSON.
pub fn serialize_json<T: Parsable + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = JsonSerializationWriter::new();
    {
        let writer: &mut dyn SerializationWriter = &mut writer;
        writer.write_object_value(None, value)?;
    }
    writer.content()
}

/// Parses a model from JSON bytes.
pub fn deserialize_json<T: ParsableFactory>(content: &[u8]) -> Result<T> {
    let node = JsonParseNode::from_slice(content)?;
    let node: &dyn ParseNode = &node;
    node.object_value::<T>()?
        .ok_or_else(|| Error::type_mismatch("object", "null"))
}
