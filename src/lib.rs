//! Typed models for Microsoft Graph Teams chats and messages.
//!
//! Models are plain structs of `Option` fields. They are read from a
//! [`ParseNode`](serialization::ParseNode) tree through per-type field maps and
//! written field by field into a
//! [`SerializationWriter`](serialization::SerializationWriter). Properties the
//! schema does not declare are kept in `additional_data` and written back
//! unchanged.
//!
//! ```
//! use msgraph_models::{deserialize_json, serialize_json, models::ChatMessage};
//!
//! let message: ChatMessage = deserialize_json(br#"{"id":"1","messageType":"message","x":1}"#)?;
//! assert_eq!(message.id(), Some("1"));
//! assert_eq!(serialize_json(&message)?, br#"{"id":"1","messageType":"message","x":1}"#);
//! # Ok::<(), msgraph_models::Error>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Property carrying the concrete type of a polymorphic object.
pub const ODATA_TYPE_KEY: &str = "@odata.type";

/// Property carrying the total item count of a collection response.
pub const ODATA_COUNT_KEY: &str = "@odata.count";

/// Property carrying the URL of the next page of a collection response.
pub const ODATA_NEXT_LINK_KEY: &str = "@odata.nextLink";

/// Content type handled by the built-in factories.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[macro_use]
mod macros;

mod codec;
mod errors;
pub mod models;
pub mod serialization;

pub use codec::{
    Codec, Config, JsonParseNodeFactory, JsonSerializationWriterFactory, ParseNodeFactory,
    SerializationWriterFactory, deserialize_json, normalize_content_type, serialize_json,
};
pub use errors::{EnumParseError, Error, Result};
pub use serialization::{
    AdditionalData, AdditionalDataHolder, ByteArray, FieldValue, GraphEnum, Parsable,
    ParsableFactory, ParseNode, SerializationWriter,
};
