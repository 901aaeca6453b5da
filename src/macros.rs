//! Declarative generators for schema-derived types.
//!
//! Every Graph model follows the same template: optional fields, a field map,
//! an ordered serializer and a bag of unmodeled properties. These macros emit
//! that template so each schema type is declared once as a field list.
//!
//! ```ignore
//! graph_enum! {
//!     pub enum BodyType {
//!         Text => "text",
//!         Html => "html",
//!     }
//! }
//!
//! graph_model! {
//!     pub struct ItemBody = "#microsoft.graph.itemBody" {
//!         content: String => "content",
//!         content_type: BodyType => "contentType",
//!     }
//! }
//! ```

/// Closed string-valued enum with a strict parser.
macro_rules! graph_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl $crate::serialization::GraphEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::errors::EnumParseError;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::errors::EnumParseError::new(stringify!($name), other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::errors::EnumParseError;

            fn try_from(value: String) -> ::std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::serialization::FieldValue for $name {
            fn read(
                node: &dyn $crate::serialization::ParseNode,
            ) -> $crate::errors::Result<Option<Self>> {
                match $crate::serialization::ParseNode::string_value(node)? {
                    Some(raw) => Ok(Some(raw.parse::<Self>()?)),
                    None => Ok(None),
                }
            }

            fn write(
                &self,
                key: Option<&str>,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                $crate::serialization::SerializationWriter::write_string_value(writer, key, self.as_str())
            }
        }
    };
}

/// Items shared by root and derived models.
macro_rules! graph_model_common {
    ($name:ident $(, $marker:literal)?) => {
        impl $name {
            $(
                /// Discriminator value identifying this type on the wire.
                pub const ODATA_TYPE: &'static str = $marker;
            )?

            /// An empty instance with its `@odata.type` marker set.
            pub fn new() -> Self {
                #[allow(unused_mut)]
                let mut model = Self::default();
                $(model.set_odata_type($marker);)?
                model
            }
        }

        impl $crate::serialization::ParsableFactory for $name {
            fn create_from_discriminator_value(
                _node: &dyn $crate::serialization::ParseNode,
            ) -> $crate::errors::Result<Self> {
                Ok(Self::default())
            }
        }

        impl $crate::serialization::FieldValue for $name {
            fn read(
                node: &dyn $crate::serialization::ParseNode,
            ) -> $crate::errors::Result<Option<Self>> {
                node.object_value::<Self>()
            }

            fn write(
                &self,
                key: Option<&str>,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                writer.write_object_value(key, self)
            }
        }
    };
}

/// Model type with optional fields, either a root or embedding a base model.
macro_rules! graph_model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $base:ident as $base_field:ident $(= $marker:literal)? {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub $base_field: $base,
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            pub fn odata_type(&self) -> Option<&str> {
                self.$base_field.odata_type()
            }

            pub fn set_odata_type(&mut self, value: impl Into<String>) {
                self.$base_field.set_odata_type(value);
            }

            pub(crate) fn serialize_fields(
                &self,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                self.$base_field.serialize_fields(writer)?;
                $(
                    if let Some(value) = &self.$field {
                        $crate::serialization::FieldValue::write(value, Some($wire), writer)?;
                    }
                )*
                Ok(())
            }
        }

        impl $crate::serialization::AdditionalDataHolder for $name {
            fn additional_data(&self) -> &$crate::serialization::AdditionalData {
                $crate::serialization::AdditionalDataHolder::additional_data(&self.$base_field)
            }

            fn additional_data_mut(&mut self) -> &mut $crate::serialization::AdditionalData {
                $crate::serialization::AdditionalDataHolder::additional_data_mut(&mut self.$base_field)
            }
        }

        impl $crate::serialization::Parsable for $name {
            fn field_deserializers(&self) -> $crate::serialization::FieldDeserializers<Self> {
                #[allow(unused_mut)]
                let mut fields = $crate::serialization::inherit::<$base, Self>(
                    $crate::serialization::Parsable::field_deserializers(&self.$base_field),
                    |model| &mut model.$base_field,
                );
                $(
                    fields.insert(
                        $wire,
                        $crate::serialization::field::<Self, _>(
                            |model: &mut Self, node: &dyn $crate::serialization::ParseNode| {
                                model.$field = <$ty as $crate::serialization::FieldValue>::read(node)?;
                                Ok(())
                            },
                        ),
                    );
                )*
                fields
            }

            fn serialize(
                &self,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                self.serialize_fields(writer)?;
                $crate::serialization::SerializationWriter::write_additional_data(
                    writer,
                    $crate::serialization::AdditionalDataHolder::additional_data(self),
                )
            }
        }

        graph_model_common!($name $(, $marker)?);
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident $(= $marker:literal)? {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            /// The `@odata.type` discriminator.
            pub odata_type: Option<String>,
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
            /// Properties not declared by the schema, re-emitted on serialization.
            pub additional_data: $crate::serialization::AdditionalData,
        }

        impl $name {
            pub fn odata_type(&self) -> Option<&str> {
                self.odata_type.as_deref()
            }

            pub fn set_odata_type(&mut self, value: impl Into<String>) {
                self.odata_type = Some(value.into());
            }

            pub(crate) fn serialize_fields(
                &self,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                if let Some(value) = &self.odata_type {
                    $crate::serialization::SerializationWriter::write_string_value(
                        writer,
                        Some($crate::ODATA_TYPE_KEY),
                        value,
                    )?;
                }
                $(
                    if let Some(value) = &self.$field {
                        $crate::serialization::FieldValue::write(value, Some($wire), writer)?;
                    }
                )*
                Ok(())
            }
        }

        impl $crate::serialization::AdditionalDataHolder for $name {
            fn additional_data(&self) -> &$crate::serialization::AdditionalData {
                &self.additional_data
            }

            fn additional_data_mut(&mut self) -> &mut $crate::serialization::AdditionalData {
                &mut self.additional_data
            }
        }

        impl $crate::serialization::Parsable for $name {
            fn field_deserializers(&self) -> $crate::serialization::FieldDeserializers<Self> {
                let mut fields = $crate::serialization::FieldDeserializers::<Self>::new();
                fields.insert(
                    $crate::ODATA_TYPE_KEY,
                    $crate::serialization::field::<Self, _>(
                        |model: &mut Self, node: &dyn $crate::serialization::ParseNode| {
                            model.odata_type = $crate::serialization::ParseNode::string_value(node)?;
                            Ok(())
                        },
                    ),
                );
                $(
                    fields.insert(
                        $wire,
                        $crate::serialization::field::<Self, _>(
                            |model: &mut Self, node: &dyn $crate::serialization::ParseNode| {
                                model.$field = <$ty as $crate::serialization::FieldValue>::read(node)?;
                                Ok(())
                            },
                        ),
                    );
                )*
                fields
            }

            fn serialize(
                &self,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                self.serialize_fields(writer)?;
                $crate::serialization::SerializationWriter::write_additional_data(writer, &self.additional_data)
            }
        }

        graph_model_common!($name $(, $marker)?);
    };
}

/// Polymorphic wrapper picking a concrete type from `@odata.type`.
///
/// The first variant is the base type and the fallback for absent or
/// unrecognized discriminators.
macro_rules! graph_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $base_variant:ident($base:ident),
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $base_variant($base),
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$base_variant($base::default())
            }
        }

        impl $name {
            pub fn odata_type(&self) -> Option<&str> {
                match self {
                    Self::$base_variant(inner) => inner.odata_type(),
                    $(Self::$variant(inner) => inner.odata_type(),)+
                }
            }
        }

        impl From<$base> for $name {
            fn from(value: $base) -> Self {
                Self::$base_variant(value)
            }
        }

        $(
            /// Sets the variant's `@odata.type` marker when it is missing.
            impl From<$ty> for $name {
                fn from(mut value: $ty) -> Self {
                    if value.odata_type().is_none() {
                        value.set_odata_type($ty::ODATA_TYPE);
                    }
                    Self::$variant(value)
                }
            }
        )+

        impl $crate::serialization::AdditionalDataHolder for $name {
            fn additional_data(&self) -> &$crate::serialization::AdditionalData {
                match self {
                    Self::$base_variant(inner) => $crate::serialization::AdditionalDataHolder::additional_data(inner),
                    $(Self::$variant(inner) => $crate::serialization::AdditionalDataHolder::additional_data(inner),)+
                }
            }

            fn additional_data_mut(&mut self) -> &mut $crate::serialization::AdditionalData {
                match self {
                    Self::$base_variant(inner) => {
                        $crate::serialization::AdditionalDataHolder::additional_data_mut(inner)
                    }
                    $(Self::$variant(inner) => {
                        $crate::serialization::AdditionalDataHolder::additional_data_mut(inner)
                    })+
                }
            }
        }

        impl $crate::serialization::Parsable for $name {
            fn field_deserializers(&self) -> $crate::serialization::FieldDeserializers<Self> {
                match self {
                    Self::$base_variant(inner) => $crate::serialization::narrow::<$base, Self>(
                        $crate::serialization::Parsable::field_deserializers(inner),
                        |any| match any {
                            Self::$base_variant(inner) => Some(inner),
                            _ => None,
                        },
                        stringify!($base),
                    ),
                    $(
                        Self::$variant(inner) => $crate::serialization::narrow::<$ty, Self>(
                            $crate::serialization::Parsable::field_deserializers(inner),
                            |any| match any {
                                Self::$variant(inner) => Some(inner),
                                _ => None,
                            },
                            stringify!($ty),
                        ),
                    )+
                }
            }

            fn serialize(
                &self,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                match self {
                    Self::$base_variant(inner) => $crate::serialization::Parsable::serialize(inner, writer),
                    $(
                        Self::$variant(inner) => {
                            // A derived variant must carry its marker to dispatch back to itself.
                            if inner.odata_type().is_none() {
                                $crate::serialization::SerializationWriter::write_string_value(
                                    writer,
                                    Some($crate::ODATA_TYPE_KEY),
                                    $ty::ODATA_TYPE,
                                )?;
                            }
                            $crate::serialization::Parsable::serialize(inner, writer)
                        }
                    )+
                }
            }
        }

        impl $crate::serialization::ParsableFactory for $name {
            fn create_from_discriminator_value(
                node: &dyn $crate::serialization::ParseNode,
            ) -> $crate::errors::Result<Self> {
                let discriminator = node.discriminator_value()?;
                $(
                    if discriminator.as_deref() == Some($ty::ODATA_TYPE) {
                        return Ok(Self::$variant($ty::default()));
                    }
                )+
                #[cfg(feature = "tracing")]
                if let Some(unknown) = discriminator.as_deref() {
                    if unknown != $base::ODATA_TYPE {
                        tracing::debug!(
                            discriminator = unknown,
                            fallback = stringify!($base),
                            "unrecognized @odata.type, using base type"
                        );
                    }
                }
                Ok(Self::$base_variant($base::default()))
            }
        }

        impl $crate::serialization::FieldValue for $name {
            fn read(
                node: &dyn $crate::serialization::ParseNode,
            ) -> $crate::errors::Result<Option<Self>> {
                node.object_value::<Self>()
            }

            fn write(
                &self,
                key: Option<&str>,
                writer: &mut dyn $crate::serialization::SerializationWriter,
            ) -> $crate::errors::Result<()> {
                writer.write_object_value(key, self)
            }
        }
    };
}
