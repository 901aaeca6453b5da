use std::{fmt, str::FromStr};

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use crate::{
    errors::{EnumParseError, Error, Result},
    serialization::{FieldValue, ParseNode, SerializationWriter},
};

graph_enum! {
    /// Kind of chat.
    pub enum ChatType {
        OneOnOne => "oneOnOne",
        Group => "group",
        Meeting => "meeting",
        UnknownFutureValue => "unknownFutureValue",
    }
}

graph_enum! {
    /// Format of an item body.
    pub enum BodyType {
        Text => "text",
        Html => "html",
    }
}

graph_enum! {
    pub enum ChatMessageType {
        Message => "message",
        ChatEvent => "chatEvent",
        Typing => "typing",
        UnknownFutureValue => "unknownFutureValue",
        SystemEventMessage => "systemEventMessage",
    }
}

graph_enum! {
    pub enum ChatMessageImportance {
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
        UnknownFutureValue => "unknownFutureValue",
    }
}

graph_enum! {
    /// Kind of call reported by call event details.
    pub enum TeamworkCallEventType {
        Call => "call",
        Meeting => "meeting",
        ScreenShare => "screenShare",
        UnknownFutureValue => "unknownFutureValue",
    }
}

graph_enum! {
    pub enum TeamworkUserIdentityType {
        AadUser => "aadUser",
        OnPremiseAadUser => "onPremiseAadUser",
        AnonymousGuest => "anonymousGuest",
        FederatedUser => "federatedUser",
        PersonalMicrosoftAccountUser => "personalMicrosoftAccountUser",
        SkypeUser => "skypeUser",
        PhoneUser => "phoneUser",
        UnknownFutureValue => "unknownFutureValue",
        EmailUser => "emailUser",
    }
}

graph_enum! {
    pub enum TeamworkConversationIdentityType {
        Team => "team",
        Channel => "channel",
        Chat => "chat",
        UnknownFutureValue => "unknownFutureValue",
    }
}

bitflags! {
    /// Actions recorded on a message history item.
    ///
    /// On the wire this is a comma-separated list such as
    /// `"reactionAdded,reactionRemoved"`; the empty set is `""`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChatMessageActions: u32 {
        const REACTION_ADDED = 1;
        const REACTION_REMOVED = 2;
        const ACTION_UNDEFINED = 4;
        const UNKNOWN_FUTURE_VALUE = 8;
    }
}

impl ChatMessageActions {
    const NAMES: [(Self, &'static str); 4] = [
        (Self::REACTION_ADDED, "reactionAdded"),
        (Self::REACTION_REMOVED, "reactionRemoved"),
        (Self::ACTION_UNDEFINED, "actionUndefined"),
        (Self::UNKNOWN_FUTURE_VALUE, "unknownFutureValue"),
    ];

    /// Bits without a wire name, e.g. from `from_bits_retain`.
    pub fn unnamed_bits(&self) -> u32 {
        self.bits() & !Self::all().bits()
    }

    fn check_named(&self) -> std::result::Result<(), String> {
        match self.unnamed_bits() {
            0 => Ok(()),
            bits => Err(format!("ChatMessageActions bits {bits:#x} have no wire name")),
        }
    }
}

impl FromStr for ChatMessageActions {
    type Err = EnumParseError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let mut actions = Self::empty();
        if value.trim().is_empty() {
            return Ok(actions);
        }
        for part in value.split(',').map(str::trim) {
            let flag = Self::NAMES
                .iter()
                .find(|(_, name)| *name == part)
                .map(|(flag, _)| *flag)
                .ok_or_else(|| EnumParseError::new("ChatMessageActions", value))?;
            actions |= flag;
        }
        Ok(actions)
    }
}

impl fmt::Display for ChatMessageActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}

impl FieldValue for ChatMessageActions {
    fn read(node: &dyn ParseNode) -> Result<Option<Self>> {
        match node.string_value()? {
            Some(raw) => Ok(Some(raw.parse::<Self>()?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: Option<&str>, writer: &mut dyn SerializationWriter) -> Result<()> {
        self.check_named().map_err(Error::Writer)?;
        writer.write_string_value(key, &self.to_string())
    }
}

impl Serialize for ChatMessageActions {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.check_named().map_err(ser::Error::custom)?;
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChatMessageActions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
