//! Schema types for Teams chats and messages.
//!
//! Each type mirrors one entry of the Graph `v1.0` schema. Properties are
//! `Option` because any of them may be absent from a payload; derived types
//! embed their base type in a named field (`chat.entity.id`). Polymorphic
//! properties use the `Any*` enums, which pick a variant from `@odata.type`.

mod chat;
mod chat_message;
mod collection_response;
mod conversation_member;
mod entity;
mod enums;
mod event_message_detail;
mod hosted_content;
mod identity;

pub use chat::{Chat, ChatViewpoint, TeamworkOnlineMeetingInfo};
pub use chat_message::{
    ChannelIdentity, ChatMessage, ChatMessageAttachment, ChatMessageHistoryItem, ChatMessageMention,
    ChatMessageReaction, ItemBody,
};
pub use collection_response::{
    BaseCollectionPaginationCountResponse, ChatCollectionResponse, ChatMessageCollectionResponse,
    CollectionPage, ConversationMemberCollectionResponse,
};
pub use conversation_member::{AadUserConversationMember, AnyConversationMember, ConversationMember};
pub use entity::{AnyEntity, Entity};
pub use enums::{
    BodyType, ChatMessageActions, ChatMessageImportance, ChatMessageType, ChatType,
    TeamworkCallEventType, TeamworkConversationIdentityType, TeamworkUserIdentityType,
};
pub use event_message_detail::{
    AnyEventMessageDetail, CallEndedEventMessageDetail, CallParticipantInfo,
    ChatRenamedEventMessageDetail, EventMessageDetail, MembersAddedEventMessageDetail,
};
pub use hosted_content::{AnyTeamworkHostedContent, ChatMessageHostedContent, TeamworkHostedContent};
pub use identity::{
    AnyIdentity, ChatMessageFromIdentitySet, ChatMessageMentionedIdentitySet,
    ChatMessageReactionIdentitySet, Identity, IdentitySet, TeamworkConversationIdentity,
    TeamworkUserIdentity,
};
