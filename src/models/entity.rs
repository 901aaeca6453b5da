use super::{
    AadUserConversationMember, Chat, ChatMessage, ChatMessageHostedContent, ConversationMember,
    TeamworkHostedContent,
};

graph_model! {
    /// Root of every addressable Graph resource.
    pub struct Entity = "#microsoft.graph.entity" {
        /// Unique identifier of the resource. Read-only.
        id: String => "id",
    }
}

graph_union! {
    /// Any entity, resolved from `@odata.type`.
    pub enum AnyEntity {
        Entity(Entity),
        Chat(Chat),
        ChatMessage(ChatMessage),
        ConversationMember(ConversationMember),
        AadUserConversationMember(AadUserConversationMember),
        TeamworkHostedContent(TeamworkHostedContent),
        ChatMessageHostedContent(ChatMessageHostedContent),
    }
}

impl AnyEntity {
    /// Identifier of the wrapped resource, whatever its concrete type.
    pub fn id(&self) -> Option<&str> {
        let entity = match self {
            Self::Entity(entity) => entity,
            Self::Chat(chat) => &chat.entity,
            Self::ChatMessage(message) => &message.entity,
            Self::ConversationMember(member) => &member.entity,
            Self::AadUserConversationMember(member) => &member.member.entity,
            Self::TeamworkHostedContent(content) => &content.entity,
            Self::ChatMessageHostedContent(content) => &content.hosted_content.entity,
        };
        entity.id.as_deref()
    }
}
