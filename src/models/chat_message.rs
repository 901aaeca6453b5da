use chrono::{DateTime, Utc};

use super::{
    AnyEventMessageDetail, BodyType, ChatMessageActions, ChatMessageFromIdentitySet,
    ChatMessageHostedContent, ChatMessageImportance, ChatMessageMentionedIdentitySet,
    ChatMessageReactionIdentitySet, ChatMessageType, Entity,
};

graph_model! {
    /// Content and format of a message body.
    pub struct ItemBody = "#microsoft.graph.itemBody" {
        content: String => "content",
        content_type: BodyType => "contentType",
    }
}

graph_model! {
    /// Team and channel a channel message was posted in.
    pub struct ChannelIdentity = "#microsoft.graph.channelIdentity" {
        channel_id: String => "channelId",
        team_id: String => "teamId",
    }
}

graph_model! {
    /// A file, card or message reference attached to a message.
    pub struct ChatMessageAttachment = "#microsoft.graph.chatMessageAttachment" {
        content: String => "content",
        content_type: String => "contentType",
        content_url: String => "contentUrl",
        id: String => "id",
        name: String => "name",
        teams_app_id: String => "teamsAppId",
        thumbnail_url: String => "thumbnailUrl",
    }
}

graph_model! {
    pub struct ChatMessageMention = "#microsoft.graph.chatMessageMention" {
        /// Index matching `<at id="{id}">` in the message body.
        id: i32 => "id",
        mention_text: String => "mentionText",
        mentioned: ChatMessageMentionedIdentitySet => "mentioned",
    }
}

graph_model! {
    pub struct ChatMessageReaction = "#microsoft.graph.chatMessageReaction" {
        created_date_time: DateTime<Utc> => "createdDateTime",
        display_name: String => "displayName",
        reaction_content_url: String => "reactionContentUrl",
        /// Unicode emoji or a legacy name such as `like`.
        reaction_type: String => "reactionType",
        user: ChatMessageReactionIdentitySet => "user",
    }
}

graph_model! {
    pub struct ChatMessageHistoryItem = "#microsoft.graph.chatMessageHistoryItem" {
        actions: ChatMessageActions => "actions",
        modified_date_time: DateTime<Utc> => "modifiedDateTime",
        reaction: ChatMessageReaction => "reaction",
    }
}

graph_model! {
    /// A message in a chat or channel.
    pub struct ChatMessage: Entity as entity = "#microsoft.graph.chatMessage" {
        attachments: Vec<ChatMessageAttachment> => "attachments",
        body: ItemBody => "body",
        channel_identity: ChannelIdentity => "channelIdentity",
        chat_id: String => "chatId",
        created_date_time: DateTime<Utc> => "createdDateTime",
        deleted_date_time: DateTime<Utc> => "deletedDateTime",
        etag: String => "etag",
        /// Present on system event messages.
        event_detail: AnyEventMessageDetail => "eventDetail",
        from: ChatMessageFromIdentitySet => "from",
        importance: ChatMessageImportance => "importance",
        last_edited_date_time: DateTime<Utc> => "lastEditedDateTime",
        last_modified_date_time: DateTime<Utc> => "lastModifiedDateTime",
        locale: String => "locale",
        mentions: Vec<ChatMessageMention> => "mentions",
        message_history: Vec<ChatMessageHistoryItem> => "messageHistory",
        message_type: ChatMessageType => "messageType",
        reactions: Vec<ChatMessageReaction> => "reactions",
        reply_to_id: String => "replyToId",
        subject: String => "subject",
        summary: String => "summary",
        web_url: String => "webUrl",
        hosted_contents: Vec<ChatMessageHostedContent> => "hostedContents",
        replies: Vec<ChatMessage> => "replies",
    }
}

impl ItemBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            content_type: Some(BodyType::Text),
            ..Self::new()
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            content_type: Some(BodyType::Html),
            ..Self::new()
        }
    }
}

impl ChatMessage {
    /// A message ready to post, carrying only a body.
    pub fn with_body(body: ItemBody) -> Self {
        Self {
            body: Some(body),
            ..Self::new()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.entity.id.as_deref()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_date_time.is_some()
    }

    pub fn is_system_event(&self) -> bool {
        self.message_type == Some(ChatMessageType::SystemEventMessage)
    }
}
