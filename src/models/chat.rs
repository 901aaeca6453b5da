use chrono::{DateTime, Utc};

use super::{AnyConversationMember, ChatMessage, ChatType, Entity, TeamworkUserIdentity};

graph_model! {
    /// A one-on-one, group or meeting chat.
    pub struct Chat: Entity as entity = "#microsoft.graph.chat" {
        chat_type: ChatType => "chatType",
        created_date_time: DateTime<Utc> => "createdDateTime",
        is_hidden_for_all_members: bool => "isHiddenForAllMembers",
        last_updated_date_time: DateTime<Utc> => "lastUpdatedDateTime",
        /// Set only for chats tied to an online meeting.
        online_meeting_info: TeamworkOnlineMeetingInfo => "onlineMeetingInfo",
        tenant_id: String => "tenantId",
        topic: String => "topic",
        viewpoint: ChatViewpoint => "viewpoint",
        web_url: String => "webUrl",
        members: Vec<AnyConversationMember> => "members",
        messages: Vec<ChatMessage> => "messages",
    }
}

graph_model! {
    /// Chat state from the signed-in user's point of view.
    pub struct ChatViewpoint = "#microsoft.graph.chatViewpoint" {
        is_hidden: bool => "isHidden",
        last_message_read_date_time: DateTime<Utc> => "lastMessageReadDateTime",
    }
}

graph_model! {
    pub struct TeamworkOnlineMeetingInfo = "#microsoft.graph.teamworkOnlineMeetingInfo" {
        calendar_event_id: String => "calendarEventId",
        join_web_url: String => "joinWebUrl",
        organizer: TeamworkUserIdentity => "organizer",
    }
}

impl Chat {
    /// A new chat of the given kind with its initial members.
    pub fn create(chat_type: ChatType, members: impl IntoIterator<Item = AnyConversationMember>) -> Self {
        Self {
            chat_type: Some(chat_type),
            members: Some(members.into_iter().collect()),
            ..Self::new()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.entity.id.as_deref()
    }

    /// Whether the signed-in user has unread messages, as far as the viewpoint tells.
    pub fn has_unread(&self) -> bool {
        match (&self.viewpoint, self.last_updated_date_time) {
            (Some(viewpoint), Some(updated)) => viewpoint
                .last_message_read_date_time
                .is_none_or(|read| read < updated),
            _ => false,
        }
    }
}
