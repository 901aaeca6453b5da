//! Paged list responses.

use super::{AnyConversationMember, Chat, ChatMessage};

graph_model! {
    /// Paging metadata shared by every collection response.
    pub struct BaseCollectionPaginationCountResponse {
        /// Total item count, present when `$count=true` was requested.
        odata_count: i64 => "@odata.count",
        /// URL of the next page; absent on the last page.
        odata_next_link: String => "@odata.nextLink",
    }
}

graph_model! {
    pub struct ChatCollectionResponse: BaseCollectionPaginationCountResponse as page {
        value: Vec<Chat> => "value",
    }
}

graph_model! {
    pub struct ChatMessageCollectionResponse: BaseCollectionPaginationCountResponse as page {
        value: Vec<ChatMessage> => "value",
    }
}

graph_model! {
    pub struct ConversationMemberCollectionResponse: BaseCollectionPaginationCountResponse as page {
        value: Vec<AnyConversationMember> => "value",
    }
}

impl BaseCollectionPaginationCountResponse {
    pub fn has_next_page(&self) -> bool {
        self.odata_next_link.is_some()
    }
}

/// A collection response whose items can be taken page by page.
pub trait CollectionPage {
    type Item;

    fn page(&self) -> &BaseCollectionPaginationCountResponse;
    fn items(&self) -> &[Self::Item];
    fn into_items(self) -> Vec<Self::Item>;

    fn next_link(&self) -> Option<&str> {
        self.page().odata_next_link.as_deref()
    }
}

macro_rules! collection_page {
    ($response:ty, $item:ty) => {
        impl CollectionPage for $response {
            type Item = $item;

            fn page(&self) -> &BaseCollectionPaginationCountResponse {
                &self.page
            }

            fn items(&self) -> &[Self::Item] {
                self.value.as_deref().unwrap_or_default()
            }

            fn into_items(self) -> Vec<Self::Item> {
                self.value.unwrap_or_default()
            }
        }
    };
}

collection_page!(ChatCollectionResponse, Chat);
collection_page!(ChatMessageCollectionResponse, ChatMessage);
collection_page!(ConversationMemberCollectionResponse, AnyConversationMember);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::serialization::{
        ParseNode, SerializationWriter,
        json::{JsonParseNode, JsonSerializationWriter},
    };

    fn parse<T: crate::serialization::ParsableFactory>(value: serde_json::Value) -> T {
        let node = JsonParseNode::from_value(value);
        let node: &dyn ParseNode = &node;
        node.object_value::<T>().unwrap().unwrap()
    }

    #[test]
    fn reads_paging_metadata_and_items() {
        let page: ChatMessageCollectionResponse = parse(json!({
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#chats('19%3A...')/messages",
            "@odata.count": 2,
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/chats/19:chat/messages?$skiptoken=abc",
            "value": [
                {"id": "1", "messageType": "message"},
                {"id": "2", "messageType": "chatEvent"}
            ]
        }));

        assert_eq!(page.page.odata_count, Some(2));
        assert!(page.page.has_next_page());
        assert_eq!(
            page.next_link(),
            Some("https://graph.microsoft.com/v1.0/chats/19:chat/messages?$skiptoken=abc")
        );
        assert_eq!(page.items().len(), 2);
        assert!(page.page.additional_data.contains_key("@odata.context"));
        let ids: Vec<_> = page.into_items().into_iter().filter_map(|m| m.entity.id).collect();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn last_page_has_no_next_link() {
        let page: ChatCollectionResponse = parse(json!({"value": []}));
        assert!(!page.page.has_next_page());
        assert!(page.items().is_empty());
        let page: ChatCollectionResponse = parse(json!({}));
        assert!(page.items().is_empty());
    }

    #[test]
    fn count_must_fit_in_i64() {
        let node = JsonParseNode::from_value(json!({"@odata.count": 1.5}));
        let node: &dyn ParseNode = &node;
        let err = node.object_value::<ChatCollectionResponse>().unwrap_err();
        assert!(matches!(err, crate::Error::NumberOutOfRange { target: "i64", .. }));
    }

    #[test]
    fn response_without_marker_writes_no_discriminator() {
        let mut page = ConversationMemberCollectionResponse::new();
        page.page.odata_count = Some(0);
        page.value = Some(Vec::new());

        let mut writer = JsonSerializationWriter::new();
        {
            let writer: &mut dyn SerializationWriter = &mut writer;
            writer.write_object_value(None, &page).unwrap();
        }
        assert_eq!(writer.into_value().unwrap(), json!({"@odata.count": 0, "value": []}));
    }
}
