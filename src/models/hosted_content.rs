use super::Entity;
use crate::serialization::ByteArray;

graph_model! {
    /// Inline content such as images or code snippets in a Teams message.
    pub struct TeamworkHostedContent: Entity as entity = "#microsoft.graph.teamworkHostedContent" {
        /// Raw bytes, base64 on the wire. Write-only.
        content_bytes: ByteArray => "contentBytes",
        content_type: String => "contentType",
    }
}

graph_model! {
    pub struct ChatMessageHostedContent: TeamworkHostedContent as hosted_content = "#microsoft.graph.chatMessageHostedContent" {}
}

graph_union! {
    pub enum AnyTeamworkHostedContent {
        TeamworkHostedContent(TeamworkHostedContent),
        ChatMessage(ChatMessageHostedContent),
    }
}

impl ChatMessageHostedContent {
    /// Hosted content referenced from a message body as `../hostedContents/{temporary_id}/$value`.
    pub fn inline(temporary_id: &str, content_type: impl Into<String>, bytes: impl Into<ByteArray>) -> Self {
        let mut content = Self::new();
        content.hosted_content.content_bytes = Some(bytes.into());
        content.hosted_content.content_type = Some(content_type.into());
        content.hosted_content.entity.additional_data.insert(
            "@microsoft.graph.temporaryId".to_string(),
            serde_json::Value::String(temporary_id.to_string()),
        );
        content
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::serialization::{
        ParseNode, SerializationWriter,
        json::{JsonParseNode, JsonSerializationWriter},
    };

    #[test]
    fn content_bytes_travel_as_base64() {
        let content = ChatMessageHostedContent::inline("1", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
        let mut writer = JsonSerializationWriter::new();
        {
            let writer: &mut dyn SerializationWriter = &mut writer;
            writer.write_object_value(None, &content).unwrap();
        }
        assert_eq!(
            writer.into_value().unwrap(),
            json!({
                "@odata.type": "#microsoft.graph.chatMessageHostedContent",
                "contentBytes": "iVBORw==",
                "contentType": "image/png",
                "@microsoft.graph.temporaryId": "1"
            })
        );
    }

    #[test]
    fn reads_content_bytes_back() {
        let node = JsonParseNode::from_value(json!({
            "@odata.type": "#microsoft.graph.chatMessageHostedContent",
            "contentBytes": "aGVsbG8=",
            "contentType": "text/plain"
        }));
        let node: &dyn ParseNode = &node;
        let any = node.object_value::<AnyTeamworkHostedContent>().unwrap().unwrap();
        let AnyTeamworkHostedContent::ChatMessage(content) = any else {
            panic!("expected chat message hosted content");
        };
        assert_eq!(content.hosted_content.content_bytes.as_deref().map(Vec::as_slice), Some(&b"hello"[..]));
    }

    #[test]
    fn malformed_base64_is_an_error() {
        let node = JsonParseNode::from_value(json!({"contentBytes": "not base64!"}));
        let node: &dyn ParseNode = &node;
        let err = node.object_value::<TeamworkHostedContent>().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidBase64(_)));
    }
}
