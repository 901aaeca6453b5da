use chrono::{DateTime, Utc};

use super::Entity;

graph_model! {
    /// A member of a team, channel or chat.
    pub struct ConversationMember: Entity as entity = "#microsoft.graph.conversationMember" {
        display_name: String => "displayName",
        /// Roles such as `owner` or `guest`.
        roles: Vec<String> => "roles",
        /// Earliest point from which the member can see shared history.
        visible_history_start_date_time: DateTime<Utc> => "visibleHistoryStartDateTime",
    }
}

graph_model! {
    /// A Microsoft Entra user in a chat or channel.
    pub struct AadUserConversationMember: ConversationMember as member = "#microsoft.graph.aadUserConversationMember" {
        email: String => "email",
        tenant_id: String => "tenantId",
        user_id: String => "userId",
    }
}

graph_union! {
    pub enum AnyConversationMember {
        ConversationMember(ConversationMember),
        AadUser(AadUserConversationMember),
    }
}

impl AadUserConversationMember {
    /// A member reference suitable for adding a user to a chat.
    ///
    /// The user is bound through `user@odata.bind`, which travels as
    /// additional data.
    pub fn bind_user(user_id: &str, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut member = Self::new();
        member.member.roles = Some(roles.into_iter().map(Into::into).collect());
        member.member.entity.additional_data.insert(
            "user@odata.bind".to_string(),
            serde_json::Value::String(format!("https://graph.microsoft.com/v1.0/users('{user_id}')")),
        );
        member
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::serialization::{Parsable, SerializationWriter, json::JsonSerializationWriter};

    fn to_json(value: &dyn Parsable) -> serde_json::Value {
        let mut writer = JsonSerializationWriter::new();
        let writer_dyn: &mut dyn SerializationWriter = &mut writer;
        writer_dyn.write_object_value(None, value).unwrap();
        writer.into_value().unwrap()
    }

    #[test]
    fn serializes_base_fields_before_derived_fields() {
        let mut member = AadUserConversationMember::new();
        member.member.entity.id = Some("m1".into());
        member.member.display_name = Some("Adele Vance".into());
        member.member.roles = Some(vec!["owner".into()]);
        member.user_id = Some("u1".into());

        let encoded = serde_json::to_string(&to_json(&member)).unwrap();
        assert_eq!(
            encoded,
            r##"{"@odata.type":"#microsoft.graph.aadUserConversationMember","id":"m1","displayName":"Adele Vance","roles":["owner"],"userId":"u1"}"##
        );
    }

    #[test]
    fn bind_user_writes_the_binding_after_declared_fields() {
        let member = AadUserConversationMember::bind_user("8b081ef6", ["owner"]);
        assert_eq!(
            to_json(&member),
            json!({
                "@odata.type": "#microsoft.graph.aadUserConversationMember",
                "roles": ["owner"],
                "user@odata.bind": "https://graph.microsoft.com/v1.0/users('8b081ef6')"
            })
        );
    }

    #[test]
    fn union_converts_from_concrete_members() {
        let any: AnyConversationMember = AadUserConversationMember::new().into();
        assert_eq!(any.odata_type(), Some(AadUserConversationMember::ODATA_TYPE));
        let any: AnyConversationMember = ConversationMember::default().into();
        assert_eq!(any.odata_type(), None);
    }

    #[test]
    fn default_built_variant_round_trips_as_itself() {
        let mut member = AadUserConversationMember::default();
        member.user_id = Some("u1".into());
        let any: AnyConversationMember = member.into();

        let bytes = crate::serialize_json(&any).unwrap();
        let decoded: AnyConversationMember = crate::deserialize_json(&bytes).unwrap();
        assert_eq!(decoded, any);
    }

    #[test]
    fn directly_wrapped_variant_still_writes_its_marker() {
        let mut member = AadUserConversationMember::default();
        member.user_id = Some("u1".into());
        let any = AnyConversationMember::AadUser(member);

        assert_eq!(
            to_json(&any),
            json!({"@odata.type": "#microsoft.graph.aadUserConversationMember", "userId": "u1"})
        );
        let decoded: AnyConversationMember =
            crate::deserialize_json(&crate::serialize_json(&any).unwrap()).unwrap();
        assert!(matches!(decoded, AnyConversationMember::AadUser(ref m) if m.user_id.as_deref() == Some("u1")));
    }
}
