//! Identities and identity sets describing who or what acted on a resource.

use super::enums::{TeamworkConversationIdentityType, TeamworkUserIdentityType};

graph_model! {
    /// A user, device or application.
    pub struct Identity = "#microsoft.graph.identity" {
        display_name: String => "displayName",
        id: String => "id",
    }
}

graph_model! {
    /// A user identity in Teams, qualified by how the user signed in.
    pub struct TeamworkUserIdentity: Identity as identity = "#microsoft.graph.teamworkUserIdentity" {
        user_identity_type: TeamworkUserIdentityType => "userIdentityType",
    }
}

graph_model! {
    /// A team, channel or chat referenced as an identity.
    pub struct TeamworkConversationIdentity: Identity as identity = "#microsoft.graph.teamworkConversationIdentity" {
        conversation_identity_type: TeamworkConversationIdentityType => "conversationIdentityType",
    }
}

graph_union! {
    /// Any identity, resolved from `@odata.type`.
    pub enum AnyIdentity {
        Identity(Identity),
        TeamworkUser(TeamworkUserIdentity),
        TeamworkConversation(TeamworkConversationIdentity),
    }
}

graph_model! {
    pub struct IdentitySet = "#microsoft.graph.identitySet" {
        application: AnyIdentity => "application",
        device: AnyIdentity => "device",
        user: AnyIdentity => "user",
    }
}

graph_model! {
    /// Sender of a chat message.
    pub struct ChatMessageFromIdentitySet: IdentitySet as identity_set = "#microsoft.graph.chatMessageFromIdentitySet" {}
}

graph_model! {
    /// Target of an @mention.
    pub struct ChatMessageMentionedIdentitySet: IdentitySet as identity_set = "#microsoft.graph.chatMessageMentionedIdentitySet" {
        conversation: TeamworkConversationIdentity => "conversation",
    }
}

graph_model! {
    pub struct ChatMessageReactionIdentitySet: IdentitySet as identity_set = "#microsoft.graph.chatMessageReactionIdentitySet" {}
}

impl IdentitySet {
    /// An identity set naming a single user.
    pub fn for_user(user: impl Into<AnyIdentity>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::new()
        }
    }
}

impl TeamworkUserIdentity {
    pub fn aad_user(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let mut identity = Self::new();
        identity.identity.id = Some(id.into());
        identity.identity.display_name = Some(display_name.into());
        identity.user_identity_type = Some(TeamworkUserIdentityType::AadUser);
        identity
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::serialization::{AdditionalDataHolder, ParseNode, json::JsonParseNode};

    fn parse<T: crate::serialization::ParsableFactory>(value: serde_json::Value) -> T {
        let node = JsonParseNode::from_value(value);
        let node: &dyn ParseNode = &node;
        node.object_value::<T>().unwrap().unwrap()
    }

    #[test]
    fn derived_identity_inherits_base_fields() {
        let identity: TeamworkUserIdentity = parse(json!({
            "@odata.type": "#microsoft.graph.teamworkUserIdentity",
            "id": "8b081ef6",
            "displayName": "Adele Vance",
            "userIdentityType": "aadUser"
        }));
        assert_eq!(identity.identity.id.as_deref(), Some("8b081ef6"));
        assert_eq!(identity.identity.display_name.as_deref(), Some("Adele Vance"));
        assert_eq!(identity.user_identity_type, Some(TeamworkUserIdentityType::AadUser));
        assert_eq!(identity.odata_type(), Some(TeamworkUserIdentity::ODATA_TYPE));
    }

    #[test]
    fn identity_set_resolves_each_member_independently() {
        let set: IdentitySet = parse(json!({
            "application": {"id": "app-1", "displayName": "Bot"},
            "user": {
                "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                "id": "user-1",
                "userIdentityType": "emailUser"
            }
        }));
        assert!(matches!(set.application, Some(AnyIdentity::Identity(_))));
        assert!(set.device.is_none());
        match set.user {
            Some(AnyIdentity::TeamworkUser(user)) => {
                assert_eq!(user.user_identity_type, Some(TeamworkUserIdentityType::EmailUser));
            }
            other => panic!("expected a teamwork user identity, got {other:?}"),
        }
    }

    #[test]
    fn unknown_properties_land_in_the_shared_bag() {
        let identity: TeamworkConversationIdentity = parse(json!({
            "id": "19:chat",
            "conversationIdentityType": "chat",
            "tenantHint": "contoso"
        }));
        assert_eq!(identity.additional_data().get("tenantHint"), Some(&json!("contoso")));
        assert!(identity.identity.additional_data.contains_key("tenantHint"));
    }

    #[test]
    fn new_sets_the_most_derived_marker() {
        let set = ChatMessageMentionedIdentitySet::new();
        assert_eq!(
            set.identity_set.odata_type.as_deref(),
            Some("#microsoft.graph.chatMessageMentionedIdentitySet")
        );
        assert_eq!(IdentitySet::new().odata_type(), Some(IdentitySet::ODATA_TYPE));
    }

    #[test]
    fn for_user_wraps_the_identity() {
        let set = IdentitySet::for_user(TeamworkUserIdentity::aad_user("u1", "Megan"));
        assert_eq!(
            set.user.as_ref().and_then(AnyIdentity::odata_type),
            Some(TeamworkUserIdentity::ODATA_TYPE)
        );
    }
}
