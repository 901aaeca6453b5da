//! Payloads of system event messages (`messageType = systemEventMessage`).

use chrono::{DateTime, TimeDelta, Utc};

use super::{IdentitySet, TeamworkCallEventType, TeamworkUserIdentity};

graph_model! {
    pub struct EventMessageDetail = "#microsoft.graph.eventMessageDetail" {}
}

graph_model! {
    pub struct CallParticipantInfo = "#microsoft.graph.callParticipantInfo" {
        participant: IdentitySet => "participant",
    }
}

graph_model! {
    pub struct CallEndedEventMessageDetail: EventMessageDetail as detail = "#microsoft.graph.callEndedEventMessageDetail" {
        /// Duration of the call, ISO 8601 on the wire.
        call_duration: TimeDelta => "callDuration",
        call_event_type: TeamworkCallEventType => "callEventType",
        call_id: String => "callId",
        call_participants: Vec<CallParticipantInfo> => "callParticipants",
        initiator: IdentitySet => "initiator",
    }
}

graph_model! {
    pub struct ChatRenamedEventMessageDetail: EventMessageDetail as detail = "#microsoft.graph.chatRenamedEventMessageDetail" {
        chat_display_name: String => "chatDisplayName",
        chat_id: String => "chatId",
        initiator: IdentitySet => "initiator",
    }
}

graph_model! {
    pub struct MembersAddedEventMessageDetail: EventMessageDetail as detail = "#microsoft.graph.membersAddedEventMessageDetail" {
        initiator: IdentitySet => "initiator",
        members: Vec<TeamworkUserIdentity> => "members",
        visible_history_start_date_time: DateTime<Utc> => "visibleHistoryStartDateTime",
    }
}

graph_union! {
    /// Any event detail, resolved from `@odata.type`.
    pub enum AnyEventMessageDetail {
        EventMessageDetail(EventMessageDetail),
        CallEnded(CallEndedEventMessageDetail),
        ChatRenamed(ChatRenamedEventMessageDetail),
        MembersAdded(MembersAddedEventMessageDetail),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::serialization::{ParseNode, json::JsonParseNode};

    fn parse(value: serde_json::Value) -> crate::Result<Option<AnyEventMessageDetail>> {
        let node = JsonParseNode::from_value(value);
        let node: &dyn ParseNode = &node;
        node.object_value::<AnyEventMessageDetail>()
    }

    #[test]
    fn call_ended_reads_duration_and_participants() {
        let detail = parse(json!({
            "@odata.type": "#microsoft.graph.callEndedEventMessageDetail",
            "callId": "call-1",
            "callDuration": "PT1H2M3S",
            "callEventType": "meeting",
            "callParticipants": [
                {"participant": {"user": {"id": "u1", "displayName": "Adele"}}},
                null
            ]
        }))
        .unwrap()
        .unwrap();

        let AnyEventMessageDetail::CallEnded(call) = detail else {
            panic!("expected call ended detail");
        };
        assert_eq!(call.call_duration, Some(TimeDelta::seconds(3723)));
        assert_eq!(call.call_event_type, Some(TeamworkCallEventType::Meeting));
        let participants = call.call_participants.unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(
            participants[0]
                .participant
                .as_ref()
                .and_then(|set| set.user.as_ref())
                .and_then(|user| user.odata_type()),
            None
        );
    }

    #[test]
    fn members_added_reads_user_identities() {
        let detail = parse(json!({
            "@odata.type": "#microsoft.graph.membersAddedEventMessageDetail",
            "members": [{"id": "u2", "userIdentityType": "aadUser"}],
            "visibleHistoryStartDateTime": "0001-01-01T00:00:00Z"
        }))
        .unwrap()
        .unwrap();

        let AnyEventMessageDetail::MembersAdded(added) = detail else {
            panic!("expected members added detail");
        };
        let members = added.members.unwrap();
        assert_eq!(members[0].identity.id.as_deref(), Some("u2"));
        assert!(added.visible_history_start_date_time.is_some());
    }

    #[test]
    fn unknown_enum_value_fails_the_parse() {
        let err = parse(json!({
            "@odata.type": "#microsoft.graph.callEndedEventMessageDetail",
            "callEventType": "broadcast"
        }))
        .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidEnumValue(ref e) if e.value == "broadcast"));
    }

    #[test]
    fn calendar_durations_are_rejected() {
        let err = parse(json!({
            "@odata.type": "#microsoft.graph.callEndedEventMessageDetail",
            "callDuration": "P1M"
        }))
        .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidDuration { .. }));
    }

    #[test]
    fn unrecognized_detail_keeps_its_properties() {
        let detail = parse(json!({
            "@odata.type": "#microsoft.graph.teamRenamedEventMessageDetail",
            "teamDisplayName": "Marketing"
        }))
        .unwrap()
        .unwrap();
        let AnyEventMessageDetail::EventMessageDetail(base) = detail else {
            panic!("expected base detail");
        };
        assert_eq!(base.odata_type(), Some("#microsoft.graph.teamRenamedEventMessageDetail"));
        assert_eq!(base.additional_data["teamDisplayName"], json!("Marketing"));
    }
}
