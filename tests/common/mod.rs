//! Shared payloads captured from Graph `v1.0` responses, trimmed to what the
//! tests look at.

#![allow(dead_code)]

use serde_json::{Value, json};

pub fn group_chat() -> Value {
    json!({
        "@odata.type": "#microsoft.graph.chat",
        "id": "19:8ea0e38b-efb3-4757-924a-5f94061cf8c2_97f62344-57dc-409c-88ad-c4af14158ff5@unq.gbl.spaces",
        "topic": "Project Falcon",
        "createdDateTime": "2020-12-04T23:10:28.51Z",
        "lastUpdatedDateTime": "2020-12-04T23:10:36.925Z",
        "chatType": "group",
        "webUrl": "https://teams.microsoft.com/l/chat/19%3A8ea0e38b/0?tenantId=b33cbe9f",
        "tenantId": "b33cbe9f-8ebe-4f2a-912b-7e2a427f477f",
        "isHiddenForAllMembers": false,
        "viewpoint": {
            "isHidden": false,
            "lastMessageReadDateTime": "2020-12-04T23:10:30Z"
        },
        "members": [
            {
                "@odata.type": "#microsoft.graph.aadUserConversationMember",
                "id": "MCMjMSMjYjMzY2JlOWYtOGViZS00ZjJhLTkxMmItN2UyYTQyN2Y0Nzdm",
                "roles": ["owner"],
                "displayName": "Adele Vance",
                "visibleHistoryStartDateTime": "0001-01-01T00:00:00Z",
                "userId": "8b081ef6-4792-4def-b2c9-c363a1bf41d5",
                "email": "AdeleV@contoso.com",
                "tenantId": "b33cbe9f-8ebe-4f2a-912b-7e2a427f477f"
            },
            {
                "@odata.type": "#microsoft.graph.aadUserConversationMember",
                "id": "MCMjMSMjYjMzY2JlOWYtOGViZS00ZjJhLTkxMmItN2UyYTQyN2Y0Nzdn",
                "roles": ["guest"],
                "displayName": "Megan Bowen",
                "userId": "48d31887-5fad-4d73-a9f5-3c356e68a038",
                "email": "MeganB@contoso.com",
                "tenantId": "b33cbe9f-8ebe-4f2a-912b-7e2a427f477f"
            }
        ],
        "chatViewpointExtension": {"pinned": true}
    })
}

pub fn user_message() -> Value {
    json!({
        "@odata.type": "#microsoft.graph.chatMessage",
        "id": "1616965872395",
        "replyToId": null,
        "etag": "1616965872395",
        "messageType": "message",
        "createdDateTime": "2021-03-28T21:11:12.395Z",
        "lastModifiedDateTime": "2021-03-28T21:11:12.395Z",
        "deletedDateTime": null,
        "subject": null,
        "summary": null,
        "chatId": "19:2da4c29f6d7041eca70b638b43d45437@thread.v2",
        "importance": "normal",
        "locale": "en-us",
        "webUrl": null,
        "channelIdentity": null,
        "policyViolation": null,
        "eventDetail": null,
        "from": {
            "application": null,
            "device": null,
            "user": {
                "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                "id": "8ea0e38b-efb3-4757-924a-5f94061cf8c2",
                "displayName": "Robin Kline",
                "userIdentityType": "aadUser",
                "tenantId": "e61ef81e-8bd8-476a-92e8-4a62f8426fca"
            }
        },
        "body": {
            "contentType": "html",
            "content": "<div>Hello <at id=\"0\">Adele</at></div>"
        },
        "attachments": [],
        "mentions": [
            {
                "id": 0,
                "mentionText": "Adele",
                "mentioned": {
                    "application": null,
                    "device": null,
                    "conversation": null,
                    "user": {
                        "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                        "id": "8b081ef6-4792-4def-b2c9-c363a1bf41d5",
                        "displayName": "Adele Vance",
                        "userIdentityType": "aadUser"
                    }
                }
            }
        ],
        "reactions": [
            {
                "reactionType": "like",
                "displayName": "Like",
                "reactionContentUrl": null,
                "createdDateTime": "2021-03-28T21:12:00.1Z",
                "user": {
                    "application": null,
                    "device": null,
                    "user": {
                        "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                        "id": "48d31887-5fad-4d73-a9f5-3c356e68a038",
                        "displayName": null,
                        "userIdentityType": "aadUser"
                    }
                }
            }
        ],
        "messageHistory": [
            {
                "modifiedDateTime": "2021-03-28T21:12:00.1Z",
                "actions": "reactionAdded",
                "reaction": {
                    "reactionType": "like",
                    "createdDateTime": "2021-03-28T21:12:00.1Z",
                    "user": {"user": {"id": "48d31887-5fad-4d73-a9f5-3c356e68a038"}}
                }
            }
        ]
    })
}

pub fn call_ended_message() -> Value {
    json!({
        "id": "1616963377068",
        "messageType": "systemEventMessage",
        "createdDateTime": "2021-03-28T20:29:37.068Z",
        "body": {"contentType": "html", "content": "<systemEventMessage/>"},
        "eventDetail": {
            "@odata.type": "#microsoft.graph.callEndedEventMessageDetail",
            "callId": "af630fe0-04d3-4559-8cf9-91fe45e36296",
            "callDuration": "PT1S",
            "callEventType": "call",
            "callParticipants": [
                {
                    "participant": {
                        "application": null,
                        "device": null,
                        "user": {
                            "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                            "id": "8ea0e38b-efb3-4757-924a-5f94061cf8c2",
                            "displayName": "Robin Kline",
                            "userIdentityType": "aadUser"
                        }
                    }
                }
            ],
            "initiator": {
                "application": null,
                "device": null,
                "user": {
                    "@odata.type": "#microsoft.graph.teamworkUserIdentity",
                    "id": "8ea0e38b-efb3-4757-924a-5f94061cf8c2",
                    "userIdentityType": "aadUser"
                }
            }
        }
    })
}

pub fn message_page() -> Value {
    json!({
        "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#chats('19%3A2da4c29f6d7041eca70b638b43d45437%40thread.v2')/messages",
        "@odata.count": 2,
        "@odata.nextLink": "https://graph.microsoft.com/v1.0/chats/19:2da4c29f6d7041eca70b638b43d45437@thread.v2/messages?$top=2&$skiptoken=M2UyOTdhNWQ5",
        "value": [user_message(), call_ended_message()]
    })
}

pub fn to_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("fixture serializes")
}

pub fn to_value(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("output is valid json")
}
