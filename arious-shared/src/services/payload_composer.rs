use std::collections::BTreeMap;
use crate::models::notifications::{
    AndroidConfig, AndroidNotification, ApnsConfig, ApnsHeaders, ApnsPayload, Aps, NotificationRequest,
    NotificationType, PlatformPayload, VisibleNotification,
};
use crate::utilities::fields::data;

const ANDROID_PRIORITY: &str = "high";
const ANDROID_NOTIFICATION_PRIORITY: &str = "PRIORITY_HIGH";
const APNS_PRIORITY: &str = "10";
const APNS_PUSH_TYPE: &str = "alert";
const DEFAULT_SOUND: &str = "default";

struct ChannelProfile {
    android_channel: &'static str,
    android_sound: &'static str,
    ios_sound: &'static str,
}

fn channel_profile(notification_type: NotificationType) -> ChannelProfile {
    match notification_type {
        NotificationType::Call => ChannelProfile {
            android_channel: "calls_channel",
            android_sound: "ringtone",
            ios_sound: "ringtone.wav",
        },
        NotificationType::Message => ChannelProfile {
            android_channel: "messages_channel",
            android_sound: DEFAULT_SOUND,
            ios_sound: DEFAULT_SOUND,
        },
    }
}

/// Builds the payload for one request.
///
/// When the recipient is already viewing the chat (`is_active`) the visible alert and badge
/// are dropped, but the sound and data block are kept and the push is marked
/// `content-available` so the client can process it silently. Calls are always
/// `content-available` so the call UI can wake in any app state.
pub fn compose_payload(request: &NotificationRequest, is_active: bool) -> PlatformPayload {
    let kind = request.notification_type;
    let profile = channel_profile(kind);

    let display_body = if request.body.is_empty() {
        kind.default_body().to_string()
    } else {
        request.body.clone()
    };

    let visible = (!is_active).then(|| VisibleNotification {
        title: request.title.clone(),
        body: display_body,
    });

    let silent_message = is_active && kind == NotificationType::Message;
    let content_available = (silent_message || kind == NotificationType::Call).then_some(1);

    PlatformPayload {
        notification: visible.clone(),
        data: data_block(request),
        android: AndroidConfig {
            priority: ANDROID_PRIORITY.to_string(),
            notification: AndroidNotification {
                channel_id: profile.android_channel.to_string(),
                sound: profile.android_sound.to_string(),
                notification_priority: ANDROID_NOTIFICATION_PRIORITY.to_string(),
            },
        },
        apns: ApnsConfig {
            headers: ApnsHeaders {
                priority: APNS_PRIORITY.to_string(),
                push_type: APNS_PUSH_TYPE.to_string(),
            },
            payload: ApnsPayload {
                aps: Aps {
                    alert: visible,
                    sound: profile.ios_sound.to_string(),
                    badge: (!is_active).then_some(1),
                    content_available,
                },
            },
        },
    }
}

fn data_block(request: &NotificationRequest) -> BTreeMap<String, String> {
    let mut block = BTreeMap::from([(data::TYPE.to_string(), request.notification_type.as_str().to_string())]);

    let optional = [
        (data::CHAT_ID, &request.chat_id),
        (data::MESSAGE_ID, &request.message_id),
        (data::SENDER_ID, &request.sender_id),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            block.insert(key.to_string(), value.clone());
        }
    }

    if let Some(call) = &request.call {
        block.insert(data::CALL.to_string(), call.to_string());
    }

    block
}
