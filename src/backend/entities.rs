//! Wire entities of the campaign backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community hosting a time-limited posting campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Countdown restart duration in minutes; null means the caller's
    /// fallback applies
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bounty_amount: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default, rename = "imageURL")]
    pub image_url: Option<String>,
}

/// A single post in a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: i64,
    pub content: String,
    #[serde(default, rename = "imageURL")]
    pub image_url: Option<String>,
    pub wallet_address: String,
    pub sender_id: String,
    pub community_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_deserializes_backend_json() {
        let json = r#"{
            "id": "a485968a-751d-4545-9bbb-740d55875707",
            "name": "pulse",
            "description": "post to keep the timer alive",
            "createdAt": "2025-04-01T08:00:00Z",
            "creatorId": "u-1",
            "lastMessageTime": null,
            "contractAddress": null,
            "bountyAmount": "5000",
            "timeLimit": 180,
            "baseFeePercentage": null,
            "walletAddress": null,
            "imageURL": "https://example.com/pulse.png"
        }"#;

        let community: Community = serde_json::from_str(json).unwrap();
        assert_eq!(community.name, "pulse");
        assert_eq!(community.time_limit, Some(180));
        assert!(community.last_message_time.is_none());
        assert_eq!(
            community.image_url.as_deref(),
            Some("https://example.com/pulse.png")
        );
    }

    #[test]
    fn missing_time_limit_is_none() {
        let json = r#"{
            "id": "c-2",
            "name": "orca",
            "createdAt": "2025-04-01T08:00:00Z"
        }"#;

        let community: Community = serde_json::from_str(json).unwrap();
        assert!(community.time_limit.is_none());
    }

    #[test]
    fn content_deserializes_backend_json() {
        let json = r#"{
            "id": 42,
            "content": "gm",
            "imageURL": null,
            "walletAddress": "0x1234567890abcdef1234567890abcdef12345678",
            "senderId": "24c4684b-0fe0-4d22-bffc-4727457e2e7a",
            "communityId": "c-2",
            "createdAt": "2025-05-14T11:59:30Z"
        }"#;

        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content.id, 42);
        assert_eq!(content.community_id, "c-2");
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let json = r#"{
            "id": "c-3",
            "name": "soon",
            "createdAt": "not-a-date"
        }"#;

        assert!(serde_json::from_str::<Community>(json).is_err());
    }
}
