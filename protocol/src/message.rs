use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Envelopes pushed by the server over the realtime channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    #[serde(rename = "update.map")]
    UpdateMap { map: BoardSnapshot },
    #[serde(rename = "user.list")]
    UserList {
        #[serde(deserialize_with = "present_names")]
        users: Vec<String>,
    },
}

impl ServerMsg {
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UpdateMap { .. } => "update.map",
            Self::UserList { .. } => "user.list",
        }
    }
}

/// Intents sent to the server. Fire-and-forget: the only answer is a later
/// `update.map` broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMsg {
    Reveal {
        row: usize,
        column: usize,
        user: String,
    },
    Flag {
        row: usize,
        column: usize,
        user: String,
    },
}

impl ClientMsg {
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn position(&self) -> Coord2 {
        match *self {
            Self::Reveal { row, column, .. } | Self::Flag { row, column, .. } => (row, column),
        }
    }
}

// Peers that connected without a user parameter show up as `null`.
fn present_names<'de, D>(deserializer: D) -> core::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<Option<String>>::deserialize(deserializer)?;
    Ok(names.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_user_list() {
        let msg = ServerMsg::decode(r#"{"type": "user.list", "users": ["ann", null, "bob"]}"#)
            .unwrap();

        assert_eq!(
            msg,
            ServerMsg::UserList {
                users: vec!["ann".to_string(), "bob".to_string()]
            }
        );
        assert_eq!(msg.kind(), "user.list");
    }

    #[test]
    fn decodes_map_update() {
        let text = r#"{"type": "update.map", "map": {
            "map": [[{"row": 0, "column": 0, "is_mine": false, "is_revealed": false,
                      "is_flagged": false, "adjacent_mines": 0}]],
            "state": "won", "code": "abc123", "started_at": "2024-03-01T10:00:00+00:00",
            "total_time_in_seconds": 42.0}}"#;

        let ServerMsg::UpdateMap { map } = ServerMsg::decode(text).unwrap() else {
            panic!("expected update.map");
        };

        assert_eq!(map.state, SessionState::Won);
        assert_eq!(map.total_time_in_seconds, 42);
    }

    #[test]
    fn unknown_envelope_type_is_an_error() {
        assert!(ServerMsg::decode(r#"{"type": "chat.message", "text": "hi"}"#).is_err());
        assert!(ServerMsg::decode(r#"{"error": "Invalid JSON"}"#).is_err());
        assert!(ServerMsg::decode("not json").is_err());
    }

    #[test]
    fn encodes_reveal_intent() {
        let msg = ClientMsg::Reveal {
            row: 3,
            column: 4,
            user: "ann".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&msg.encode().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"type": "reveal", "row": 3, "column": 4, "user": "ann"})
        );
        assert_eq!(msg.position(), (3, 4));
    }

    #[test]
    fn encodes_flag_intent() {
        let msg = ClientMsg::Flag {
            row: 0,
            column: 1,
            user: "bob".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&msg.encode().unwrap()).unwrap();

        assert_eq!(value["type"], "flag");
        assert_eq!(value["user"], "bob");
    }
}
