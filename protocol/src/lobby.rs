use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn request(self) -> NewGameRequest {
        use Difficulty::*;
        match self {
            Easy => NewGameRequest::new(9, 9, 10),
            Medium => NewGameRequest::new(16, 16, 40),
            Hard => NewGameRequest::new(24, 24, 99),
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }
}

/// Body of the game-creation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub rows: u16,
    pub columns: u16,
    pub mines: u16,
}

impl NewGameRequest {
    pub const fn new(rows: u16, columns: u16, mines: u16) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_preset_payload() {
        let body = serde_json::to_value(Difficulty::Easy.request()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"rows": 9, "columns": 9, "mines": 10})
        );
    }

    #[test]
    fn presets_match_classic_sizes() {
        assert_eq!(Difficulty::Medium.request(), NewGameRequest::new(16, 16, 40));
        assert_eq!(Difficulty::Hard.request(), NewGameRequest::new(24, 24, 99));
    }

    #[test]
    fn response_carries_code() {
        let response: NewGameResponse = serde_json::from_str(r#"{"code": "abc123"}"#).unwrap();
        assert_eq!(response.code, "abc123");
    }
}
