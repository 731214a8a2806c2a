use serde::{Deserialize, Serialize};

/// Base addresses of the game server's HTTP API and realtime endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    api_base: String,
    ws_base: String,
}

impl Endpoints {
    pub const DEFAULT_API_BASE: &'static str = "http://localhost:5000";
    pub const DEFAULT_WS_BASE: &'static str = "ws://localhost:5000";

    pub fn new(api_base: &str, ws_base: &str) -> Self {
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            ws_base: ws_base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn ws_base(&self) -> &str {
        &self.ws_base
    }

    pub fn new_game_url(&self) -> String {
        format!("{}/game/new", self.api_base)
    }

    pub fn game_url(&self, code: &str) -> String {
        format!("{}/game/{code}", self.api_base)
    }

    /// Realtime address for `code`, without the `user` query parameter.
    pub fn session_url(&self, code: &str) -> String {
        format!("{}/ws/game/{code}/", self.ws_base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(Self::DEFAULT_API_BASE, Self::DEFAULT_WS_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.new_game_url(), "http://localhost:5000/game/new");
        assert_eq!(endpoints.game_url("abc123"), "http://localhost:5000/game/abc123");
        assert_eq!(
            endpoints.session_url("abc123"),
            "ws://localhost:5000/ws/game/abc123/"
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let endpoints = Endpoints::new("https://api.example.test/ ", "wss://rt.example.test//");
        assert_eq!(endpoints.api_base(), "https://api.example.test");
        assert_eq!(endpoints.session_url("q"), "wss://rt.example.test/ws/game/q/");
    }
}
