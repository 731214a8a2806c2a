//! HTTP calls to the game server.

use anyhow::{Context, bail};
use gloo::net::http::Request;
use minegrid_protocol::{BoardSnapshot, Difficulty, Endpoints, NewGameResponse};

/// One-off snapshot used to seed a session view before realtime updates.
pub(crate) async fn fetch_snapshot(endpoints: &Endpoints, code: &str) -> anyhow::Result<BoardSnapshot> {
    let url = endpoints.game_url(code);
    let resp = Request::get(&url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;
    if !resp.ok() {
        bail!("GET {url} failed: {}", resp.status());
    }
    resp.json::<BoardSnapshot>()
        .await
        .with_context(|| format!("decoding snapshot of {code}"))
}

/// Creates a session with the preset size and returns its code.
pub(crate) async fn create_game(endpoints: &Endpoints, difficulty: Difficulty) -> anyhow::Result<String> {
    let url = endpoints.new_game_url();
    let resp = Request::post(&url)
        .json(&difficulty.request())
        .context("encoding game request")?
        .send()
        .await
        .with_context(|| format!("POST {url}"))?;
    if !resp.ok() {
        bail!("POST {url} failed: {}", resp.status());
    }
    let NewGameResponse { code } = resp.json().await.context("decoding new game response")?;
    Ok(code)
}
