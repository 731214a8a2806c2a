use minegrid_protocol::Endpoints;
use yew::prelude::*;

use crate::game::GameView;
use crate::lobby::Lobby;
use crate::route::Route;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub endpoints: Endpoints,
}

#[function_component]
pub(crate) fn App(props: &AppProps) -> Html {
    let endpoints = props.endpoints.clone();

    match Route::current() {
        Route::Lobby => html! { <Lobby {endpoints}/> },
        Route::Game { code } => html! { <GameView {code} {endpoints}/> },
        Route::NotFound => html! {
            <main class="not-found">
                <p>{"No such page."}</p>
                <a href={Route::Lobby.path()}>{"Back to the lobby"}</a>
            </main>
        },
    }
}
