use minegrid_protocol::{Difficulty, Endpoints};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::route::Route;

pub(crate) const SLOGAN: &str = "Can you uncover all the mines without triggering a blast?";

#[derive(Properties, PartialEq)]
pub(crate) struct LobbyProps {
    pub endpoints: Endpoints,
}

#[function_component]
pub(crate) fn Lobby(props: &LobbyProps) -> Html {
    let pending = use_state(|| false);

    let buttons = Difficulty::ALL.into_iter().map(|difficulty| {
        let onclick = {
            let endpoints = props.endpoints.clone();
            let pending = pending.clone();
            Callback::from(move |_: MouseEvent| {
                if *pending {
                    return;
                }
                pending.set(true);
                let endpoints = endpoints.clone();
                let pending = pending.clone();
                spawn_local(async move {
                    match api::create_game(&endpoints, difficulty).await {
                        Ok(code) => {
                            log::info!("created game {code} ({})", difficulty.label());
                            Route::Game { code }.navigate();
                        }
                        Err(err) => {
                            log::error!("could not create game: {err:#}");
                            pending.set(false);
                        }
                    }
                });
            })
        };
        html! {
            <button {onclick} disabled={*pending}>{difficulty.label()}</button>
        }
    });

    html! {
        <main class="lobby">
            <p>{SLOGAN}</p>
            <fieldset>
                <legend>{"Create a Game"}</legend>
                {for buttons}
            </fieldset>
        </main>
    }
}
