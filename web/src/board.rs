use minegrid_core::{BoardView, CellActions, CellView, Gesture, PRESENCE_TITLE, handle_gesture};
use minegrid_protocol::Coord2;
use yew::prelude::*;

/// Reveal and flag entry points handed down to every cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellHandlers {
    pub reveal: Callback<Coord2>,
    pub flag: Callback<Coord2>,
}

impl CellActions for CellHandlers {
    fn reveal(&self, row: usize, column: usize) {
        self.reveal.emit((row, column));
    }

    fn flag(&self, row: usize, column: usize) {
        self.flag.emit((row, column));
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    view: CellView,
    game_finished: bool,
    #[prop_or_default]
    handlers: Option<CellHandlers>,
}

#[function_component(CellComponent)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        view,
        game_finished,
        handlers,
    } = props.clone();

    let class = classes!(view.tags.class_names());
    let cell = view.cell;

    let onclick = {
        let handlers = handlers.clone();
        Callback::from(move |_: MouseEvent| {
            let response = handle_gesture(Gesture::Primary, &cell, game_finished, handlers.as_ref());
            if let Some(kind) = response.dispatched {
                log::trace!("({}, {}) click dispatched {kind:?}", cell.row, cell.column);
            }
        })
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        let response = handle_gesture(Gesture::Secondary, &cell, game_finished, handlers.as_ref());
        if response.prevent_default {
            e.prevent_default();
        }
    });

    html! {
        <td {class} {onclick} {oncontextmenu}>{view.glyph.to_string()}</td>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BoardProps {
    pub view: BoardView,
    #[prop_or_default]
    pub handlers: Option<CellHandlers>,
}

#[function_component]
pub(crate) fn Board(props: &BoardProps) -> Html {
    let BoardView {
        greeting,
        elapsed,
        banner,
        game_finished,
        started_at,
        rows,
    } = &props.view;
    let game_finished = *game_finished;
    let title = started_at.map(|started_at| format!("started {}", started_at.to_rfc3339()));

    html! {
        <section class="session">
            <header>
                <h2>{greeting.clone()}</h2>
                <h3 {title}>{format!("⏰ {elapsed}")}</h3>
                <h3>{*banner}</h3>
            </header>
            <table class={classes!("board", game_finished.then_some("finished"))}>
                {
                    for rows.iter().map(|row| html! {
                        <tr>
                            {
                                for row.iter().map(|view| html! {
                                    <CellComponent
                                        view={view.clone()}
                                        {game_finished}
                                        handlers={props.handlers.clone()}
                                    />
                                })
                            }
                        </tr>
                    })
                }
            </table>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct UserListProps {
    pub names: Vec<String>,
}

#[function_component]
pub(crate) fn UserList(props: &UserListProps) -> Html {
    html! {
        <aside class="users">
            <h3>{PRESENCE_TITLE}</h3>
            <ul>
                { for props.names.iter().map(|name| html! { <li>{name.clone()}</li> }) }
            </ul>
        </aside>
    }
}
