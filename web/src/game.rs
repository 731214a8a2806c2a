use gloo::timers::callback::Interval;
use minegrid_core::{ChannelEvent, Identity, SessionSlot};
use minegrid_protocol::{BoardSnapshot, Coord2, Endpoints};
use yew::prelude::*;

use crate::api;
use crate::board::{Board, CellHandlers, UserList};
use crate::channel::WsTransport;
use crate::identity;

const TICK_MILLIS: u32 = 1_000;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub code: String,
    pub endpoints: Endpoints,
}

/// Everything asynchronous carries the epoch of the mount that started it;
/// anything from an older mount is dropped.
pub(crate) enum Msg {
    Fetched {
        epoch: u64,
        result: anyhow::Result<BoardSnapshot>,
    },
    Channel {
        epoch: u64,
        event: ChannelEvent,
    },
    Tick {
        epoch: u64,
    },
    Reveal(Coord2),
    Flag(Coord2),
}

#[derive(Debug)]
pub(crate) struct GameView {
    identity: Option<Identity>,
    slot: SessionSlot<WsTransport>,
    timer_interval: Option<Interval>,
}

impl GameView {
    fn mount_session(&mut self, ctx: &Context<Self>) {
        self.timer_interval = None;

        let GameProps { code, endpoints } = ctx.props();
        let link = ctx.link().clone();
        let epoch = self.slot.remount(code, self.identity.clone(), |epoch, address| {
            let on_event = link.callback(move |event: ChannelEvent| Msg::Channel { epoch, event });
            WsTransport::connect(endpoints, address, on_event)
        });

        if self.slot.session().is_none() {
            return;
        }

        let endpoints = endpoints.clone();
        let code = code.clone();
        ctx.link().send_future(async move {
            let result = api::fetch_snapshot(&endpoints, &code).await;
            Msg::Fetched { epoch, result }
        });
    }

    fn teardown(&mut self) {
        self.timer_interval = None;
        self.slot.unmount();
    }

    /// Keeps the one-second interval alive exactly while the session's timer
    /// is running.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let running = self
            .slot
            .session()
            .is_some_and(|session| session.timer_running());

        match (running, self.timer_interval.is_some()) {
            (true, false) => {
                let link = ctx.link().clone();
                let epoch = self.slot.epoch();
                self.timer_interval = Some(Interval::new(TICK_MILLIS, move || {
                    link.send_message(Msg::Tick { epoch })
                }));
            }
            (false, true) => {
                log::debug!("display timer stopped");
                self.timer_interval = None;
            }
            _ => {}
        }
    }

    fn handlers(ctx: &Context<Self>) -> CellHandlers {
        CellHandlers {
            reveal: ctx.link().callback(Msg::Reveal),
            flag: ctx.link().callback(Msg::Flag),
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            identity: identity::resolve(),
            slot: SessionSlot::default(),
            timer_interval: None,
        };
        view.mount_session(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Fetched { epoch, result } => match (self.slot.current(epoch), result) {
                (Some(session), Ok(snapshot)) => session.apply_initial_snapshot(snapshot),
                (Some(session), Err(err)) => {
                    log::warn!("initial snapshot fetch failed: {err:#}");
                    session.initial_fetch_failed();
                    false
                }
                (None, _) => false,
            },
            Channel { epoch, event } => self
                .slot
                .current(epoch)
                .is_some_and(|session| session.handle_channel_event(event)),
            Tick { epoch } => self.slot.current(epoch).is_some_and(|session| session.tick()),
            Reveal((row, column)) => {
                if let Some(session) = self.slot.session_mut() {
                    session.reveal(row, column);
                }
                false
            }
            Flag((row, column)) => {
                if let Some(session) = self.slot.session_mut() {
                    session.flag(row, column);
                }
                false
            }
        };

        self.sync_timer(ctx);
        updated
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() == old_props {
            return false;
        }
        log::debug!("session changed from {} to {}", old_props.code, ctx.props().code);
        self.mount_session(ctx);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.slot.session() else {
            return html! {};
        };
        let Some(view) = session.board_view() else {
            return html! { <main class="session loading"/> };
        };

        let handlers = Some(Self::handlers(ctx));
        let names = session.presence_labels();

        html! {
            <main class="session">
                <Board {view} {handlers}/>
                <UserList {names}/>
            </main>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.teardown();
    }
}
