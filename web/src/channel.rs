use std::cell::RefCell;
use std::rc::Rc;

use minegrid_core::{ChannelEvent, SessionAddress, Transport, TransportError};
use minegrid_protocol::Endpoints;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, Url, WebSocket};
use yew::Callback;

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(Event)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// Browser WebSocket speaking text frames. Every socket callback is turned
/// into a [`ChannelEvent`] on `on_event`.
pub(crate) struct WsTransport {
    ws: WebSocket,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport")
            .field("url", &self.ws.url())
            .field("ready_state", &self.ws.ready_state())
            .finish()
    }
}

/// `{ws_base}/ws/game/{code}/?user={identity}` with the name URL-encoded.
pub(crate) fn session_url(endpoints: &Endpoints, address: &SessionAddress) -> Result<String, TransportError> {
    let url = Url::new(&endpoints.session_url(&address.code))
        .map_err(|err| TransportError::Connect(format!("{err:?}")))?;
    url.search_params().append("user", address.identity.as_str());
    Ok(url.href())
}

impl WsTransport {
    pub(crate) fn connect(
        endpoints: &Endpoints,
        address: &SessionAddress,
        on_event: Callback<ChannelEvent>,
    ) -> Result<Self, TransportError> {
        let url = session_url(endpoints, address)?;
        let ws = WebSocket::new(&url).map_err(|err| TransportError::Connect(format!("{err:?}")))?;
        log::debug!("websocket connecting to {url}");

        let handlers = Rc::new(RefCell::new(None));

        let onopen = {
            let on_event = on_event.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                on_event.emit(ChannelEvent::Opened);
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let on_event = on_event.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    log::debug!("ignoring non-text frame");
                    return;
                };
                on_event.emit(ChannelEvent::Message(text));
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let on_event = on_event.clone();
            let url = url.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                on_event.emit(ChannelEvent::Errored(format!("websocket error on {url}")));
            }) as Box<dyn FnMut(Event)>)
        };
        let onclose = {
            let handlers = handlers.clone();
            Closure::wrap(Box::new(move |event: Event| {
                let (code, reason) = event
                    .dyn_ref::<CloseEvent>()
                    .map_or((0, String::new()), |close| (close.code(), close.reason()));
                // take the handlers out first so the emit below may close us
                let _handlers = handlers.borrow_mut().take();
                on_event.emit(ChannelEvent::Closed { code, reason });
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });

        Ok(Self { ws, handlers })
    }

    fn detach(&self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        self.handlers.borrow_mut().take();
    }
}

impl Transport for WsTransport {
    fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
        if self.ws.ready_state() != WebSocket::OPEN {
            return Err(TransportError::NotOpen);
        }
        self.ws
            .send_with_str(text)
            .map_err(|err| TransportError::Rejected(format!("{err:?}")))
    }

    fn close(&mut self) {
        self.detach();
        if let Err(err) = self.ws.close() {
            log::debug!("websocket close failed: {err:?}");
        }
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.close();
    }
}
