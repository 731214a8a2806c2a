use minegrid_protocol::{ClientMsg, ServerMsg};

use crate::*;

/// Connecting -> Open -> Closed. Connecting may jump straight to Closed when
/// the handshake fails. Closed is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// What a transport reports back, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    Message(String),
    Errored(String),
    Closed { code: u16, reason: String },
}

/// A live text-frame connection. Dropping or closing it must release every
/// callback it registered.
pub trait Transport {
    fn send_text(&mut self, text: &str) -> Result<(), TransportError>;
    fn close(&mut self);
}

/// The pair a channel is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionAddress {
    pub code: String,
    pub identity: Identity,
}

/// Realtime connection to one session. Owns only transport-level state.
#[derive(Debug)]
pub struct SessionChannel<T: Transport> {
    address: SessionAddress,
    transport: Option<T>,
    state: ChannelState,
}

impl<T: Transport> SessionChannel<T> {
    pub fn open<F>(address: SessionAddress, connect: F) -> Self
    where
        F: FnOnce(&SessionAddress) -> Result<T, TransportError>,
    {
        match connect(&address) {
            Ok(transport) => {
                log::debug!("connecting to session {} as {}", address.code, address.identity);
                Self {
                    address,
                    transport: Some(transport),
                    state: ChannelState::Connecting,
                }
            }
            Err(err) => {
                log::warn!("session {}: {err}", address.code);
                Self {
                    address,
                    transport: None,
                    state: ChannelState::Closed,
                }
            }
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ChannelState::Open)
    }

    pub fn address(&self) -> &SessionAddress {
        &self.address
    }

    /// Advances the lifecycle and decodes inbound envelopes. Malformed or
    /// unrecognized envelopes are dropped.
    pub fn handle_event(&mut self, event: ChannelEvent) -> Option<ServerMsg> {
        use ChannelEvent::*;

        match (self.state, event) {
            (ChannelState::Closed, event) => {
                log::trace!("session {}: ignoring {event:?} after close", self.address.code);
                None
            }
            (ChannelState::Connecting, Opened) => {
                log::info!("session {}: connected", self.address.code);
                self.state = ChannelState::Open;
                None
            }
            (ChannelState::Open, Opened) => None,
            (ChannelState::Open, Message(text)) => match ServerMsg::decode(&text) {
                Ok(msg) => Some(msg),
                Err(err) => {
                    log::debug!("session {}: ignoring envelope: {err}", self.address.code);
                    None
                }
            },
            (ChannelState::Connecting, Message(_)) => {
                log::debug!("session {}: message before open", self.address.code);
                None
            }
            (_, Errored(reason)) => {
                log::warn!("session {}: transport error: {reason}", self.address.code);
                None
            }
            (previous, Closed { code, reason }) => {
                if matches!(previous, ChannelState::Connecting) {
                    log::warn!("session {}: handshake failed ({code})", self.address.code);
                } else {
                    log::info!("session {}: closed by peer ({code} {reason})", self.address.code);
                }
                self.close();
                None
            }
        }
    }

    pub fn send(&mut self, msg: &ClientMsg) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::NotOpen);
        }
        let transport = self.transport.as_mut().ok_or(TransportError::NotOpen)?;
        let text = msg
            .encode()
            .map_err(|err| TransportError::Rejected(err.to_string()))?;
        transport.send_text(&text)
    }

    pub fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
        self.state = ChannelState::Closed;
    }
}

impl<T: Transport> Drop for SessionChannel<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Default)]
    struct Wire {
        sent: Vec<String>,
        closes: usize,
    }

    #[derive(Debug, Default)]
    struct FakeTransport(Rc<RefCell<Wire>>);

    impl Transport for FakeTransport {
        fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
            self.0.borrow_mut().sent.push(text.to_string());
            Ok(())
        }

        fn close(&mut self) {
            self.0.borrow_mut().closes += 1;
        }
    }

    fn address() -> SessionAddress {
        SessionAddress {
            code: "abc123".to_string(),
            identity: Identity::new("ann").unwrap(),
        }
    }

    fn open_channel() -> (SessionChannel<FakeTransport>, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        let transport = FakeTransport(wire.clone());
        (SessionChannel::open(address(), |_| Ok(transport)), wire)
    }

    fn flag_msg() -> ClientMsg {
        ClientMsg::Flag {
            row: 0,
            column: 0,
            user: "ann".to_string(),
        }
    }

    #[test]
    fn connect_receives_address() {
        let channel: SessionChannel<FakeTransport> = SessionChannel::open(address(), |address| {
            assert_eq!(address.code, "abc123");
            assert_eq!(address.identity.as_str(), "ann");
            Ok(FakeTransport::default())
        });
        assert_eq!(channel.state(), ChannelState::Connecting);
    }

    #[test]
    fn connect_failure_is_closed() {
        let channel: SessionChannel<FakeTransport> = SessionChannel::open(address(), |_| {
            Err(TransportError::Connect("bad url".to_string()))
        });
        assert_eq!(channel.state(), ChannelState::Closed);
    }

    #[test]
    fn handshake_opens_channel() {
        let (mut channel, _) = open_channel();

        assert_eq!(channel.handle_event(ChannelEvent::Opened), None);

        assert!(channel.is_open());
    }

    #[test]
    fn handshake_failure_goes_straight_to_closed() {
        let (mut channel, wire) = open_channel();

        channel.handle_event(ChannelEvent::Errored("refused".to_string()));
        assert_eq!(channel.state(), ChannelState::Connecting);

        channel.handle_event(ChannelEvent::Closed {
            code: 1006,
            reason: String::new(),
        });

        assert_eq!(channel.state(), ChannelState::Closed);
        assert_eq!(wire.borrow().closes, 1);
    }

    #[test]
    fn closed_channel_never_reopens() {
        let (mut channel, _) = open_channel();
        channel.handle_event(ChannelEvent::Opened);
        channel.handle_event(ChannelEvent::Closed {
            code: 1000,
            reason: "bye".to_string(),
        });

        channel.handle_event(ChannelEvent::Opened);

        assert_eq!(channel.state(), ChannelState::Closed);
        assert_eq!(channel.send(&flag_msg()), Err(TransportError::NotOpen));
    }

    #[test]
    fn peer_close_after_open_is_terminal() {
        let (mut channel, wire) = open_channel();
        channel.handle_event(ChannelEvent::Opened);

        let msg = channel.handle_event(ChannelEvent::Closed {
            code: 1011,
            reason: "server restart".to_string(),
        });

        assert_eq!(msg, None);
        assert_eq!(channel.state(), ChannelState::Closed);
        assert_eq!(wire.borrow().closes, 1);
        assert_eq!(
            channel.handle_event(ChannelEvent::Message(r#"{"type": "user.list", "users": []}"#.to_string())),
            None
        );
    }

    #[test]
    fn decodes_messages_only_when_open() {
        let (mut channel, _) = open_channel();
        let text = r#"{"type": "user.list", "users": ["ann"]}"#;

        assert_eq!(channel.handle_event(ChannelEvent::Message(text.to_string())), None);

        channel.handle_event(ChannelEvent::Opened);
        let msg = channel.handle_event(ChannelEvent::Message(text.to_string()));

        assert_eq!(
            msg,
            Some(ServerMsg::UserList {
                users: vec!["ann".to_string()]
            })
        );
    }

    #[test]
    fn malformed_envelope_is_ignored() {
        let (mut channel, _) = open_channel();
        channel.handle_event(ChannelEvent::Opened);

        let msg = channel.handle_event(ChannelEvent::Message(r#"{"type": "nope"}"#.to_string()));

        assert_eq!(msg, None);
        assert!(channel.is_open());
    }

    #[test]
    fn send_requires_open() {
        let (mut channel, wire) = open_channel();

        assert_eq!(channel.send(&flag_msg()), Err(TransportError::NotOpen));

        channel.handle_event(ChannelEvent::Opened);
        channel.send(&flag_msg()).unwrap();

        let wire = wire.borrow();
        assert_eq!(wire.sent.len(), 1);
        assert!(wire.sent[0].contains(r#""type":"flag""#));
    }

    #[test]
    fn drop_closes_transport_once() {
        let (mut channel, wire) = open_channel();
        channel.close();
        drop(channel);

        assert_eq!(wire.borrow().closes, 1);
    }
}
