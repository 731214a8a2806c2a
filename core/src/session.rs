use minegrid_protocol::{BoardSnapshot, ClientMsg, ServerMsg};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InitialFetch {
    Pending,
    Settled,
}

/// Controller for one mounted session view.
///
/// Owns the authoritative local snapshot and presence set, the realtime
/// channel for its `(code, identity)` pair, and the display timer. Every
/// input (fetch result, transport event, tick, gesture) is handled to
/// completion before the next one; the `bool` results tell the host whether
/// to redraw.
#[derive(Debug)]
pub struct GameSession<T: Transport> {
    channel: SessionChannel<T>,
    snapshot: Option<BoardSnapshot>,
    presence: Presence,
    timer: DisplayTimer,
    initial_fetch: InitialFetch,
    mounted: bool,
}

impl<T: Transport> GameSession<T> {
    /// Opens the one channel this view will ever use. The host starts the
    /// initial snapshot fetch alongside and reports it through
    /// [`GameSession::apply_initial_snapshot`].
    pub fn mount<F>(code: impl Into<String>, identity: Identity, connect: F) -> Self
    where
        F: FnOnce(&SessionAddress) -> Result<T, TransportError>,
    {
        let address = SessionAddress {
            code: code.into(),
            identity,
        };

        Self {
            channel: SessionChannel::open(address, connect),
            snapshot: None,
            presence: Presence::default(),
            timer: DisplayTimer::default(),
            initial_fetch: InitialFetch::Pending,
            mounted: true,
        }
    }

    pub fn code(&self) -> &str {
        &self.channel.address().code
    }

    pub fn identity(&self) -> &Identity {
        &self.channel.address().identity
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn snapshot(&self) -> Option<&BoardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.seconds()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The board is shown only with a snapshot and an open channel.
    pub fn is_ready(&self) -> bool {
        self.mounted && self.snapshot.is_some() && self.channel.is_open()
    }

    pub fn timer_running(&self) -> bool {
        self.mounted && self.timer.is_running()
    }

    /// Seeds the snapshot from the one-off HTTP fetch. Ignored after unmount,
    /// on a second call, or once a live `update.map` has already arrived.
    pub fn apply_initial_snapshot(&mut self, snapshot: BoardSnapshot) -> bool {
        if !self.mounted || self.initial_fetch == InitialFetch::Settled {
            log::debug!("session {}: dropping late fetch result", self.code());
            return false;
        }
        self.initial_fetch = InitialFetch::Settled;

        if self.snapshot.is_some() {
            log::debug!("session {}: live snapshot already newer than fetch", self.code());
            return false;
        }

        self.replace_snapshot(snapshot);
        true
    }

    pub fn initial_fetch_failed(&mut self) {
        self.initial_fetch = InitialFetch::Settled;
    }

    pub fn handle_channel_event(&mut self, event: ChannelEvent) -> bool {
        if !self.mounted {
            return false;
        }

        let before = self.channel.state();
        let msg = self.channel.handle_event(event);
        let after = self.channel.state();

        if after == ChannelState::Closed && before != ChannelState::Closed {
            // terminal for this view, no reconnect
            self.timer.stop();
        }

        let applied = msg.is_some_and(|msg| self.apply_server_msg(msg));
        applied || before != after
    }

    fn apply_server_msg(&mut self, msg: ServerMsg) -> bool {
        log::trace!("session {}: {}", self.code(), msg.kind());
        match msg {
            ServerMsg::UpdateMap { map } => {
                self.replace_snapshot(map);
                true
            }
            ServerMsg::UserList { users } => {
                log::trace!("session {}: presence {users:?}", self.code());
                self.presence = Presence::new(users);
                true
            }
        }
    }

    // Last write wins: no sequencing exists on snapshots, so a stale one
    // overwrites a newer one. Invariant breaks are only reported.
    fn replace_snapshot(&mut self, snapshot: BoardSnapshot) {
        if let Some(previous) = &self.snapshot {
            if previous.size() != snapshot.size() {
                log::warn!(
                    "session {}: board size changed from {:?} to {:?}",
                    self.code(),
                    previous.size(),
                    snapshot.size()
                );
            }
            if !snapshot.state.can_follow(previous.state) {
                log::warn!(
                    "session {}: lifecycle went from {} back to {}",
                    self.code(),
                    previous.state.as_str(),
                    snapshot.state.as_str()
                );
            }
        }

        log::trace!(
            "session {}: snapshot {} at {}s",
            self.code(),
            snapshot.state.as_str(),
            snapshot.total_time_in_seconds
        );
        self.timer.reseed(&snapshot);
        self.snapshot = Some(snapshot);
    }

    pub fn tick(&mut self) -> bool {
        self.mounted && self.timer.tick()
    }

    pub fn reveal(&mut self, row: usize, column: usize) -> bool {
        self.request(IntentKind::Reveal, row, column)
    }

    pub fn flag(&mut self, row: usize, column: usize) -> bool {
        self.request(IntentKind::Flag, row, column)
    }

    /// Forwards an intent when the channel is open and the target cell allows
    /// it. Anything else is a silent no-op.
    pub fn request(&mut self, kind: IntentKind, row: usize, column: usize) -> bool {
        if !self.mounted || !self.channel.is_open() {
            log::trace!("({row}, {column}) {kind:?} dropped, channel not open");
            return false;
        }

        let Some(cell) = self.snapshot.as_ref().and_then(|s| s.cell(row, column)) else {
            return false;
        };
        if cell.is_revealed || (kind == IntentKind::Reveal && cell.is_flagged) {
            log::trace!("({row}, {column}) {kind:?} dropped by cell state");
            return false;
        }

        let user = self.identity().as_str().to_string();
        let msg = match kind {
            IntentKind::Reveal => ClientMsg::Reveal { row, column, user },
            IntentKind::Flag => ClientMsg::Flag { row, column, user },
        };

        match self.channel.send(&msg) {
            Ok(()) => {
                log::debug!("{:?} {kind:?} sent", msg.position());
                true
            }
            Err(err) => {
                log::warn!("({row}, {column}) {kind:?} not sent: {err}");
                false
            }
        }
    }

    pub fn board_view(&self) -> Option<BoardView> {
        if !self.is_ready() {
            return None;
        }
        let snapshot = self.snapshot.as_ref()?;
        Some(render_board(snapshot, self.identity(), self.timer.seconds()))
    }

    pub fn presence_labels(&self) -> Vec<String> {
        render_presence(Some(&self.presence))
    }

    /// Closes the channel and stops the timer. Nothing is applied afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        log::debug!("session {}: unmounting", self.code());
        self.mounted = false;
        self.channel.close();
        self.timer.stop();
    }
}

impl<T: Transport> Drop for GameSession<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}
