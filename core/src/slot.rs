use crate::*;

/// Holds the one live [`GameSession`] of a view and the epoch it was mounted
/// under.
///
/// Remounting tears the previous session down before the next transport is
/// connected. Anything the host tagged with an older epoch finds no session.
#[derive(Debug)]
pub struct SessionSlot<T: Transport> {
    session: Option<GameSession<T>>,
    epoch: u64,
}

impl<T: Transport> Default for SessionSlot<T> {
    fn default() -> Self {
        Self {
            session: None,
            epoch: 0,
        }
    }
}

impl<T: Transport> SessionSlot<T> {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn session(&self) -> Option<&GameSession<T>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession<T>> {
        self.session.as_mut()
    }

    /// Closes the current session, bumps the epoch and, given an identity,
    /// mounts a new session for `code`. `connect` receives the new epoch so
    /// the transport can tag what it reports.
    pub fn remount<F>(&mut self, code: &str, identity: Option<Identity>, connect: F) -> u64
    where
        F: FnOnce(u64, &SessionAddress) -> Result<T, TransportError>,
    {
        self.unmount();
        self.epoch += 1;
        let epoch = self.epoch;

        match identity {
            Some(identity) => {
                self.session = Some(GameSession::mount(code, identity, |address| {
                    connect(epoch, address)
                }));
            }
            None => log::debug!("no identity, not joining {code}"),
        }
        epoch
    }

    /// The session mounted under `epoch`, if it is still the live one.
    pub fn current(&mut self, epoch: u64) -> Option<&mut GameSession<T>> {
        if epoch != self.epoch {
            log::trace!("dropping input from epoch {epoch}, live epoch is {}", self.epoch);
            return None;
        }
        self.session.as_mut()
    }

    pub fn unmount(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.unmount();
        }
    }
}
