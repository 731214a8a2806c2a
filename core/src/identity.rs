use core::fmt;

use crate::*;

pub const IDENTITY_PROMPT: &str = "Please enter your username";

/// Display name a player is known by. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        (!name.is_empty()).then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-local persistence for the display name.
pub trait IdentityStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, name: &str) -> Result<(), IdentityError>;
}

/// Blocking question to the user; `None` when they decline.
pub trait IdentityPrompt {
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// Returns the stored identity, or asks for one and stores it.
///
/// A declined or blank answer yields `None`, and the caller must not open a
/// session. A failed write is logged; the name is still used for this view.
pub fn resolve_identity<S, P>(store: &mut S, prompt: &mut P) -> Option<Identity>
where
    S: IdentityStore + ?Sized,
    P: IdentityPrompt + ?Sized,
{
    if let Some(identity) = store.load().as_deref().and_then(Identity::new) {
        return Some(identity);
    }

    let Some(identity) = prompt.prompt(IDENTITY_PROMPT).as_deref().and_then(Identity::new) else {
        log::info!("no identity given, session view withheld");
        return None;
    };

    if let Err(err) = store.save(identity.as_str()) {
        log::error!("{err}");
    }
    Some(identity)
}
