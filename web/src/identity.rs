use minegrid_core::{Identity, IdentityError, IdentityPrompt, IdentityStore, resolve_identity};

use crate::utils::*;

/// Display name kept in `localStorage` as plain text.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalIdentityStore;

impl StorageKey for LocalIdentityStore {
    const KEY: &'static str = "minegrid:username";
}

impl IdentityStore for LocalIdentityStore {
    fn load(&self) -> Option<String> {
        Self::load_text()
    }

    fn save(&mut self, name: &str) -> Result<(), IdentityError> {
        Self::save_text(name).map_err(IdentityError::Storage)
    }
}

/// `window.prompt`, which blocks until answered.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct WindowPrompt;

impl IdentityPrompt for WindowPrompt {
    fn prompt(&mut self, message: &str) -> Option<String> {
        gloo::dialogs::prompt(message, None)
    }
}

pub(crate) fn resolve() -> Option<Identity> {
    resolve_identity(&mut LocalIdentityStore, &mut WindowPrompt)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn name_is_stored_unquoted() {
        let mut store = LocalIdentityStore;
        store.save("ann lee").unwrap();

        let raw = gloo::utils::window()
            .local_storage()
            .unwrap()
            .unwrap()
            .get_item(LocalIdentityStore::KEY)
            .unwrap();

        assert_eq!(raw.as_deref(), Some("ann lee"));
        assert_eq!(store.load().as_deref(), Some("ann lee"));
    }
}
