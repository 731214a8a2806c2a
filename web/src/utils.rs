use web_sys::Storage;

pub(crate) trait StorageKey {
    const KEY: &'static str;
}

fn local_storage() -> Result<Storage, String> {
    gloo::utils::window()
        .local_storage()
        .map_err(|err| format!("{err:?}"))?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

/// Raw text under `K::KEY`, stored as-is so other tabs and tools read the
/// same value. Blank counts as absent.
pub(crate) trait LocalText: StorageKey {
    fn load_text() -> Option<String> {
        let raw = local_storage().ok()?.get_item(Self::KEY).ok()??;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn save_text(value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(Self::KEY, value)
            .map_err(|err| format!("{err:?}"))
    }
}

impl<T: StorageKey> LocalText for T {}
