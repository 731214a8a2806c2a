use minegrid_protocol::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Left click or tap.
    Primary,
    /// Right click or long press.
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntentKind {
    Reveal,
    Flag,
}

/// Capability record passed explicitly down the render tree.
pub trait CellActions {
    fn reveal(&self, row: usize, column: usize);
    fn flag(&self, row: usize, column: usize);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureResponse {
    /// The host must cancel the platform's default action (context menu).
    pub prevent_default: bool,
    pub dispatched: Option<IntentKind>,
}

/// Which intent, if any, a gesture on `cell` turns into.
pub fn gesture_intent(gesture: Gesture, cell: &Cell, game_finished: bool) -> Option<IntentKind> {
    if game_finished || cell.is_revealed {
        return None;
    }

    match gesture {
        Gesture::Primary if cell.is_flagged => None,
        Gesture::Primary => Some(IntentKind::Reveal),
        // flagging a flagged cell is forwarded, the server toggles it
        Gesture::Secondary => Some(IntentKind::Flag),
    }
}

pub fn handle_gesture<A>(
    gesture: Gesture,
    cell: &Cell,
    game_finished: bool,
    actions: Option<&A>,
) -> GestureResponse
where
    A: CellActions + ?Sized,
{
    let prevent_default = matches!(gesture, Gesture::Secondary);
    let dispatched = actions.and_then(|actions| {
        let kind = gesture_intent(gesture, cell, game_finished)?;
        match kind {
            IntentKind::Reveal => actions.reveal(cell.row, cell.column),
            IntentKind::Flag => actions.flag(cell.row, cell.column),
        }
        Some(kind)
    });

    if dispatched.is_none() {
        log::trace!("({}, {}) {gesture:?} suppressed", cell.row, cell.column);
    }

    GestureResponse {
        prevent_default,
        dispatched,
    }
}
