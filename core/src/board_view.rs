use core::fmt;

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use minegrid_protocol::{BoardSnapshot, Cell, SessionState};

use crate::*;

pub const MINE_GLYPH: &str = "💣";
pub const FLAG_GLYPH: &str = "🚧";

bitflags! {
    /// Style classification of one cell.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CellTags: u8 {
        const CELL     = 1;
        const HIDDEN   = 1 << 1;
        const IS_MINE  = 1 << 2;
        const IS_EMPTY = 1 << 3;
        const IS_FLAG  = 1 << 4;
    }
}

impl CellTags {
    const NAMES: [(Self, &'static str); 5] = [
        (Self::CELL, "cell"),
        (Self::HIDDEN, "hidden"),
        (Self::IS_MINE, "is-mine"),
        (Self::IS_EMPTY, "is-empty"),
        (Self::IS_FLAG, "is-flag"),
    ];

    // "is-empty" ignores reveal status on purpose; unrevealed zero cells
    // carry it too.
    pub fn of(cell: &Cell) -> Self {
        let mut tags = Self::CELL;
        tags.set(Self::HIDDEN, !cell.is_revealed);
        tags.set(Self::IS_MINE, cell.is_mine);
        tags.set(Self::IS_EMPTY, cell.is_empty());
        tags.set(Self::IS_FLAG, cell.is_flagged);
        tags
    }

    pub fn class_names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(tag, _)| self.contains(*tag))
            .map(|&(_, name)| name)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellGlyph {
    Blank,
    Flag,
    Mine,
    Count(u8),
}

impl CellGlyph {
    pub fn of(cell: &Cell, game_finished: bool) -> Self {
        if game_finished && cell.is_mine && !cell.is_flagged {
            return Self::Mine;
        }

        if !cell.is_revealed {
            return if cell.is_flagged {
                Self::Flag
            } else {
                Self::Blank
            };
        }

        match cell.adjacent_mines {
            0 => Self::Blank,
            count => Self::Count(count),
        }
    }
}

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Flag => f.write_str(FLAG_GLYPH),
            Self::Mine => f.write_str(MINE_GLYPH),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub cell: Cell,
    pub glyph: CellGlyph,
    pub tags: CellTags,
}

impl CellView {
    pub fn of(cell: &Cell, game_finished: bool) -> Self {
        Self {
            cell: *cell,
            glyph: CellGlyph::of(cell, game_finished),
            tags: CellTags::of(cell),
        }
    }
}

pub const fn banner(state: SessionState) -> &'static str {
    use SessionState::*;
    match state {
        Ongoing => "🔄 Game ongoing",
        Won => "🏆 You won !",
        Lost => "😱 You lost !",
    }
}

/// Zero-padded `HH:MM:SS`; hours keep counting past 24.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Everything the session view draws, derived from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub greeting: String,
    pub elapsed: String,
    pub banner: &'static str,
    pub game_finished: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub rows: Vec<Vec<CellView>>,
}

pub fn render_board(snapshot: &BoardSnapshot, identity: &Identity, elapsed_secs: u64) -> BoardView {
    let game_finished = snapshot.is_finished();
    let rows = snapshot
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| CellView::of(cell, game_finished))
                .collect()
        })
        .collect();

    BoardView {
        greeting: format!("👋 Hello, {identity}"),
        elapsed: format_elapsed(elapsed_secs),
        banner: banner(snapshot.state),
        game_finished,
        started_at: snapshot.started_at_utc(),
        rows,
    }
}
