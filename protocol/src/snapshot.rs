use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// One grid position as reported by the server.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn hidden(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn position(&self) -> Coord2 {
        (self.row, self.column)
    }

    /// No adjacent mines and not a mine itself, regardless of reveal status.
    pub const fn is_empty(&self) -> bool {
        self.adjacent_mines == 0 && !self.is_mine
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Ongoing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether moving from `previous` to `self` respects ongoing -> {won|lost}.
    pub const fn can_follow(self, previous: Self) -> bool {
        use SessionState::*;
        match (previous, self) {
            (Ongoing, _) => true,
            (Won, Won) | (Lost, Lost) => true,
            _ => false,
        }
    }

    pub const fn as_str(self) -> &'static str {
        use SessionState::*;
        match self {
            Ongoing => "ongoing",
            Won => "won",
            Lost => "lost",
        }
    }
}

/// Full state of one session at a point in time. Always replaces, never
/// patches, whatever the client held before.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot", into = "RawSnapshot")]
pub struct BoardSnapshot {
    grid: Array2<Cell>,
    pub state: SessionState,
    pub code: String,
    pub started_at: Option<String>,
    pub total_time_in_seconds: u64,
}

impl BoardSnapshot {
    /// Builds a snapshot from row-major cells, checking the same invariants
    /// as decoding does.
    pub fn from_rows(
        rows: Vec<Vec<Cell>>,
        state: SessionState,
        code: impl Into<String>,
        total_time_in_seconds: u64,
    ) -> Result<Self> {
        Self::try_from(RawSnapshot {
            map: rows,
            state,
            code: code.into(),
            started_at: None,
            total_time_in_seconds,
        })
    }

    /// `(rows, columns)`
    pub fn size(&self) -> Coord2 {
        self.grid.dim()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.grid.get((row, column))
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.grid.outer_iter()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.started_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|started_at| started_at.with_timezone(&Utc))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawSnapshot {
    map: Vec<Vec<Cell>>,
    state: SessionState,
    code: String,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default, deserialize_with = "whole_seconds")]
    total_time_in_seconds: u64,
}

impl TryFrom<RawSnapshot> for BoardSnapshot {
    type Error = ProtocolError;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let rows = raw.map.len();
        let columns = raw.map.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return Err(ProtocolError::EmptyBoard);
        }
        if raw.map.iter().any(|row| row.len() != columns) {
            return Err(ProtocolError::InvalidBoardShape);
        }

        let cells: Vec<Cell> = raw.map.into_iter().flatten().collect();
        let grid = Array2::from_shape_vec((rows, columns), cells)
            .map_err(|_| ProtocolError::InvalidBoardShape)?;

        if let Some(((row, column), _)) = grid
            .indexed_iter()
            .find(|&(pos, cell)| cell.position() != pos)
        {
            return Err(ProtocolError::CellPositionMismatch { row, column });
        }

        Ok(Self {
            grid,
            state: raw.state,
            code: raw.code,
            started_at: raw.started_at,
            total_time_in_seconds: raw.total_time_in_seconds,
        })
    }
}

impl From<BoardSnapshot> for RawSnapshot {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            map: snapshot.grid.outer_iter().map(|row| row.to_vec()).collect(),
            state: snapshot.state,
            code: snapshot.code,
            started_at: snapshot.started_at,
            total_time_in_seconds: snapshot.total_time_in_seconds,
        }
    }
}

// The server reports a float (`timedelta.total_seconds()`).
fn whole_seconds<'de, D>(deserializer: D) -> core::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    })
}
