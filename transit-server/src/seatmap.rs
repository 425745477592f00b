//! Seat map generation.
//!
//! There is no inventory system behind this: the map is a deterministic
//! placeholder layout derived from the class code, with every seat
//! reported available. Callers get a stable shape to render against
//! until a real reservation backend exists.

use serde::Serialize;

/// One seat in a row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Seat {
    /// Row number plus letter, e.g. `"3C"`.
    pub label: String,
    pub available: bool,
}

/// One row of seats.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeatRow {
    pub row: u32,
    pub seats: Vec<Seat>,
}

/// A generated seat layout for one travel class.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeatMap {
    pub class_code: String,
    pub rows: Vec<SeatRow>,
}

const DEFAULT_ROWS: u32 = 12;
const SEAT_LETTERS: &[char] = &['A', 'B', 'C', 'D'];

/// Build the placeholder seat map for a class.
///
/// Premium classes (first-class and air-conditioned codes) get three
/// seats across, everything else four. `rows` of zero is bumped to one.
pub fn seat_map(class_code: &str, rows: u32) -> SeatMap {
    let per_row = seats_per_row(class_code);
    let rows = rows.max(1);

    let rows = (1..=rows)
        .map(|row| SeatRow {
            row,
            seats: SEAT_LETTERS[..per_row]
                .iter()
                .map(|letter| Seat {
                    label: format!("{row}{letter}"),
                    available: true,
                })
                .collect(),
        })
        .collect();

    SeatMap {
        class_code: class_code.to_string(),
        rows,
    }
}

/// Seat map with the standard row count.
pub fn default_seat_map(class_code: &str) -> SeatMap {
    seat_map(class_code, DEFAULT_ROWS)
}

fn seats_per_row(class_code: &str) -> usize {
    let code = class_code.to_ascii_uppercase();
    if code.starts_with("1") || code.contains("AC") || code.starts_with('F') {
        3
    } else {
        4
    }
}
