pub mod moves;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use moves::{validate_simple, Move, MoveKind};

pub const SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self { Side::White => Side::Black, Side::Black => Side::White }
    }

    /// Row delta of a forward step: White advances toward row 0, Black toward row 7.
    pub fn forward(self) -> i8 {
        match self { Side::White => -1, Side::Black => 1 }
    }

    /// Row on which a man of this side is promoted.
    pub fn promotion_row(self) -> u8 {
        match self { Side::White => 0, Side::Black => 7 }
    }

    pub fn wire_name(self) -> &'static str {
        match self { Side::White => "WHITE", Side::Black => "BLACK" }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Side::White => "Brancas", Side::Black => "Pretas" })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(side: Side) -> Self { Self { side, rank: Rank::Man } }
    pub const fn king(side: Side) -> Self { Self { side, rank: Rank::King } }
    pub fn is_king(&self) -> bool { self.rank == Rank::King }

    pub fn to_char(self) -> char {
        match (self.side, self.rank) {
            (Side::White, Rank::Man) => 'w',
            (Side::White, Rank::King) => 'W',
            (Side::Black, Rank::Man) => 'b',
            (Side::Black, Rank::King) => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Piece::man(Side::White)),
            'W' => Some(Piece::king(Side::White)),
            'b' => Some(Piece::man(Side::Black)),
            'B' => Some(Piece::king(Side::Black)),
            _ => None,
        }
    }
}

/// A board coordinate, always in bounds. Light squares are representable but never playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if (0..SIZE as i32).contains(&row) && (0..SIZE as i32).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 { self.row }
    pub fn col(self) -> u8 { self.col }
    pub fn is_dark(self) -> bool { (self.row + self.col) % 2 == 1 }
    fn index(self) -> usize { self.row as usize * SIZE + self.col as usize }

    /// Square reached after `n` steps along (dr, dc), if still on the board.
    pub fn offset(self, dr: i8, dc: i8, n: i32) -> Option<Square> {
        Square::new(self.row as i32 + dr as i32 * n, self.col as i32 + dc as i32 * n)
    }

    pub fn dark_squares() -> impl Iterator<Item = Square> {
        (0..SIZE as u8)
            .flat_map(|row| (0..SIZE as u8).map(move |col| Square { row, col }))
            .filter(|sq| sq.is_dark())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// The four diagonal directions as (row, col) deltas.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row {row}: expected {SIZE} squares, found {found}")]
    RowLength { row: usize, found: usize },
    #[error("row {row}, col {col}: unknown square '{ch}'")]
    UnknownSquare { row: usize, col: usize, ch: char },
    #[error("row {row}, col {col}: piece on a light square")]
    LightSquare { row: usize, col: usize },
    #[error("row {row}, col {col}: '{ch}' does not match the square color")]
    WrongShade { row: usize, col: usize, ch: char },
}

/// 8x8 board. Only dark squares ever hold a piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SIZE * SIZE],
}

impl Default for Board {
    fn default() -> Self { Self::startpos() }
}

impl Board {
    pub fn empty() -> Self { Self { squares: [None; SIZE * SIZE] } }

    /// Black men on rows 0-2, White men on rows 5-7.
    pub fn startpos() -> Self {
        let mut b = Self::empty();
        for sq in Square::dark_squares() {
            if sq.row() < 3 { b.set(sq, Some(Piece::man(Side::Black))); }
            else if sq.row() > 4 { b.set(sq, Some(Piece::man(Side::White))); }
        }
        b
    }

    /// Parse eight rows of `w W b B .` (dark) and ` ` (light), the alphabet `rows` writes.
    /// `-` is accepted on either color.
    pub fn from_layout(rows: &[&str; SIZE]) -> Result<Self, LayoutError> {
        let mut b = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != SIZE { return Err(LayoutError::RowLength { row: r, found: chars.len() }); }
            for (c, &ch) in chars.iter().enumerate() {
                let dark = (r + c) % 2 == 1;
                let piece = match (ch, dark) {
                    ('-', _) | ('.', true) | (' ', false) => None,
                    ('.', false) | (' ', true) => return Err(LayoutError::WrongShade { row: r, col: c, ch }),
                    _ => Some(Piece::from_char(ch).ok_or(LayoutError::UnknownSquare { row: r, col: c, ch })?),
                };
                if piece.is_some() && !dark { return Err(LayoutError::LightSquare { row: r, col: c }); }
                if let Some(sq) = Square::new(r as i32, c as i32) { b.set(sq, piece); }
            }
        }
        Ok(b)
    }

    pub fn get(&self, sq: Square) -> Option<Piece> { self.squares[sq.index()] }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        debug_assert!(piece.is_none() || sq.is_dark(), "piece placed on light square {sq}");
        self.squares[sq.index()] = piece;
    }

    pub fn is_empty(&self, sq: Square) -> bool { self.get(sq).is_none() }

    pub fn is_enemy(&self, sq: Square, side: Side) -> bool {
        matches!(self.get(sq), Some(p) if p.side != side)
    }

    /// Squares holding a piece of `side`, in row-major order.
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::dark_squares().filter(move |&sq| matches!(self.get(sq), Some(p) if p.side == side))
    }

    pub fn count(&self, side: Side) -> usize { self.squares_of(side).count() }

    /// Move the piece on `mv.from` to `mv.to`, removing the captured piece if any,
    /// and promote a man that lands on its far row. Returns true if a promotion happened.
    /// The caller has already checked legality.
    pub fn apply(&mut self, mv: &Move) -> bool {
        let Some(mut piece) = self.get(mv.from) else { return false };
        if let MoveKind::Capture { captured } = mv.kind { self.set(captured, None); }
        self.set(mv.from, None);
        let promoted = piece.rank == Rank::Man && mv.to.row() == piece.side.promotion_row();
        if promoted { piece.rank = Rank::King; }
        self.set(mv.to, Some(piece));
        promoted
    }

    /// Text rows in the same alphabet `from_layout` accepts.
    pub fn rows(&self) -> Vec<String> {
        (0..SIZE as i32)
            .map(|r| {
                (0..SIZE as i32)
                    .filter_map(|c| Square::new(r, c))
                    .map(|sq| match self.get(sq) {
                        Some(p) => p.to_char(),
                        None if sq.is_dark() => '.',
                        None => ' ',
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0 1 2 3 4 5 6 7")?;
        for (r, row) in self.rows().iter().enumerate() {
            write!(f, "{r}  ")?;
            for ch in row.chars() { write!(f, "{ch} ")?; }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in self.rows() { writeln!(f, "|{row}|")?; }
        Ok(())
    }
}
