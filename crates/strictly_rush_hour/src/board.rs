//! Board state: the pieces of one puzzle and the grid they sit on.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use super::action::MoveError;
use super::geometry;
use super::level::{LevelDefinition, LevelError};
use super::rules;
use super::types::{Cell, Exit, Piece, PieceId};

/// An N×N board holding the pieces of one puzzle.
///
/// Construction through [`Board::from_level`] guarantees that every piece is
/// on the board, that no two pieces overlap and that exactly one piece is the
/// hero. Mutation goes through [`Board::apply_move`], which trusts its caller
/// to have validated the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) size: u8,
    pub(crate) exit: Exit,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) hero: usize,
}

impl Board {
    /// Builds a board from a level definition, enforcing all load-time invariants.
    #[instrument(skip(level), fields(level = %level.id()))]
    pub fn from_level(level: &LevelDefinition) -> Result<Self, LevelError> {
        let size = *level.size();
        if size == 0 {
            return Err(LevelError::InvalidSize);
        }

        let exit = level.exit()?;
        if !(0..i32::from(size)).contains(&exit.lane()) {
            return Err(LevelError::ExitOutOfRange {
                lane: exit.lane(),
                size,
            });
        }

        let mut seen = HashSet::new();
        let mut pieces = Vec::with_capacity(level.cars().len());
        for car in level.cars() {
            if !seen.insert(car.id().clone()) {
                return Err(LevelError::DuplicatePiece(car.id().clone()));
            }
            if *car.len() < 2 {
                return Err(LevelError::PieceTooShort {
                    piece: car.id().clone(),
                    length: *car.len(),
                });
            }
            let piece = Piece::new(
                car.id().clone(),
                *car.orientation(),
                *car.len(),
                car.anchor(),
                *car.is_hero(),
                car.color().clone(),
            );
            if let Some(cell) = piece.footprint().find(|c| !geometry::within_bounds(*c, size)) {
                return Err(LevelError::OutOfBounds {
                    piece: piece.id().clone(),
                    cell,
                });
            }
            pieces.push(piece);
        }

        let heroes: Vec<usize> = pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_hero())
            .map(|(i, _)| i)
            .collect();
        let hero = match heroes.as_slice() {
            [] => return Err(LevelError::NoHero),
            [index] => *index,
            many => return Err(LevelError::MultipleHeroes(many.len())),
        };
        if !exit.admits(&pieces[hero]) {
            return Err(LevelError::HeroOffExitLane {
                piece: pieces[hero].id().clone(),
                exit,
            });
        }

        for (i, first) in pieces.iter().enumerate() {
            let cells: Vec<Cell> = first.footprint().collect();
            for second in &pieces[i + 1..] {
                if let Some(cell) = geometry::first_overlap(&cells, second.footprint()) {
                    return Err(LevelError::Overlap {
                        first: first.id().clone(),
                        second: second.id().clone(),
                        cell,
                    });
                }
            }
        }

        debug!(size, pieces = pieces.len(), %exit, "Board built from level");
        Ok(Self {
            size,
            exit,
            pieces,
            hero,
        })
    }

    /// Edge length of the grid.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Exit configuration.
    pub fn exit(&self) -> Exit {
        self.exit
    }

    /// All pieces in level order.
    pub fn all_pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Looks up a piece by id.
    #[instrument(skip(self))]
    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// The hero piece.
    pub fn hero(&self) -> &Piece {
        &self.pieces[self.hero]
    }

    /// Ids of the pieces covering `cell`.
    ///
    /// On a valid board this holds at most one id.
    #[instrument(skip(self))]
    pub fn pieces_at(&self, cell: Cell) -> Vec<&PieceId> {
        self.pieces
            .iter()
            .filter(|p| p.occupies(cell))
            .map(Piece::id)
            .collect()
    }

    /// Returns true if `cell` lies on the grid.
    #[instrument(skip(self))]
    pub fn contains(&self, cell: Cell) -> bool {
        geometry::within_bounds(cell, self.size)
    }

    /// Moves a piece's anchor to `target` without validating the move.
    ///
    /// Callers obtain a legality verdict from [`rules::check_move`] first.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, id: &PieceId, target: Cell) -> Result<(), MoveError> {
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| MoveError::InvalidReference(id.clone()))?;
        debug!(from = %piece.anchor(), to = %target, "Applying move");
        piece.set_anchor(target);
        Ok(())
    }

    /// Restores every piece's anchor from `original`.
    ///
    /// Piece identities are kept. Nothing changes if `original` lacks one of
    /// the board's pieces.
    #[instrument(skip(self, original), fields(level = %original.id()))]
    pub fn reset(&mut self, original: &LevelDefinition) -> Result<(), MoveError> {
        let anchors = self
            .pieces
            .iter()
            .map(|piece| {
                original
                    .car(piece.id())
                    .map(|car| car.anchor())
                    .ok_or_else(|| MoveError::InvalidReference(piece.id().clone()))
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!(error = %e, "Reset definition does not match board"))?;

        for (piece, anchor) in self.pieces.iter_mut().zip(anchors) {
            piece.set_anchor(anchor);
        }
        debug!("Board reset to starting layout");
        Ok(())
    }

    /// Read-only copy of the board for renderers.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            exit: self.exit,
            pieces: self.pieces.clone(),
            won: rules::has_won(self),
        }
    }

    /// Formats the board as a text grid.
    pub fn display(&self) -> String {
        render_grid(self.size, self.exit, &self.pieces)
    }
}

/// Serializable view of a board, handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BoardSnapshot {
    /// Edge length.
    size: u8,
    /// Exit configuration.
    exit: Exit,
    /// Pieces in level order.
    pieces: Vec<Piece>,
    /// Whether the hero has reached the exit.
    won: bool,
}

impl BoardSnapshot {
    /// Formats the snapshot as a text grid.
    pub fn display(&self) -> String {
        render_grid(self.size, self.exit, &self.pieces)
    }
}

/// Draws pieces as their id label, empty cells as `.`, and the exit as `>` or `v`.
///
/// Cells of a hero that has driven past the edge are not drawn.
fn render_grid(size: u8, exit: Exit, pieces: &[Piece]) -> String {
    let n = usize::from(size);
    let mut grid = vec![vec!['.'; n]; n];
    for piece in pieces {
        for cell in piece.footprint() {
            if geometry::within_bounds(cell, size) {
                grid[cell.row as usize][cell.col as usize] = piece.id().label();
            }
        }
    }

    let mut result = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let line: Vec<String> = cells.iter().map(char::to_string).collect();
        result.push_str(&line.join(" "));
        if exit == (Exit::Right { row: row as i32 }) {
            result.push_str(" >");
        }
        result.push('\n');
    }
    if let Exit::Bottom { col } = exit {
        result.push_str(&" ".repeat(col as usize * 2));
        result.push_str("v\n");
    }
    result
}
