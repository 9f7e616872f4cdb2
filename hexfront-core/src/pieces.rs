//! Player pieces: vision and movement validation

use crate::board::{Board, NodeId};
use crate::game::PlayerId;
use rustc_hash::FxHashSet;

/// Identifier for a spawned piece
pub type PieceId = u32;

/// A piece on the board
///
/// `node` must always agree with the occupant slot it sits in; `Game`
/// keeps the two in sync across spawn, relocation and removal.
#[derive(Clone, Debug)]
pub struct Piece {
    pub owner: PlayerId,
    /// Identifying label, also used as display tag
    pub label: String,
    /// Distance, in hexes, this piece can see or move
    pub range: u32,
    /// Turns until this piece can act again
    pub cooldown: u32,
    pub node: NodeId,
}

impl Piece {
    /// Nodes this piece can currently see.
    ///
    /// Any occupant, friendly or not, blocks sight past its hex.
    pub fn vision(&self, board: &Board) -> FxHashSet<NodeId> {
        board.field_of_view(self.node, self.range)
    }

    /// Whether this piece could relocate to `target` this turn.
    ///
    /// Move range is deliberately identical to vision range. Target
    /// occupancy is not checked here; `Game::try_move_to` layers that on.
    pub fn can_move_to(&self, board: &Board, target: NodeId) -> bool {
        if self.cooldown != 0 {
            return false;
        }
        self.vision(board).contains(&target)
    }

    /// One turn passes
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}
