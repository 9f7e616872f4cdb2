//! Game container: players, homes, pieces and their lifecycle
//!
//! `Game` is the single owner of one board instance and of the player and
//! piece arenas. Turn rules (spawning rights, combat, ordering) live in the
//! dispatch layer above; this module only keeps occupant slots and piece
//! positions consistent.

use crate::board::{Board, NodeId, Occupant};
use crate::geom::Coord;
use crate::pieces::{Piece, PieceId};
use crate::snapshot::{ItemView, PieceView, PlayerView};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Index of a player in the game arena
pub type PlayerId = usize;

/// A player's base marker, resident in a home node's occupant slot
#[derive(Clone, Debug)]
pub struct Home {
    owner: Option<PlayerId>,
    tag: String,
}

impl Home {
    pub(crate) fn unowned() -> Self {
        Self {
            owner: None,
            tag: "#".to_string(),
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Display tag: the owner's label, or "#" while unclaimed
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn set_owner(&mut self, player: PlayerId, tag: &str) {
        self.owner = Some(player);
        self.tag = tag.to_string();
    }
}

/// Order kinds a player can queue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move,
    Spawn,
}

/// A queued order: what to do and where
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub action: Action,
    pub target: Coord,
}

/// A participant: label, owned pieces, pending orders
#[derive(Clone, Debug)]
pub struct Player {
    pub label: String,
    pub pieces: Vec<PieceId>,
    pub instructions: Vec<Instruction>,
}

impl Player {
    fn new(label: String) -> Self {
        Self {
            label,
            pieces: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub fn queue(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Take all pending orders, leaving the queue empty
    pub fn drain_instructions(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.instructions)
    }
}

/// An inert map item; only ever read back through its snapshot
#[derive(Clone, Debug)]
pub struct Item {
    pub owner: PlayerId,
    pub node: NodeId,
    pub description: String,
}

/// One running game instance
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    players: Vec<Player>,
    pieces: FxHashMap<PieceId, Piece>,
    next_piece: PieceId,
}

impl Game {
    pub fn new<R: Rng>(width: u16, height: u16, rng: &mut R) -> Self {
        Self {
            board: Board::generate(width, height, rng),
            players: Vec::new(),
            pieces: FxHashMap::default(),
            next_piece: 0,
        }
    }

    pub fn add_player(&mut self, label: impl Into<String>) -> PlayerId {
        self.players.push(Player::new(label.into()));
        self.players.len() - 1
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Assign one of the two home sites (0 or 1) to a player
    pub fn claim_home(&mut self, which: usize, player: PlayerId) {
        let home = self.board.homes()[which];
        let tag = self.players[player].label.clone();
        if let Some(Occupant::Home(h)) = self.board.node_mut(home).occupant_mut() {
            h.set_owner(player, &tag);
        }
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().map(|(&id, piece)| (id, piece))
    }

    /// Create a piece: register it with its owner and write it into the
    /// node's occupant slot. Spawning rights and slot vacancy are the
    /// dispatch layer's contract.
    pub fn spawn_piece(
        &mut self,
        owner: PlayerId,
        label: impl Into<String>,
        range: u32,
        node: NodeId,
    ) -> PieceId {
        let label = label.into();
        let id = self.next_piece;
        self.next_piece += 1;
        self.board.node_mut(node).set_occupant(Occupant::Piece {
            id,
            tag: label.clone(),
        });
        self.players[owner].pieces.push(id);
        self.pieces.insert(
            id,
            Piece {
                owner,
                label,
                range,
                cooldown: 0,
                node,
            },
        );
        id
    }

    /// Destroy a piece, clearing its occupant slot and owner registration
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.pieces.remove(&id)?;
        // Clear the slot only if this piece still holds it
        if matches!(
            self.board.node(piece.node).occupant(),
            Some(Occupant::Piece { id: held, .. }) if *held == id
        ) {
            self.board.node_mut(piece.node).clear_occupant();
        }
        self.players[piece.owner].pieces.retain(|p| *p != id);
        Some(piece)
    }

    /// Relocate a piece, unchecked: clears the occupant slot the piece is
    /// leaving and updates its position. Performs no validation and does
    /// NOT write the target slot; callers check `can_move_to` first and
    /// complete the occupant update themselves. `try_move_to` is the
    /// self-contained variant.
    pub fn move_to(&mut self, id: PieceId, target: NodeId) {
        if let Some(piece) = self.pieces.get_mut(&id) {
            self.board.node_mut(piece.node).clear_occupant();
            piece.node = target;
        }
    }

    /// Validated relocation: refuses cooldown, out-of-vision targets and
    /// occupied targets, then performs both occupant-slot updates and the
    /// position change together. Returns whether the move happened.
    pub fn try_move_to(&mut self, id: PieceId, target: NodeId) -> bool {
        let Some(piece) = self.pieces.get(&id) else {
            return false;
        };
        if !piece.can_move_to(&self.board, target) {
            return false;
        }
        if self.board.node(target).occupant().is_some() {
            return false;
        }

        let from = piece.node;
        let tag = piece.label.clone();
        self.board.node_mut(from).clear_occupant();
        self.board
            .node_mut(target)
            .set_occupant(Occupant::Piece { id, tag });
        if let Some(piece) = self.pieces.get_mut(&id) {
            piece.node = target;
        }
        true
    }

    pub fn piece_view(&self, id: PieceId) -> Option<PieceView> {
        let piece = self.pieces.get(&id)?;
        let coord = self.board.node(piece.node).coord();
        Some(PieceView {
            kind: "piece",
            range: piece.range,
            id: piece.label.clone(),
            cooldown: piece.cooldown,
            owner: self.players[piece.owner].label.clone(),
            loc: [coord.x, coord.y],
        })
    }

    pub fn player_view(&self, id: PlayerId) -> PlayerView {
        let player = &self.players[id];
        PlayerView {
            kind: "player",
            num_pieces: player.pieces.len(),
            id: player.label.clone(),
        }
    }

    pub fn item_view(&self, item: &Item) -> ItemView {
        let coord = self.board.node(item.node).coord();
        ItemView {
            kind: "base",
            owner: self.players[item.owner].label.clone(),
            loc: [coord.x, coord.y],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Seeded game with two players on the home sites
    fn two_player_game(seed: u64) -> Game {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = Game::new(8, 8, &mut rng);
        let a = game.add_player("A");
        let b = game.add_player("B");
        game.claim_home(0, a);
        game.claim_home(1, b);
        game
    }

    /// Some empty node next to the given one
    fn free_neighbor(game: &Game, node: NodeId) -> NodeId {
        game.board
            .node(node)
            .neighbors()
            .find(|&id| game.board.node(id).occupant().is_none())
            .unwrap()
    }

    #[test]
    fn test_claim_home_sets_owner_and_tag() {
        let game = two_player_game(1);
        let [first, second] = game.board.homes();
        match game.board.node(first).occupant() {
            Some(Occupant::Home(home)) => {
                assert_eq!(home.owner(), Some(0));
                assert_eq!(home.tag(), "A");
            }
            other => panic!("expected a home marker, got {other:?}"),
        }
        match game.board.node(second).occupant() {
            Some(Occupant::Home(home)) => assert_eq!(home.tag(), "B"),
            other => panic!("expected a home marker, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_registers_everywhere() {
        let mut game = two_player_game(2);
        let spot = free_neighbor(&game, game.board.homes()[0]);
        let id = game.spawn_piece(0, "a1", 2, spot);

        assert!(game.player(0).pieces.contains(&id));
        let piece = game.piece(id).unwrap();
        assert_eq!(piece.node, spot);
        assert_eq!(piece.cooldown, 0);
        match game.board.node(spot).occupant() {
            Some(Occupant::Piece { id: held, tag }) => {
                assert_eq!(*held, id);
                assert_eq!(tag, "a1");
            }
            other => panic!("slot not written: {other:?}"),
        }
    }

    #[test]
    fn test_remove_piece_clears_slot() {
        let mut game = two_player_game(3);
        let spot = free_neighbor(&game, game.board.homes()[0]);
        let id = game.spawn_piece(0, "a1", 2, spot);

        let removed = game.remove_piece(id).unwrap();
        assert_eq!(removed.node, spot);
        assert!(game.board.node(spot).occupant().is_none());
        assert!(game.player(0).pieces.is_empty());
        assert!(game.piece(id).is_none());
    }

    #[test]
    fn test_move_to_leaves_target_slot_untouched() {
        // Reference semantics: the old slot is cleared, the target slot is
        // the caller's responsibility
        let mut game = two_player_game(4);
        let spot = free_neighbor(&game, game.board.homes()[0]);
        let id = game.spawn_piece(0, "a1", 2, spot);
        let target = free_neighbor(&game, spot);

        game.move_to(id, target);
        assert!(game.board.node(spot).occupant().is_none());
        assert!(game.board.node(target).occupant().is_none());
        assert_eq!(game.piece(id).unwrap().node, target);
    }

    #[test]
    fn test_try_move_to_completes_both_slots() {
        let mut game = two_player_game(5);
        let spot = free_neighbor(&game, game.board.homes()[0]);
        let id = game.spawn_piece(0, "a1", 2, spot);
        let target = free_neighbor(&game, spot);

        assert!(game.try_move_to(id, target));
        assert!(game.board.node(spot).occupant().is_none());
        assert!(matches!(
            game.board.node(target).occupant(),
            Some(Occupant::Piece { id: held, .. }) if *held == id
        ));
        assert_eq!(game.piece(id).unwrap().node, target);
    }

    #[test]
    fn test_try_move_to_rejects_occupied_target() {
        let mut game = two_player_game(6);
        let home = game.board.homes()[0];
        let spot = free_neighbor(&game, home);
        let id = game.spawn_piece(0, "a1", 2, spot);

        // The home node is adjacent and visible, but occupied
        assert!(!game.try_move_to(id, home));
        assert_eq!(game.piece(id).unwrap().node, spot);
        assert!(game.board.node(spot).occupant().is_some());
    }

    #[test]
    fn test_try_move_to_respects_cooldown() {
        let mut game = two_player_game(7);
        let spot = free_neighbor(&game, game.board.homes()[0]);
        let id = game.spawn_piece(0, "a1", 2, spot);
        let target = free_neighbor(&game, spot);

        game.piece_mut(id).unwrap().cooldown = 3;
        assert!(!game.try_move_to(id, target));
        assert_eq!(game.piece(id).unwrap().node, spot);
    }

    #[test]
    fn test_instruction_queue() {
        let mut game = two_player_game(8);
        let order = Instruction {
            action: Action::Spawn,
            target: Coord::new(1, 1),
        };
        game.player_mut(0).queue(order.clone());
        game.player_mut(0).queue(Instruction {
            action: Action::Move,
            target: Coord::new(2, 2),
        });

        let drained = game.player_mut(0).drain_instructions();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], order);
        assert!(game.player(0).instructions.is_empty());
    }
}
