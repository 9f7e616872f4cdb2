//! HEXFRONT Core - Wrapped hex board engine
//!
//! This crate provides the game core:
//! - Directional geometry over a toroidal shifted-row hex grid
//! - Node graph with symmetric directional links
//! - Randomized coastline board generation with two home sites
//! - Piece vision (occupancy-blocked BFS) and movement validation
//! - JSON snapshot contracts for the transport layer

pub mod board;
pub mod game;
pub mod geom;
pub mod pieces;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Board, Node, NodeId, Occupant};
pub use game::{Action, Game, Home, Instruction, Item, Player, PlayerId};
pub use geom::{offset, BoardError, Coord, Direction};
pub use pieces::{Piece, PieceId};
pub use snapshot::{ItemView, NodeView, PieceView, PlayerView};
