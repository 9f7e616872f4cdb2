//! Node graph and procedural board generation
//!
//! The board owns every node in an arena (`Vec<Node>`); directional edges
//! and occupant slots hold plain ids into that arena, never references.
//! Generation produces a connected, wrapped landmass with two landlocked
//! home sites joined by a straight corridor.

use crate::game::Home;
use crate::geom::{offset, BoardError, Coord, Direction};
use crate::pieces::PieceId;
use crate::snapshot::NodeView;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Index of a node in the board arena
pub type NodeId = usize;

/// Nodes to place, as a fraction of the grid: floor(width * height / DENSITY)
const DENSITY: f64 = 1.7;

/// What sits in a node's occupant slot
#[derive(Clone, Debug)]
pub enum Occupant {
    Home(Home),
    Piece { id: PieceId, tag: String },
}

impl Occupant {
    /// Raw identifying tag, as reported in snapshots
    pub fn tag(&self) -> &str {
        match self {
            Occupant::Home(home) => home.tag(),
            Occupant::Piece { tag, .. } => tag,
        }
    }

    /// Two-column display label used by the ASCII render; always exactly
    /// two characters so the picture stays aligned
    pub fn label(&self) -> String {
        let mut chars = self.tag().chars();
        match (chars.next(), chars.next()) {
            (Some(a), Some(b)) => format!("{a}{b}"),
            (Some(a), None) => format!("_{a}"),
            (None, _) => "__".to_string(),
        }
    }
}

/// One hex cell: up to six directional links and an optional occupant
#[derive(Clone, Debug)]
pub struct Node {
    coord: Coord,
    edges: [Option<NodeId>; 6],
    occupant: Option<Occupant>,
}

impl Node {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            edges: [None; 6],
            occupant: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn edge(&self, dir: Direction) -> Option<NodeId> {
        self.edges[dir.index()]
    }

    pub fn set_edge(&mut self, dir: Direction, to: NodeId) {
        self.edges[dir.index()] = Some(to);
    }

    /// Directional lookup by label, validated against the six-label domain
    pub fn edge_by_label(&self, label: &str) -> Result<Option<NodeId>, BoardError> {
        Ok(self.edge(Direction::from_label(label)?))
    }

    /// Ids of the populated neighbor slots
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().flatten().copied()
    }

    pub fn neighbor_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// All six directions populated
    pub fn landlocked(&self) -> bool {
        self.edges.iter().all(|e| e.is_some())
    }

    /// Directions with no neighbor yet; growth candidates
    pub fn empty_adj(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.edge(*d).is_none())
            .collect()
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    pub(crate) fn occupant_mut(&mut self) -> Option<&mut Occupant> {
        self.occupant.as_mut()
    }

    pub fn set_occupant(&mut self, occupant: Occupant) {
        self.occupant = Some(occupant);
    }

    pub fn clear_occupant(&mut self) -> Option<Occupant> {
        self.occupant.take()
    }

    pub fn snapshot(&self) -> NodeView {
        NodeView {
            kind: "node",
            coord: [self.coord.x, self.coord.y],
            neighbors: self.neighbor_count(),
            contents: self
                .occupant
                .as_ref()
                .map(|o| o.tag().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Wrapped hex board: arena of nodes plus the coordinate index
///
/// Topology is immutable after generation; nodes are never removed.
#[derive(Clone, Debug)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major coordinate index into the arena
    grid: Vec<Option<NodeId>>,
    /// The arena; doubles as the global node set
    nodes: Vec<Node>,
    homes: [NodeId; 2],
    /// Frontier candidates; landlocked entries are pruned lazily on sampling
    coastal: Vec<NodeId>,
}

impl Board {
    /// Generate a connected board with two home sites.
    ///
    /// Requires width, height >= 2 and min(width, height) >= 2 so the home
    /// corridor has at least one step; degenerate sizes are not hardened
    /// against.
    pub fn generate<R: Rng>(width: u16, height: u16, rng: &mut R) -> Self {
        let mut board = Self {
            width,
            height,
            grid: vec![None; width as usize * height as usize],
            nodes: Vec::new(),
            homes: [0, 0],
            coastal: Vec::new(),
        };

        // Home site #1 at a uniformly random coordinate
        let start = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
        let first = board.insert(start);
        board.homes[0] = first;

        // Walk a straight corridor in one random direction; the far end
        // becomes home site #2. This fixes the home distance and keeps the
        // two sites connected by construction.
        let corridor = (width.min(height) / 2) as usize;
        let dir = Direction::ALL[rng.gen_range(0..6)];
        let mut cursor = first;
        for _ in 0..corridor {
            let coord = offset(board.nodes[cursor].coord, dir, width, height);
            let next = board.insert(coord);
            board.nodes[cursor].set_edge(dir, next);
            board.nodes[next].set_edge(dir.opposite(), cursor);
            board.coastal.push(next);
            cursor = next;
        }
        board.homes[1] = cursor;

        // Landlock both home sites: synthesize a neighbor at every empty
        // adjacent coordinate
        for home in board.homes {
            for dir in Direction::ALL {
                let coord = offset(board.nodes[home].coord, dir, width, height);
                match board.id_at(coord) {
                    // A 2-wide or 2-high wrap aliases two directions to one
                    // coordinate; the node may exist with only one of the
                    // aliased slots linked, so relink it
                    Some(existing) => board.connect(existing),
                    None => {
                        let id = board.insert(coord);
                        board.connect(id);
                        board.coastal.push(id);
                    }
                }
            }
        }

        // Grow the coastline out to the target density
        let target = (width as f64 * height as f64 / DENSITY) as usize;
        'grow: for _ in 0..target.saturating_sub(corridor) {
            // Sample the frontier, discarding entries that have since
            // landlocked
            let sampled = loop {
                if board.coastal.is_empty() {
                    break 'grow;
                }
                let slot = rng.gen_range(0..board.coastal.len());
                let id = board.coastal[slot];
                if board.nodes[id].landlocked() {
                    board.coastal.swap_remove(slot);
                } else {
                    break id;
                }
            };

            let open = board.nodes[sampled].empty_adj();
            let dir = open[rng.gen_range(0..open.len())];
            let coord = offset(board.nodes[sampled].coord, dir, width, height);

            // An empty edge slot does not guarantee an empty coordinate on
            // 2-wide or 2-high wraps, where two directions alias to the
            // same hex; fill in the missing links instead of inserting
            if let Some(existing) = board.id_at(coord) {
                board.connect(existing);
                continue;
            }

            let id = board.insert(coord);
            board.connect(id);

            // A node born fully surrounded is no frontier candidate
            if !board.nodes[sampled].landlocked() && !board.nodes[id].landlocked() {
                board.coastal.push(id);
            }
        }

        // Owner-less home markers; owners are claimed later
        for home in board.homes {
            board.nodes[home].set_occupant(Occupant::Home(Home::unowned()));
        }

        board
    }

    /// Allocate a node and register it in the coordinate index
    fn insert(&mut self, coord: Coord) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(coord));
        let slot = self.grid_index(coord);
        debug_assert!(self.grid[slot].is_none(), "coordinate already occupied");
        self.grid[slot] = Some(id);
        id
    }

    /// Link a freshly placed node to every existing neighbor, both ways.
    /// Merges adjacent growth fronts so the landmass stays connected.
    fn connect(&mut self, id: NodeId) {
        let coord = self.nodes[id].coord;
        for dir in Direction::ALL {
            let adjacent = offset(coord, dir, self.width, self.height);
            if let Some(other) = self.id_at(adjacent) {
                if other != id {
                    self.nodes[id].set_edge(dir, other);
                    self.nodes[other].set_edge(dir.opposite(), id);
                }
            }
        }
    }

    fn grid_index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node id at a coordinate, if one was placed there
    pub fn id_at(&self, coord: Coord) -> Option<NodeId> {
        self.grid[self.grid_index(coord)]
    }

    pub fn get(&self, coord: Coord) -> Option<&Node> {
        self.id_at(coord).map(|id| &self.nodes[id])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Node> {
        self.id_at(coord).map(|id| &mut self.nodes[id])
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// The two home sites, in generation order
    pub fn homes(&self) -> [NodeId; 2] {
        self.homes
    }

    /// Nodes visible from `origin` within `range` hops.
    ///
    /// Breadth-first over the edge graph. Occupied nodes are seen but block
    /// traversal past them; the origin itself is always included. Range 0
    /// yields exactly the origin.
    pub fn field_of_view(&self, origin: NodeId, range: u32) -> FxHashSet<NodeId> {
        let mut seen = FxHashSet::default();
        seen.insert(origin);

        let mut frontier: FxHashSet<NodeId> = self.nodes[origin].neighbors().collect();
        for _ in 0..range {
            let mut next = FxHashSet::default();
            for id in frontier {
                seen.insert(id);
                if self.nodes[id].occupant.is_none() {
                    next.extend(self.nodes[id].neighbors());
                }
            }
            frontier = &next - &seen;
        }
        seen
    }

    /// Fixed-width ASCII picture: two columns per hex, odd rows shifted one
    /// space. "--" marks an absent hex, "_N" an empty hex with N neighbors,
    /// anything else is an occupant label.
    pub fn render(&self) -> String {
        let mut out = String::from("  ");
        for x in 0..self.width {
            out.push_str(&format!("{x:>2}"));
        }
        out.push('\n');
        for y in 0..self.height {
            out.push_str(&format!("{y:>2}"));
            if y % 2 == 1 {
                out.push(' ');
            }
            for x in 0..self.width {
                match self.get(Coord::new(x, y)) {
                    None => out.push_str("--"),
                    Some(node) => match node.occupant() {
                        None => out.push_str(&format!("_{}", node.neighbor_count())),
                        Some(occupant) => out.push_str(&occupant.label()),
                    },
                }
            }
            out.push('\n');
        }
        out
    }

    /// Fully populated board for traversal tests; no homes, no occupants
    #[cfg(test)]
    pub(crate) fn full(width: u16, height: u16) -> Self {
        let mut board = Self {
            width,
            height,
            grid: vec![None; width as usize * height as usize],
            nodes: Vec::new(),
            homes: [0, 0],
            coastal: Vec::new(),
        };
        for y in 0..height {
            for x in 0..width {
                let id = board.insert(Coord::new(x, y));
                board.connect(id);
            }
        }
        board
    }
}
