//! Boundary snapshots consumed by the transport layer
//!
//! Field names and shapes are the wire contract; renaming any of them
//! breaks existing clients.

use serde::Serialize;

/// Client-visible node state
#[derive(Clone, Debug, Serialize)]
pub struct NodeView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coord: [u16; 2],
    pub neighbors: usize,
    /// Occupant tag, or empty when vacant
    pub contents: String,
}

/// Client-visible piece state
#[derive(Clone, Debug, Serialize)]
pub struct PieceView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub range: u32,
    pub id: String,
    pub cooldown: u32,
    pub owner: String,
    pub loc: [u16; 2],
}

/// Client-visible player state
#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub num_pieces: usize,
    pub id: String,
}

/// Client-visible item state
#[derive(Clone, Debug, Serialize)]
pub struct ItemView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub owner: String,
    pub loc: [u16; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_view_wire_shape() {
        let view = NodeView {
            kind: "node",
            coord: [2, 2],
            neighbors: 6,
            contents: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"type": "node", "coord": [2, 2], "neighbors": 6, "contents": ""})
        );
    }

    #[test]
    fn test_piece_view_wire_shape() {
        let view = PieceView {
            kind: "piece",
            range: 2,
            id: "a1".to_string(),
            cooldown: 0,
            owner: "A".to_string(),
            loc: [3, 4],
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "type": "piece",
                "range": 2,
                "id": "a1",
                "cooldown": 0,
                "owner": "A",
                "loc": [3, 4]
            })
        );
    }

    #[test]
    fn test_player_view_wire_shape() {
        let view = PlayerView {
            kind: "player",
            num_pieces: 3,
            id: "B".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"type": "player", "num_pieces": 3, "id": "B"})
        );
    }

    #[test]
    fn test_item_view_wire_shape() {
        let view = ItemView {
            kind: "base",
            owner: "A".to_string(),
            loc: [0, 1],
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"type": "base", "owner": "A", "loc": [0, 1]})
        );
    }
}
