use serde::{Deserialize, Serialize};

/// Classification attached to a node by upstream producers.
/// Carried through the store untouched; it never affects identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Default: an ordinary walkable graph node.
    #[default]
    Graph,
    /// A point of interest placed by the caller.
    Poi,
    Other,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Poi => "poi",
            Self::Other => "other",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "poi" => Self::Poi,
            "other" => Self::Other,
            _ => Self::Graph,
        }
    }
}

/// A point in 3-D space.
///
/// Nodes are plain values. The store hands out copies, so a node can never
/// be changed behind the store's back.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub node_type: NodeType,
}

impl Node {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            node_type: NodeType::default(),
        }
    }

    pub fn with_type(x: f32, y: f32, z: f32, node_type: NodeType) -> Self {
        Self { x, y, z, node_type }
    }

    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Node {
    fn from(p: [f32; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<(f32, f32, f32)> for Node {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Hashable identity of a position.
///
/// With precision `0` the raw bit patterns are used, with `-0.0` folded onto
/// `0.0`. With a positive precision each coordinate is snapped to the nearest
/// multiple of it, as long as the grid index stays below 2^53; past that, and
/// for non-finite coordinates, the coordinate keeps its exact bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    x: Coord,
    y: Coord,
    z: Coord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Coord {
    Grid(i64),
    Exact(u32),
}

impl PositionKey {
    pub fn new(node: &Node, precision: f32) -> Self {
        Self {
            x: quantize(node.x, precision),
            y: quantize(node.y, precision),
            z: quantize(node.z, precision),
        }
    }
}

/// Largest grid index an `f64` holds without gaps.
const MAX_GRID_INDEX: f64 = 9_007_199_254_740_992.0;

fn quantize(v: f32, precision: f32) -> Coord {
    if precision > 0.0 {
        let scaled = (f64::from(v) / f64::from(precision)).round();
        if scaled.abs() < MAX_GRID_INDEX {
            return Coord::Grid(scaled as i64);
        }
    }
    if v == 0.0 {
        Coord::Exact(0)
    } else {
        Coord::Exact(v.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_type_tag() {
        let a = Node::with_type(1.0, 2.0, 3.0, NodeType::Poi);
        let b = Node::new(1.0, 2.0, 3.0);
        assert_eq!(PositionKey::new(&a, 0.0001), PositionKey::new(&b, 0.0001));
    }

    #[test]
    fn test_key_snaps_within_precision() {
        let a = Node::new(1.0, 1.0, 1.0);
        let b = Node::new(1.00001, 1.0, 0.99999);
        let c = Node::new(1.001, 1.0, 1.0);
        assert_eq!(PositionKey::new(&a, 0.0001), PositionKey::new(&b, 0.0001));
        assert_ne!(PositionKey::new(&a, 0.0001), PositionKey::new(&c, 0.0001));
    }

    #[test]
    fn test_exact_key_folds_negative_zero() {
        let a = Node::new(0.0, -0.0, 5.0);
        let b = Node::new(-0.0, 0.0, 5.0);
        assert_eq!(PositionKey::new(&a, 0.0), PositionKey::new(&b, 0.0));

        let c = Node::new(1.00001, 1.0, 1.0);
        let d = Node::new(1.0, 1.0, 1.0);
        assert_ne!(PositionKey::new(&c, 0.0), PositionKey::new(&d, 0.0));
    }

    #[test]
    fn test_far_coordinates_stay_distinct() {
        let a = Node::new(1e15, 0.0, 0.0);
        let b = Node::new(2e15, 0.0, 0.0);
        let c = Node::new(-1e15, 0.0, 0.0);
        let d = Node::new(f32::MAX, 0.0, 0.0);
        let keys: Vec<_> = [a, b, c, d]
            .iter()
            .map(|n| PositionKey::new(n, 0.0001))
            .collect();
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j], "nodes {i} and {j} share a key");
            }
        }
        assert_eq!(PositionKey::new(&a, 0.0001), PositionKey::new(&a, 0.0001));
    }

    #[test]
    fn test_non_finite_coordinates_keep_own_key() {
        let nan = Node::new(f32::NAN, 0.0, 0.0);
        let inf = Node::new(f32::INFINITY, 0.0, 0.0);
        let neg_inf = Node::new(f32::NEG_INFINITY, 0.0, 0.0);

        for precision in [0.0, 0.0001] {
            let origin = PositionKey::new(&Node::default(), precision);
            assert_ne!(PositionKey::new(&nan, precision), origin);
            assert_ne!(PositionKey::new(&inf, precision), origin);
            assert_ne!(
                PositionKey::new(&inf, precision),
                PositionKey::new(&neg_inf, precision)
            );
            assert_eq!(
                PositionKey::new(&nan, precision),
                PositionKey::new(&nan, precision)
            );
        }
    }

    #[test]
    fn test_node_type_strings() {
        for t in [NodeType::Graph, NodeType::Poi, NodeType::Other] {
            assert_eq!(NodeType::from_str_lossy(t.as_str()), t);
        }
        assert_eq!(NodeType::from_str_lossy("bogus"), NodeType::Graph);
    }

    #[test]
    fn test_from_array() {
        let n: Node = [2.0, 3.0, 4.0].into();
        assert_eq!(n.position(), [2.0, 3.0, 4.0]);
        assert_eq!(n.node_type, NodeType::Graph);
    }

    #[test]
    fn test_serde_defaults_type() {
        let n: Node = serde_json::from_str(r#"{"x":1.0,"y":2.0,"z":3.0}"#).unwrap();
        assert_eq!(n, Node::new(1.0, 2.0, 3.0));

        let json = serde_json::to_string(&Node::with_type(1.0, 2.0, 3.0, NodeType::Poi)).unwrap();
        assert!(json.contains("\"poi\""), "type tag not lowercased: {json}");
    }
}
