/// Default grid size used to quantize positions before they are hashed.
/// `0` means positions are compared bit for bit.
pub const DEFAULT_POSITION_PRECISION: f32 = 0.0;

/// Ids must fit the `i32` indices of an exported CSR matrix, and the
/// dimension (largest id + 1) must as well.
pub const MAX_NODE_ID: usize = i32::MAX as usize - 1;

/// Weight given to an edge when the caller does not supply one.
pub const DEFAULT_EDGE_WEIGHT: f32 = 1.0;
