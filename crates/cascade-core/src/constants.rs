/// Cascade engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width of the nano sketch container (`u32`).
pub const NANO_SKETCH_CAPACITY: usize = 32;

/// Width of the tiny sketch container (`u64`).
pub const TINY_SKETCH_CAPACITY: usize = 64;

/// Absolute ceiling on a drawn graph level, regardless of configuration.
pub const MAX_GRAPH_LEVEL: usize = 32;
