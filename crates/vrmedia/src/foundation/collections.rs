//! Specialized collection types

pub use slotmap::SlotMap;

/// Handle-based map using slot map for stable, generational references
///
/// Keys stay valid across insertions and become stale (rather than aliased)
/// after removal, which is what scene-object handles need.
pub type HandleMap<K, T> = SlotMap<K, T>;
