/// The bound tree.
///
/// Defines the typed mirror of the CST produced by the binder. Every bound
/// expression carries a resolved type, and operator nodes carry the bound
/// operator record chosen at bind time.
pub mod bound;

/// Name resolution and type checking.
///
/// Contains the binder itself: CST-to-bound-tree dispatch, scope handling,
/// literal parsing, call resolution, and diagnostic collection.
pub mod core;

/// Operator and conversion tables.
///
/// The single place that maps operator kinds and operand types to bound
/// operators, and type pairs to conversion classes.
pub mod operators;
