/// Runtime value representation.
///
/// Defines the `Value` enum and all supported value variants, along with
/// the checked accessors and coercions the evaluator relies on for
/// `any`-typed operands.
pub mod core;
