//! # abilens-ink
//!
//! ink!/Substrate contract metadata support for ABILens.
//!
//! ## Implementation notes
//! - Arguments reference a numeric type table; `resolver` walks it down to a
//!   primitive through `array` / `sequence` wrappers
//! - `composite`, `tuple`, `variant`, `compact`, `bitSequence` and unknown
//!   definition kinds are not decomposed and resolve to `string`
//! - Message selectors are carried verbatim from the metadata

pub mod extractor;
pub mod primitives;
pub mod resolver;

pub use extractor::InkExtractor;
pub use resolver::{TypeResolver, DEFAULT_MAX_DEPTH};
