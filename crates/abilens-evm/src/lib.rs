//! # abilens-evm
//!
//! Solidity JSON ABI support for ABILens.
//!
//! ## Implementation notes
//! - Solidity type strings map to canonical types by flat table lookup
//! - Function selector = keccak256("name(type1,type2,...)")[:4], computed
//!   with `tiny-keccak`
//! - Only state-mutating functions (`nonpayable`, `payable`) become calls

pub mod extractor;
pub mod mapper;
pub mod selector;

pub use extractor::EvmExtractor;
pub use mapper::map_evm_type;
pub use selector::{compute_selector, SelectorCache};
