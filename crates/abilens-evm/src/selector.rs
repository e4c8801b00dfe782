//! EVM function selector computation.
//!
//! The selector of a function is the first four bytes of the keccak256 hash
//! of its canonical signature, e.g.:
//!   keccak256("transfer(address,uint256)")[:4] → 0xa9059cbb
//!
//! Types are taken verbatim: `uint` is not rewritten to `uint256`. The only
//! rewrite is for ABI `tuple` parameters, whose signature form is built from
//! their `components`.

use abilens_core::evm::EvmParam;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of `data` (original Keccak padding, as used by the EVM).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// `"name(type1,type2,...)"`
pub fn signature<S: AsRef<str>>(name: &str, input_types: &[S]) -> String {
    let types: Vec<&str> = input_types.iter().map(|t| t.as_ref()).collect();
    format!("{name}({})", types.join(","))
}

/// `"0x"` + first four bytes of keccak256(`signature`), lowercase hex.
pub fn selector_from_signature(signature: &str) -> String {
    let hash = keccak256(signature.as_bytes());
    format!("0x{}", hex::encode(&hash[..4]))
}

/// Selector of `name(input_types...)`.
pub fn compute_selector<S: AsRef<str>>(name: &str, input_types: &[S]) -> String {
    selector_from_signature(&signature(name, input_types))
}

/// The signature form of a parameter's type.
///
/// `tuple`, `tuple[]`, `tuple[2][]` ... expand to `(c1,c2,...)` followed by the
/// array suffix; every other type is returned as written.
pub fn canonical_param_type(param: &EvmParam) -> String {
    match param.ty.strip_prefix("tuple") {
        Some(suffix) if suffix.is_empty() || suffix.starts_with('[') => {
            let inner: Vec<String> = param.components.iter().map(canonical_param_type).collect();
            format!("({}){suffix}", inner.join(","))
        }
        _ => param.ty.clone(),
    }
}

/// Canonical signature of a function given its ABI inputs.
pub fn function_signature(name: &str, inputs: &[EvmParam]) -> String {
    let types: Vec<String> = inputs.iter().map(canonical_param_type).collect();
    signature(name, &types)
}

/// Default number of signatures a [`SelectorCache`] holds.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Thread-safe memo of signature → selector.
///
/// Selectors are pure functions of the signature; the cache never changes
/// what is returned, only how often keccak runs. At most `capacity` entries
/// are held; inserting into a full cache clears it first.
#[derive(Debug)]
pub struct SelectorCache {
    inner: RwLock<HashMap<String, String>>,
    capacity: usize,
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero disables memoization.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_or_compute(&self, signature: &str) -> String {
        if let Some(hit) = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(signature)
        {
            return hit.clone();
        }
        let selector = selector_from_signature(signature);
        if self.capacity == 0 {
            return selector;
        }
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if map.len() >= self.capacity && !map.contains_key(signature) {
            map.clear();
        }
        map.insert(signature.to_string(), selector.clone());
        selector
    }

    /// Number of cached signatures.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_abi::{JsonAbi, Param};

    fn from_alloy(p: &Param) -> EvmParam {
        let mut param = EvmParam::new(p.name.clone(), p.ty.clone());
        param.components = p.components.iter().map(from_alloy).collect();
        param
    }

    #[test]
    fn erc20_transfer_selector() {
        assert_eq!(compute_selector("transfer", &["address", "uint256"]), "0xa9059cbb");
    }

    #[test]
    fn well_known_selectors() {
        assert_eq!(compute_selector("approve", &["address", "uint256"]), "0x095ea7b3");
        assert_eq!(
            compute_selector("transferFrom", &["address", "address", "uint256"]),
            "0x23b872dd"
        );
        assert_eq!(compute_selector("balanceOf", &["address"]), "0x70a08231");
        assert_eq!(compute_selector::<&str>("totalSupply", &[]), "0x18160ddd");
        assert_eq!(compute_selector::<&str>("deposit", &[]), "0xd0e30db0");
    }

    #[test]
    fn types_are_not_normalized() {
        assert_eq!(signature("f", &["uint"]), "f(uint)");
        assert_ne!(
            compute_selector("f", &["uint"]),
            compute_selector("f", &["uint256"])
        );
    }

    #[test]
    fn tuple_params_expand_components() {
        let mut order = EvmParam::new("order", "tuple[]");
        order.components = vec![
            EvmParam::new("maker", "address"),
            EvmParam::new("amounts", "uint256[2]"),
            {
                let mut fee = EvmParam::new("fee", "tuple");
                fee.components = vec![EvmParam::new("bps", "uint16"), EvmParam::new("to", "address")];
                fee
            },
        ];
        let sig = function_signature("fill", &[order, EvmParam::new("deadline", "uint64")]);
        assert_eq!(sig, "fill((address,uint256[2],(uint16,address))[],uint64)");
    }

    #[test]
    fn tuple_prefix_only_matches_tuple_types() {
        // A user-defined type string that merely starts with "tuple".
        let param = EvmParam::new("x", "tuplex");
        assert_eq!(canonical_param_type(&param), "tuplex");
    }

    #[test]
    fn matches_alloy_reference_selectors() {
        let abi: JsonAbi = serde_json::from_str(
            r#"[
                {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
                 "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
                 "outputs": [{"name": "", "type": "bool"}]},
                {"type": "function", "name": "exactInputSingle", "stateMutability": "payable",
                 "inputs": [{"name": "params", "type": "tuple", "components": [
                    {"name": "tokenIn", "type": "address"},
                    {"name": "tokenOut", "type": "address"},
                    {"name": "fee", "type": "uint24"},
                    {"name": "recipient", "type": "address"},
                    {"name": "deadline", "type": "uint256"},
                    {"name": "amountIn", "type": "uint256"},
                    {"name": "amountOutMinimum", "type": "uint256"},
                    {"name": "sqrtPriceLimitX96", "type": "uint160"}
                 ]}],
                 "outputs": [{"name": "amountOut", "type": "uint256"}]},
                {"type": "function", "name": "multicall", "stateMutability": "payable",
                 "inputs": [{"name": "data", "type": "bytes[]"}],
                 "outputs": [{"name": "results", "type": "bytes[]"}]}
            ]"#,
        )
        .unwrap();

        for func in abi.functions() {
            let inputs: Vec<EvmParam> = func.inputs.iter().map(from_alloy).collect();
            let ours = selector_from_signature(&function_signature(&func.name, &inputs));
            let reference = format!("0x{}", hex::encode(func.selector().as_slice()));
            assert_eq!(ours, reference, "{}", func.name);
        }
    }

    #[test]
    fn full_cache_stays_within_capacity() {
        let cache = SelectorCache::with_capacity(2);
        let sigs = ["transfer(address,uint256)", "approve(address,uint256)", "deposit()", "withdraw(uint256)"];
        for sig in sigs {
            assert_eq!(cache.get_or_compute(sig), selector_from_signature(sig));
            assert!(cache.len() <= 2);
        }
        assert_eq!(cache.get_or_compute("deposit()"), "0xd0e30db0");
        assert!(cache.len() <= 2);

        let off = SelectorCache::with_capacity(0);
        assert_eq!(off.get_or_compute("withdraw(uint256)"), "0x2e1a7d4d");
        assert!(off.is_empty());
    }

    #[test]
    fn cache_returns_the_same_selector() {
        let cache = SelectorCache::new();
        assert!(cache.is_empty());
        let first = cache.get_or_compute("transfer(address,uint256)");
        let second = cache.get_or_compute("transfer(address,uint256)");
        assert_eq!(first, "0xa9059cbb");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }
}
