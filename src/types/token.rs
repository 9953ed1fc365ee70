use serde::{Deserialize, Serialize};

/// ERC-20 metadata of a token contract.
///
/// Fields that could not be decoded keep their default value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMeta {
    /// Token symbol.
    pub symbol: String,
    /// Token name.
    pub name: String,
    /// Token decimals.
    pub decimals: u8,
}

/// Token metadata together with the owner's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Token symbol.
    pub symbol: String,
    /// Token name.
    pub name: String,
    /// Token decimals.
    pub decimals: u8,
    /// The balance, either as a raw integer or scaled by `decimals`.
    pub balance_of: String,
}

impl TokenInfo {
    /// Create a new instance of [`Self`] from decoded metadata and a formatted balance.
    pub fn new(meta: TokenMeta, balance_of: String) -> Self {
        let TokenMeta { symbol, name, decimals } = meta;
        Self { symbol, name, decimals, balance_of }
    }
}
