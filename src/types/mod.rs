//! Shared primitive types.
mod call;
pub use call::*;

mod ens;
pub use ens::*;

mod erc20;
pub use erc20::*;

mod multicall;
pub use multicall::*;

mod token;
pub use token::*;
