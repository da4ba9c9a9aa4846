//! Mock NFT minting for high scores. No blockchain is involved: fees are
//! computed, latency and failures are simulated, and receipts land in a
//! local ledger file.

mod fee;
mod metadata;
mod minter;

pub use fee::{MINIMUM_MINT_SCORE, MintOffer, Rarity, calculate_minting_fee};
pub use metadata::{AttributeValue, GAME_NAME, NftAttribute, NftMetadata};
pub use minter::{DEFAULT_FAILURE_RATE, MAX_TOKEN_ID, MintError, MintReceipt, MintedNft, MockMinter};
