//! # Protocol Configuration & Constants
//!
//! Every magic number in RAIL NFT lives here. If you're hardcoding a
//! constant somewhere else, move it here first.
//!
//! Most of these are dictated by the EVM and the Solidity ABI rather than
//! chosen by us. Changing them breaks compatibility with every tree the
//! off-chain tooling has ever produced, so don't.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full version string of the contract suite.
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Network name reported by the devnet node.
pub const DEVNET_NETWORK: &str = "devnet";

// ---------------------------------------------------------------------------
// Fixed Widths
// ---------------------------------------------------------------------------

/// EVM addresses are 20 bytes. Always.
pub const ADDRESS_LENGTH: usize = 20;

/// Keccak-256 output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Every static ABI value occupies one 32-byte word.
pub const ABI_WORD_LENGTH: usize = 32;

/// Encoded length of a claim entry: `abi.encode(address, uint256)`.
pub const CLAIM_ENTRY_ENCODED_LENGTH: usize = 2 * ABI_WORD_LENGTH;

/// The hash function used for leaves, tree nodes and EIP-55 checksums.
pub const PRIMARY_HASH_FUNCTION: &str = "Keccak-256";

// ---------------------------------------------------------------------------
// Token Metadata
// ---------------------------------------------------------------------------

/// Path segment for tokens held by anyone but the designated address.
pub const URI_VARIANT_NORMAL: &str = "normal";

/// Path segment for tokens held by the designated address.
pub const URI_VARIANT_SPECIAL: &str = "special";

/// Collection name used when the node is started without `--name`.
pub const DEFAULT_TOKEN_NAME: &str = "RAIL NFT";

/// Collection symbol used when the node is started without `--symbol`.
pub const DEFAULT_TOKEN_SYMBOL: &str = "RNFT";

// ---------------------------------------------------------------------------
// Node Defaults
// ---------------------------------------------------------------------------

/// Default port for the JSON-RPC API.
pub const DEFAULT_RPC_PORT: u16 = 8545;

/// Default port for the Prometheus metrics endpoint.
pub const DEFAULT_METRICS_PORT: u16 = 9545;

/// Capacity of the broadcast channel that feeds WebSocket subscribers.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
