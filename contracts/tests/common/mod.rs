//! Shared fixtures for the contract integration tests.
//!
//! [`StandardTree`] wraps the `merkrs` standard tree builder, so roots and
//! proofs come from an implementation independent of the contract's own
//! hashing and are the ones a real deployment would publish.

#![allow(dead_code)]

use merkrs::standard::Options;
use merkrs::StandardMerkleTree;
use rail_nft_contracts::ClaimEntry;
use rail_nft_protocol::{Address, Bytes32};
use serde_json::{json, Value};

/// The twenty default development accounts, in signer order.
pub const DEV_ACCOUNTS: [&str; 20] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    "0x976EA74026E726554dB657fA54763abd0C3a0aa9",
    "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955",
    "0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f",
    "0xa0Ee7A142d267C1f36714E4a8F75612F20a79720",
    "0xBcd4042DE499D14e55001CcbB24a551F3b954096",
    "0x71bE63f3384f5fb98995898A86B02Fb2426c5788",
    "0xFABB0ac9d68B0B445fB7357272Ff202C5651694a",
    "0x1CBd3b2770909D4e10f157cABC84C7264073C9Ec",
    "0xdF3e18d64BC6A983f673Ab319CCaE4f1a57C7097",
    "0xcd3B766CCDd6AE721141F452C550Ca635964ce71",
    "0x2546BcD3c84621e976D8185a91A922aE77ECEc30",
    "0xbDA5747bFD65F08deb54cb465eB87D40e51B197E",
    "0xdD2FD4581271e230360230F9337D5c0430Bf44C0",
    "0x8626f6940E2eb28930eFb4CeF49B2d1F2C9C1199",
];

/// Root of the tree over the first five accounts with balances `0..5`.
pub const FIVE_ACCOUNT_ROOT: &str =
    "0x8810b0a109cd4d21226710888f7962714388f0dc96e2e749cc6d9040368d14a2";

/// Root of the tree over all twenty accounts with balances `0..20`.
pub const TWENTY_ACCOUNT_ROOT: &str =
    "0x280cba2975f904e30bdd0086af6cb2b4ff1f7203baa781091887c72da3bfaece";

/// All development accounts as addresses.
pub fn signers() -> Vec<Address> {
    DEV_ACCOUNTS
        .iter()
        .map(|s| Address::from_hex(s).unwrap())
        .collect()
}

/// `(signer_i, i)` for every signer: the allocation used throughout.
pub fn indexed_entries(signers: &[Address]) -> Vec<ClaimEntry> {
    signers
        .iter()
        .enumerate()
        .map(|(i, s)| ClaimEntry::new(*s, i as u64))
        .collect()
}

/// Claim tree built by `merkrs`, the OpenZeppelin-compatible standard
/// tree builder, over `(address, uint256)` leaves.
pub struct StandardTree {
    inner: StandardMerkleTree,
}

fn leaf_value(entry: &ClaimEntry) -> Vec<Value> {
    vec![
        json!(entry.claimer.to_string()),
        json!(entry.balance.to_string()),
    ]
}

impl StandardTree {
    pub fn of(entries: &[ClaimEntry]) -> Self {
        let values = entries.iter().map(leaf_value).collect();
        let inner = StandardMerkleTree::new(
            values,
            vec!["address".to_string(), "uint256".to_string()],
            Options::default(),
        )
        .expect("standard tree builds");
        Self { inner }
    }

    pub fn root(&self) -> Bytes32 {
        Bytes32::from_bytes(*self.inner.root())
    }

    /// Sibling path from `entry`'s leaf up to the root.
    pub fn proof(&self, entry: &ClaimEntry) -> Vec<Bytes32> {
        self.inner
            .proof(&leaf_value(entry))
            .expect("entry is in the tree")
            .into_iter()
            .map(Bytes32::from_bytes)
            .collect()
    }
}
