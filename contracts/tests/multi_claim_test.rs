//! Integration tests for the multi-claim contract.
//!
//! Trees are built with the standard tree fixture over the development
//! accounts, so every root and proof here is one the external builder
//! would produce for the same allocation.

mod common;

use common::{indexed_entries, signers, StandardTree, FIVE_ACCOUNT_ROOT, TWENTY_ACCOUNT_ROOT};
use rail_nft_contracts::batch_registry::ClaimBatch;
use rail_nft_contracts::{hash_leaf, ClaimEntry, ContractError, ContractEvent, NftMultiClaim};
use rail_nft_protocol::crypto::keccak256;
use rail_nft_protocol::token::NftLedger;
use rail_nft_protocol::{Address, Bytes32};

fn deploy() -> (NftMultiClaim, Address, Address) {
    let s = signers();
    let contract = NftMultiClaim::new(s[0], NftLedger::new("Test NFT", "TEST"));
    (contract, s[0], s[1])
}

fn hash_zero_root() -> Bytes32 {
    Bytes32::from_bytes(keccak256(Bytes32::ZERO.as_bytes()))
}

/// Publishes `tree` as a new batch, activates it and clears the event log.
fn publish(contract: &mut NftMultiClaim, owner: &Address, tree: &StandardTree) -> u64 {
    let id = contract.add_claim_batch(owner, tree.root()).unwrap();
    contract.set_active_status(owner, id, true).unwrap();
    contract.take_events();
    id
}

// ---------------------------------------------------------------------------
// Fixture sanity
// ---------------------------------------------------------------------------

#[test]
fn tree_builder_reproduces_external_roots() {
    let signers = signers();
    let five = StandardTree::of(&indexed_entries(&signers[..5]));
    assert_eq!(five.root(), Bytes32::from_hex(FIVE_ACCOUNT_ROOT).unwrap());
    let twenty = StandardTree::of(&indexed_entries(&signers));
    assert_eq!(twenty.root(), Bytes32::from_hex(TWENTY_ACCOUNT_ROOT).unwrap());
}

// ---------------------------------------------------------------------------
// Admin functions
// ---------------------------------------------------------------------------

#[test]
fn admin_calls_from_non_owner_rejected() {
    let (mut contract, _, other) = deploy();

    let err = contract.add_claim_batch(&other, Bytes32::ZERO).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized);
    assert_eq!(err.to_string(), "Ownable: caller is not the owner");

    assert_eq!(
        contract.set_active_status(&other, 1, false),
        Err(ContractError::Unauthorized)
    );
}

#[test]
fn new_batches_get_sequential_ids() {
    let (mut contract, owner, _) = deploy();
    let root = hash_zero_root();

    assert_eq!(contract.add_claim_batch(&owner, root).unwrap(), 0);
    assert_eq!(contract.add_claim_batch(&owner, root).unwrap(), 1);
    assert_eq!(
        contract.take_events(),
        vec![
            ContractEvent::NewBatch { root, id: 0 },
            ContractEvent::NewBatch { root, id: 1 },
        ]
    );

    let batch = contract.claim_batch(1).unwrap();
    assert_eq!(batch.root, root);
    assert!(!batch.active);
    assert_eq!(contract.batch_count(), 2);
}

#[test]
fn batch_status_changes_are_idempotent() {
    let (mut contract, owner, _) = deploy();
    let root = hash_zero_root();
    contract.add_claim_batch(&owner, root).unwrap();
    contract.take_events();

    contract.set_active_status(&owner, 0, true).unwrap();
    assert_eq!(
        contract.take_events(),
        vec![ContractEvent::BatchStatusChange { id: 0, active: true }]
    );
    contract.set_active_status(&owner, 0, true).unwrap();
    assert!(contract.take_events().is_empty());
    assert_eq!(
        contract.claim_batch(0).unwrap(),
        ClaimBatch {
            id: 0,
            root,
            active: true
        }
    );

    contract.set_active_status(&owner, 0, false).unwrap();
    assert_eq!(
        contract.take_events(),
        vec![ContractEvent::BatchStatusChange { id: 0, active: false }]
    );
    contract.set_active_status(&owner, 0, false).unwrap();
    assert!(contract.take_events().is_empty());
    assert!(!contract.claim_batch(0).unwrap().active);
}

#[test]
fn unknown_batch_reads_are_out_of_range() {
    let (contract, _, _) = deploy();
    assert_eq!(
        contract.claim_batch(0),
        Err(ContractError::OutOfRange { id: 0, len: 0 })
    );
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

#[test]
fn hash_leaf_matches_fixture_digests() {
    let (contract, _, _) = deploy();
    for entry in indexed_entries(&signers()) {
        assert_eq!(contract.hash_leaf(&entry), hash_leaf(&entry));
        assert_eq!(contract.hash_leaf(&entry), entry.digest());
    }
}

#[test]
fn hash_leaf_has_no_collisions_across_fixture() {
    let mut digests: Vec<Bytes32> = indexed_entries(&signers())
        .iter()
        .map(hash_leaf)
        .collect();
    let before = digests.len();
    digests.sort();
    digests.dedup();
    assert_eq!(digests.len(), before);
}

#[test]
fn every_leaf_claims_exactly_once() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    for entry in entries.iter().filter(|e| e.balance > 0) {
        let leaf = hash_leaf(entry);
        assert!(!contract.is_claimed(id, &leaf));

        let proof = tree.proof(entry);
        let minted = contract.claim(entry, &proof, id).unwrap();
        assert_eq!(minted.end - minted.start, entry.balance);
        assert_eq!(
            contract.take_events(),
            vec![ContractEvent::Claim {
                batch_id: id,
                leaf,
                claimer: entry.claimer,
                balance: entry.balance,
            }]
        );

        let err = contract.claim(entry, &proof, id).unwrap_err();
        assert_eq!(err, ContractError::InvalidClaim);
        assert_eq!(err.to_string(), "NFTMultiClaim: Invalid Claim");

        assert!(contract.is_claimed(id, &leaf));
        assert_eq!(contract.balance_of(&entry.claimer).unwrap(), entry.balance);
    }

    // 1 + 2 + ... + 19
    assert_eq!(contract.ledger().total_supply(), 190);
}

#[test]
fn inactive_batch_rejects_claims() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    contract.add_claim_batch(&owner, tree.root()).unwrap();

    let entry = &entries[3];
    assert_eq!(
        contract.claim(entry, &tree.proof(entry), 0),
        Err(ContractError::InvalidClaim)
    );
    assert!(!contract.is_claimed(0, &hash_leaf(entry)));
}

#[test]
fn deactivated_batch_stops_claims_until_reactivated() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    contract.claim(&entries[1], &tree.proof(&entries[1]), id).unwrap();
    contract.set_active_status(&owner, id, false).unwrap();
    assert_eq!(
        contract.claim(&entries[2], &tree.proof(&entries[2]), id),
        Err(ContractError::InvalidClaim)
    );
    contract.set_active_status(&owner, id, true).unwrap();
    assert!(contract.claim(&entries[2], &tree.proof(&entries[2]), id).is_ok());
}

#[test]
fn unknown_batch_claim_is_invalid_not_out_of_range() {
    let (mut contract, _, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    assert_eq!(
        contract.claim(&entries[1], &tree.proof(&entries[1]), 7),
        Err(ContractError::InvalidClaim)
    );
}

#[test]
fn tampered_entries_rejected() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    let genuine = entries[5];
    let proof = tree.proof(&genuine);

    let inflated = ClaimEntry::new(genuine.claimer, genuine.balance + 1);
    assert_eq!(contract.claim(&inflated, &proof, id), Err(ContractError::InvalidClaim));

    let redirected = ClaimEntry::new(entries[6].claimer, genuine.balance);
    assert_eq!(contract.claim(&redirected, &proof, id), Err(ContractError::InvalidClaim));

    let wrong_proof = tree.proof(&entries[6]);
    assert_eq!(contract.claim(&genuine, &wrong_proof, id), Err(ContractError::InvalidClaim));

    assert!(contract.take_events().is_empty());
    assert_eq!(contract.ledger().total_supply(), 0);

    assert!(contract.claim(&genuine, &proof, id).is_ok());
}

#[test]
fn same_leaf_is_independent_across_batches() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers()[..5]);
    let tree = StandardTree::of(&entries);
    let first = publish(&mut contract, &owner, &tree);
    let second = publish(&mut contract, &owner, &tree);

    let entry = &entries[4];
    let proof = tree.proof(entry);
    contract.claim(entry, &proof, first).unwrap();
    assert!(contract.is_claimed(first, &hash_leaf(entry)));
    assert!(!contract.is_claimed(second, &hash_leaf(entry)));

    contract.claim(entry, &proof, second).unwrap();
    assert_eq!(contract.balance_of(&entry.claimer).unwrap(), 8);
}

#[test]
fn zero_balance_leaf_is_spent_without_minting() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    let zero = &entries[0];
    assert_eq!(zero.balance, 0);
    let minted = contract.claim(zero, &tree.proof(zero), id).unwrap();
    assert!(minted.is_empty());
    assert!(contract.is_claimed(id, &hash_leaf(zero)));
    assert_eq!(contract.balance_of(&zero.claimer).unwrap(), 0);
    assert_eq!(contract.take_events().len(), 1);

    assert_eq!(
        contract.claim(zero, &tree.proof(zero), id),
        Err(ContractError::InvalidClaim)
    );
}

#[test]
fn claims_may_be_submitted_by_anyone() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers());
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    // No caller argument: tokens always land with the claimer.
    let entry = &entries[9];
    contract.claim(entry, &tree.proof(entry), id).unwrap();
    assert_eq!(contract.balance_of(&entry.claimer).unwrap(), 9);
    assert_eq!(contract.balance_of(&owner).unwrap(), 0);
}

#[test]
fn token_ids_continue_across_claims() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers()[..5]);
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    assert_eq!(contract.claim(&entries[2], &tree.proof(&entries[2]), id).unwrap(), 0..2);
    assert_eq!(contract.claim(&entries[3], &tree.proof(&entries[3]), id).unwrap(), 2..5);
    assert_eq!(contract.owner_of(4).unwrap(), entries[3].claimer);
}

#[test]
fn renounced_owner_freezes_batches_but_not_claims() {
    let (mut contract, owner, _) = deploy();
    let entries = indexed_entries(&signers()[..5]);
    let tree = StandardTree::of(&entries);
    let id = publish(&mut contract, &owner, &tree);

    contract.renounce_ownership(&owner).unwrap();
    assert!(contract.owner().is_zero());
    assert_eq!(
        contract.set_active_status(&owner, id, false),
        Err(ContractError::Unauthorized)
    );
    assert!(contract.claim(&entries[1], &tree.proof(&entries[1]), id).is_ok());
}

#[test]
fn random_allocations_claim_fully() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0xa11dc0de);
    for size in [1usize, 2, 3, 7, 33] {
        let entries: Vec<ClaimEntry> = (0..size)
            .map(|_| {
                let mut raw = [0u8; 20];
                rng.fill(&mut raw[..]);
                raw[0] |= 0x01;
                ClaimEntry::new(Address::from_bytes(raw), rng.gen_range(1..5))
            })
            .collect();
        let tree = StandardTree::of(&entries);

        let (mut contract, owner, _) = deploy();
        let id = publish(&mut contract, &owner, &tree);
        let mut expected_supply = 0;
        for entry in &entries {
            contract.claim(entry, &tree.proof(entry), id).unwrap();
            expected_supply += entry.balance;
        }
        assert_eq!(contract.ledger().total_supply(), expected_supply);
    }
}
