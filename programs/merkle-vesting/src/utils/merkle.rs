//! Sorted-pair Merkle membership proofs over BLAKE3.
//!
//! - node = BLAKE3(min(a, b) || max(a, b)), ordering is lexicographic on the
//!   32 raw bytes (i.e. numeric big-endian)
//! - leaf = BLAKE3(index LE u64 || account || share LE u64), fixed 48 bytes
//! - an empty proof verifies iff leaf == root

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

pub type Hash = [u8; 32];

/// One committed `(index, account, share)` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeneficiaryLeaf {
    pub index: u64,
    pub account: Pubkey,
    pub share: u64,
}

/// Fixed-width leaf preimage; every field has its own byte range.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct LeafPreimage {
    index: [u8; 8],
    account: [u8; 32],
    share: [u8; 8],
}

impl BeneficiaryLeaf {
    pub fn hash(&self) -> Hash {
        let preimage = LeafPreimage {
            index: self.index.to_le_bytes(),
            account: self.account.to_bytes(),
            share: self.share.to_le_bytes(),
        };
        *blake3::hash(bytemuck::bytes_of(&preimage)).as_bytes()
    }
}

pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = blake3::Hasher::new();
    hasher.update(lo);
    hasher.update(hi);
    *hasher.finalize().as_bytes()
}

pub fn verify(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling));
    computed == *root
}
