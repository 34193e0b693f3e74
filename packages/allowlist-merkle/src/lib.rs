//! Merkle commitments for mint allowlists.
//!
//! Leaves are `keccak256(address)` over the UTF-8 bytes of the address. Inner
//! nodes hash the two children in sorted order, so a proof is just the list of
//! sibling hashes from leaf to root with no left/right flags.

use sha3::{Digest, Keccak256};
use thiserror::Error;

pub const HASH_LEN: usize = 32;

pub type Hash = [u8; HASH_LEN];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerkleError {
    #[error("InvalidHex: {0}")]
    InvalidHex(String),

    #[error("InvalidHashLength: expected {HASH_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Leaf committed for an address
pub fn leaf_hash(address: &str) -> Hash {
    keccak256(address.as_bytes())
}

/// Hashes two nodes smaller-first, so `hash_pair(a, b) == hash_pair(b, a)`
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; HASH_LEN * 2];
    buf[..HASH_LEN].copy_from_slice(lo);
    buf[HASH_LEN..].copy_from_slice(hi);
    keccak256(&buf)
}

/// Recomputes the root from `leaf` and its sibling path and compares it to `root`.
pub fn verify(root: &Hash, leaf: Hash, proof: &[Hash]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// Parses a 32 byte hash from hex, with or without a `0x` prefix
pub fn parse_hash(value: &str) -> Result<Hash, MerkleError> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(trimmed).map_err(|_| MerkleError::InvalidHex(value.to_string()))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| MerkleError::InvalidLength(len))
}

pub fn parse_proof<S: AsRef<str>>(proof: &[S]) -> Result<Vec<Hash>, MerkleError> {
    proof.iter().map(|p| parse_hash(p.as_ref())).collect()
}

pub fn to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Tree over an ordered list of leaves.
///
/// An unpaired node at the end of a layer is carried up unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<Hash>) -> Self {
        let mut layers = vec![leaves];
        while let Some(layer) = layers.last() {
            if layer.len() <= 1 {
                break;
            }
            let next = layer
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next);
        }
        MerkleTree { layers }
    }

    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            addresses
                .into_iter()
                .map(|a| leaf_hash(a.as_ref()))
                .collect(),
        )
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// `None` for an empty tree
    pub fn root(&self) -> Option<Hash> {
        self.layers.last().and_then(|layer| layer.first().copied())
    }

    pub fn position(&self, leaf: &Hash) -> Option<usize> {
        self.leaves().iter().position(|l| l == leaf)
    }

    /// Sibling path for the leaf at `index`
    pub fn proof(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.leaves().len() {
            return None;
        }
        let mut proof = Vec::with_capacity(self.layers.len());
        let mut idx = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            if let Some(sibling) = layer.get(idx ^ 1) {
                proof.push(*sibling);
            }
            idx /= 2;
        }
        Some(proof)
    }

    pub fn proof_for_address(&self, address: &str) -> Option<Vec<Hash>> {
        self.position(&leaf_hash(address))
            .and_then(|idx| self.proof(idx))
    }

    pub fn hex_proof_for_address(&self, address: &str) -> Option<Vec<String>> {
        self.proof_for_address(address)
            .map(|proof| proof.iter().map(to_hex).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("allowed{}", i)).collect()
    }

    #[test]
    fn keccak_matches_ethereum_empty_input() {
        assert_eq!(
            to_hex(&keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn pair_hash_is_order_insensitive() {
        let a = leaf_hash("a");
        let b = leaf_hash("b");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
        assert_ne!(hash_pair(&a, &b), hash_pair(&a, &a));
    }

    #[test]
    fn every_member_verifies() {
        for n in [1usize, 2, 3, 5, 8, 18] {
            let addrs = members(n);
            let tree = MerkleTree::from_addresses(&addrs);
            let root = tree.root().unwrap();
            for addr in &addrs {
                let proof = tree.proof_for_address(addr).unwrap();
                assert!(verify(&root, leaf_hash(addr), &proof), "{} of {}", addr, n);
                // same inputs, same answer
                assert!(verify(&root, leaf_hash(addr), &proof));
            }
        }
    }

    #[test]
    fn single_leaf_tree_root_is_the_leaf() {
        let tree = MerkleTree::from_addresses(["only"]);
        assert_eq!(tree.root(), Some(leaf_hash("only")));
        assert_eq!(tree.proof(0), Some(vec![]));
        assert!(verify(&leaf_hash("only"), leaf_hash("only"), &[]));
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = MerkleTree::new(vec![]);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.proof(0), None);
    }

    #[test]
    fn non_member_is_rejected() {
        let addrs = members(18);
        let tree = MerkleTree::from_addresses(&addrs);
        let root = tree.root().unwrap();

        assert!(tree.proof_for_address("outsider").is_none());

        // someone else's proof does not work for an outsider
        let borrowed = tree.proof_for_address(&addrs[0]).unwrap();
        assert!(!verify(&root, leaf_hash("outsider"), &borrowed));

        // and a member's proof does not transfer to another member
        assert!(!verify(&root, leaf_hash(&addrs[1]), &borrowed));
    }

    #[test]
    fn replacing_root_invalidates_old_proofs() {
        let old_tree = MerkleTree::from_addresses(members(6));
        let new_tree = MerkleTree::from_addresses(["allowed0", "newcomer"]);
        let new_root = new_tree.root().unwrap();

        let dropped = old_tree.proof_for_address("allowed3").unwrap();
        assert!(!verify(&new_root, leaf_hash("allowed3"), &dropped));

        let kept = new_tree.proof_for_address("allowed0").unwrap();
        assert!(verify(&new_root, leaf_hash("allowed0"), &kept));
    }

    #[test]
    fn odd_layer_carries_last_node_up() {
        let leaves: Vec<Hash> = members(3).iter().map(|a| leaf_hash(a)).collect();
        let tree = MerkleTree::new(leaves.clone());
        let expected = hash_pair(&hash_pair(&leaves[0], &leaves[1]), &leaves[2]);
        assert_eq!(tree.root(), Some(expected));
        assert_eq!(tree.proof(2), Some(vec![hash_pair(&leaves[0], &leaves[1])]));
    }

    #[test]
    fn parse_hash_accepts_prefixed_and_bare_hex() {
        let hash = leaf_hash("allowed0");
        let bare = to_hex(&hash);
        assert_eq!(parse_hash(&bare), Ok(hash));
        assert_eq!(parse_hash(&format!("0x{}", bare)), Ok(hash));

        assert_eq!(parse_hash("abcd"), Err(MerkleError::InvalidLength(2)));
        assert_eq!(
            parse_hash("zz"),
            Err(MerkleError::InvalidHex("zz".to_string()))
        );
    }

    #[test]
    fn hex_proof_round_trips_through_parse() {
        let tree = MerkleTree::from_addresses(members(7));
        let hex_proof = tree.hex_proof_for_address("allowed4").unwrap();
        let proof = parse_proof(&hex_proof).unwrap();
        assert!(verify(
            &tree.root().unwrap(),
            leaf_hash("allowed4"),
            &proof
        ));
    }
}
