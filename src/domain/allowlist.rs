use alloy::primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building the allowlist tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllowlistError {
    #[error("allowlist is empty, no root definable")]
    Empty,
}

/// Membership proof for one allowlist address.
///
/// An ordered sequence of sibling digests from leaf to root. Pairing order is
/// implicit: every combine step sorts the pair before hashing, so no
/// left/right index bits are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Sibling hashes along the path from leaf to root.
    pub path: Vec<B256>,
}

/// Hash an address to its allowlist leaf.
///
/// keccak256 over the 20 raw address bytes, matching the on-chain
/// `keccak256(abi.encodePacked(msg.sender))` convention.
pub fn leaf_hash(address: &Address) -> B256 {
    keccak256(address.as_slice())
}

/// Combine two nodes, sorting the pair before hashing.
///
/// The sort is the canonical tie-break rule: the same two digests produce the
/// same parent regardless of which side each came from.
fn hash_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

/// Merkle tree over the sale allowlist.
///
/// Built once at startup and immutable afterwards. The leaf layer is sorted
/// before the tree is built, which together with the sorted-pair combine rule
/// makes the root invariant to the input ordering of the allowlist.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    /// All levels from the sorted leaf layer (level 0) up to the root.
    layers: Vec<Vec<B256>>,
}

impl AllowlistTree {
    /// Build the tree from the fixed allowlist.
    ///
    /// Fails only if the allowlist is empty. An odd trailing node at any
    /// level is promoted to the next level unchanged.
    pub fn build(allowlist: &[Address]) -> Result<Self, AllowlistError> {
        if allowlist.is_empty() {
            return Err(AllowlistError::Empty);
        }

        let mut current: Vec<B256> = allowlist.iter().map(leaf_hash).collect();
        current.sort_unstable();

        let mut layers = Vec::new();
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                next.push(match *pair {
                    [left, right] => hash_pair(left, right),
                    [odd] => odd,
                    _ => unreachable!("chunks(2) yields 1 or 2 nodes"),
                });
            }
            layers.push(std::mem::replace(&mut current, next));
        }
        layers.push(current);

        Ok(Self { layers })
    }

    /// The root digest summarizing the entire allowlist.
    pub fn root(&self) -> B256 {
        // build() guarantees a final single-node layer.
        self.layers[self.layers.len() - 1][0]
    }

    /// Number of allowlisted addresses.
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Whether an address is on the allowlist.
    pub fn contains(&self, address: &Address) -> bool {
        self.layers[0].binary_search(&leaf_hash(address)).is_ok()
    }

    /// Generate a membership proof for an address.
    ///
    /// Returns `None` when the address is not on the allowlist — absence is
    /// a signal, not an error.
    pub fn proof_for(&self, address: &Address) -> Option<MembershipProof> {
        let leaf = leaf_hash(address);
        let mut index = self.layers[0].binary_search(&leaf).ok()?;

        let mut path = Vec::with_capacity(self.layers.len() - 1);
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            // A promoted odd node has no sibling at this level.
            if let Some(digest) = layer.get(sibling) {
                path.push(*digest);
            }
            index /= 2;
        }

        Some(MembershipProof { path })
    }
}

/// Recompute the root from a leaf and a proof, and compare.
///
/// Each step combines the running digest with the next sibling under the same
/// sorted-pair rule used by [`AllowlistTree::build`].
pub fn verify_membership(proof: &MembershipProof, leaf: B256, root: B256) -> bool {
    let computed = proof
        .path
        .iter()
        .fold(leaf, |node, sibling| hash_pair(node, *sibling));
    computed == root
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn sample_allowlist() -> Vec<Address> {
        vec![
            address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            address!("cccccccccccccccccccccccccccccccccccccccc"),
            address!("dddddddddddddddddddddddddddddddddddddddd"),
        ]
    }

    #[test]
    fn test_empty_allowlist_rejected() {
        assert_eq!(AllowlistTree::build(&[]).unwrap_err(), AllowlistError::Empty);
    }

    #[test]
    fn test_single_address_root_is_leaf() {
        let addr = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let tree = AllowlistTree::build(&[addr]).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), leaf_hash(&addr));

        let proof = tree.proof_for(&addr).unwrap();
        assert!(proof.path.is_empty());
        assert!(verify_membership(&proof, leaf_hash(&addr), tree.root()));
    }

    #[test]
    fn test_every_member_proves_and_verifies() {
        let allowlist = sample_allowlist();
        let tree = AllowlistTree::build(&allowlist).unwrap();

        for addr in &allowlist {
            let proof = tree.proof_for(addr).expect("member must have a proof");
            assert!(
                verify_membership(&proof, leaf_hash(addr), tree.root()),
                "proof for {addr} must verify"
            );
        }
    }

    #[test]
    fn test_absent_address_has_no_proof() {
        let tree = AllowlistTree::build(&sample_allowlist()).unwrap();
        let outsider = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

        assert!(!tree.contains(&outsider));
        assert!(tree.proof_for(&outsider).is_none());
    }

    #[test]
    fn test_root_invariant_to_input_order() {
        let forward = sample_allowlist();
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut shuffled = forward.clone();
        shuffled.swap(0, 2);
        shuffled.swap(1, 3);

        let root = AllowlistTree::build(&forward).unwrap().root();
        assert_eq!(root, AllowlistTree::build(&reversed).unwrap().root());
        assert_eq!(root, AllowlistTree::build(&shuffled).unwrap().root());
    }

    #[test]
    fn test_tampered_sibling_fails_verification() {
        let allowlist = sample_allowlist();
        let tree = AllowlistTree::build(&allowlist).unwrap();
        let member = &allowlist[1];

        let proof = tree.proof_for(member).unwrap();
        let leaf = leaf_hash(member);
        assert!(verify_membership(&proof, leaf, tree.root()));

        for i in 0..proof.path.len() {
            let mut tampered = proof.clone();
            let mut bytes = tampered.path[i].0;
            bytes[0] ^= 0x01;
            tampered.path[i] = B256::from(bytes);

            assert!(
                !verify_membership(&tampered, leaf, tree.root()),
                "tampering sibling {i} must falsify the proof"
            );
        }
    }

    #[test]
    fn test_wrong_root_fails_verification() {
        let allowlist = sample_allowlist();
        let tree = AllowlistTree::build(&allowlist).unwrap();
        let proof = tree.proof_for(&allowlist[0]).unwrap();

        assert!(!verify_membership(
            &proof,
            leaf_hash(&allowlist[0]),
            B256::ZERO
        ));
    }

    #[test]
    fn test_odd_sized_allowlist() {
        let mut allowlist = sample_allowlist();
        allowlist.push(address!("1111111111111111111111111111111111111111"));
        let tree = AllowlistTree::build(&allowlist).unwrap();

        assert_eq!(tree.len(), 5);
        for addr in &allowlist {
            let proof = tree.proof_for(addr).unwrap();
            assert!(verify_membership(&proof, leaf_hash(addr), tree.root()));
        }
    }

    #[test]
    fn test_root_changes_with_allowlist() {
        let base = AllowlistTree::build(&sample_allowlist()).unwrap();

        let mut extended = sample_allowlist();
        extended.push(address!("1111111111111111111111111111111111111111"));
        let grown = AllowlistTree::build(&extended).unwrap();

        assert_ne!(base.root(), grown.root());
    }
}
