//! Transaction submission types.
//!
//! Signing and serialization live outside this crate. Anything that can
//! report its signatures and packed bytes can be pushed to a node.

/// A signed, serialized transaction ready for `push_transaction`.
pub trait SignedTransaction {
    /// Signatures in the node's string format (`SIG_K1_...`).
    fn signatures(&self) -> Vec<String>;

    /// The serialized transaction.
    fn pack(&self) -> Vec<u8>;
}

/// A transaction that was signed and packed elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedTransaction {
    pub signatures: Vec<String>,
    pub packed_trx: Vec<u8>,
}

impl PackedTransaction {
    pub fn new(signatures: Vec<String>, packed_trx: Vec<u8>) -> Self {
        Self {
            signatures,
            packed_trx,
        }
    }

    /// Build from the hex form printed by most Antelope tooling.
    pub fn from_hex(signatures: Vec<String>, packed_trx: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self::new(signatures, hex::decode(packed_trx)?))
    }
}

impl SignedTransaction for PackedTransaction {
    fn signatures(&self) -> Vec<String> {
        self.signatures.clone()
    }

    fn pack(&self) -> Vec<u8> {
        self.packed_trx.clone()
    }
}

/// Options for `push_transaction`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushOptions {
    pub compression: bool,
    /// Hex-encoded context-free data, empty when there is none.
    pub packed_context_free_data: String,
}

impl PushOptions {
    pub fn compression(mut self, compression: bool) -> Self {
        self.compression = compression;
        self
    }

    pub fn packed_context_free_data(mut self, data: impl Into<String>) -> Self {
        self.packed_context_free_data = data.into();
        self
    }
}
