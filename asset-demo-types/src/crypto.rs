// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::error::TypeError;
use crate::transaction::{
    RawTransaction, SignedTransaction, TransactionAuthenticator, ED25519_SCHEME,
};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// An account's Ed25519 keypair. The address is derived from the public
/// key at construction and never changes afterwards.
#[derive(Clone)]
pub struct AccountKeyPair {
    signing_key: SigningKey,
    address: AccountAddress,
}

/// Address derivation: last 16 bytes of `sha3_256(pubkey || scheme)`.
fn derive_address(public_key: &VerifyingKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.as_bytes());
    hasher.update([ED25519_SCHEME]);
    let digest = hasher.finalize();
    let mut bytes = [0u8; AccountAddress::LENGTH];
    bytes.copy_from_slice(&digest[digest.len() - AccountAddress::LENGTH..]);
    AccountAddress::new(bytes)
}

impl AccountKeyPair {
    /// Build a keypair from a raw 32-byte Ed25519 seed, however it was
    /// sourced (key file, test fixture).
    pub fn from_seed_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let seed: [u8; 32] = bytes.try_into().map_err(|_| TypeError::InvalidKeyLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        let signing_key = SigningKey::from_bytes(&seed);
        let address = derive_address(&signing_key.verifying_key());
        Ok(Self {
            signing_key,
            address,
        })
    }

    pub fn generate<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        let signing_key = SigningKey::generate(rng);
        let address = derive_address(&signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The raw seed, for writing key material at rest.
    pub fn to_seed_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Sign a raw transaction. Pure: deterministic for a fixed sequence
    /// number and expiration, with no side effects.
    pub fn sign_transaction(&self, raw: RawTransaction) -> Result<SignedTransaction, TypeError> {
        let digest = raw.signing_digest()?;
        let signature = self.signing_key.sign(&digest);
        Ok(SignedTransaction::new(
            raw,
            TransactionAuthenticator::Ed25519 {
                public_key: self.public_key_bytes().to_vec(),
                signature: signature.to_bytes().to_vec(),
            },
        ))
    }
}

impl fmt::Debug for AccountKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountKeyPair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl SignedTransaction {
    /// Check the authenticator against the canonical signing digest and
    /// that the sender address is bound to the signing public key.
    pub fn verify_signature(&self) -> Result<(), TypeError> {
        let TransactionAuthenticator::Ed25519 {
            public_key,
            signature,
        } = &self.authenticator;

        let pk_bytes: [u8; 32] = public_key
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidSignature("bad public key length".to_string()))?;
        let verifying_key = VerifyingKey::from_bytes(&pk_bytes)
            .map_err(|e| TypeError::InvalidSignature(e.to_string()))?;

        if derive_address(&verifying_key) != self.raw.sender {
            return Err(TypeError::InvalidSignature(
                "public key does not match sender address".to_string(),
            ));
        }

        let sig_bytes: [u8; 64] = signature
            .as_slice()
            .try_into()
            .map_err(|_| TypeError::InvalidSignature("bad signature length".to_string()))?;
        let signature = Signature::from_bytes(&sig_bytes);
        let digest = self.raw.signing_digest()?;
        verifying_key
            .verify_strict(&digest, &signature)
            .map_err(|e| TypeError::InvalidSignature(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Identifier;
    use crate::transaction::{ChainId, EntryFunction};
    use crate::type_tag::FunctionId;

    fn raw_txn(sender: AccountAddress) -> RawTransaction {
        let function = FunctionId::new(
            AccountAddress::ONE,
            Identifier::new("fungible_store").unwrap(),
            Identifier::new("transfer").unwrap(),
        );
        RawTransaction::new(
            sender,
            0,
            EntryFunction::new(function, vec![], vec![bcs::to_bytes(&42u64).unwrap()]),
            10_000_000,
            1,
            1_700_000_000,
            ChainId::new(254),
        )
    }

    #[test]
    fn same_seed_same_address() {
        let seed = [9u8; 32];
        let a = AccountKeyPair::from_seed_bytes(&seed).unwrap();
        let b = AccountKeyPair::from_seed_bytes(&seed).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key_bytes(), b.public_key_bytes());
    }

    #[test]
    fn rejects_short_seed() {
        assert!(matches!(
            AccountKeyPair::from_seed_bytes(&[1u8; 31]),
            Err(TypeError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = AccountKeyPair::from_seed_bytes(&[7u8; 32]).unwrap();
        let raw = raw_txn(kp.address());
        let first = kp.sign_transaction(raw.clone()).unwrap();
        let second = kp.sign_transaction(raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_hex().unwrap(), second.to_hex().unwrap());
    }

    #[test]
    fn signature_verifies_and_binds_sender() {
        let kp = AccountKeyPair::from_seed_bytes(&[7u8; 32]).unwrap();
        let signed = kp.sign_transaction(raw_txn(kp.address())).unwrap();
        signed.verify_signature().unwrap();

        // A transaction claiming a different sender must not verify.
        let other = AccountKeyPair::from_seed_bytes(&[8u8; 32]).unwrap();
        let forged = kp.sign_transaction(raw_txn(other.address())).unwrap();
        assert!(forged.verify_signature().is_err());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let kp = AccountKeyPair::from_seed_bytes(&[7u8; 32]).unwrap();
        let mut signed = kp.sign_transaction(raw_txn(kp.address())).unwrap();
        signed.raw.sequence_number = 99;
        assert!(signed.verify_signature().is_err());
    }
}
