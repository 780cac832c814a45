// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Key-file handling: reading account key material at rest and generating
//! new key files for demo actors.
//!
//! The canonical file format is a hex-encoded 32-byte Ed25519 seed
//! (optionally `0x`-prefixed); base64-encoded seeds are accepted as a
//! fallback.

pub use asset_demo_types::AccountKeyPair;

pub mod keygen {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::path::Path;

    /// Generate a new Ed25519 account keypair and write the hex seed to
    /// `path`, reporting the derived address.
    pub fn generate_account_key_and_write_to_file(path: &Path) -> Result<AccountKeyPair> {
        let keypair = AccountKeyPair::generate(&mut rand::rngs::OsRng);

        println!("Generated new Ed25519 account keypair");
        println!(
            "Public key (hex): {}",
            hex::encode(keypair.public_key_bytes())
        );
        println!("Account address: {}", keypair.address());

        let contents = hex::encode(keypair.to_seed_bytes());
        std::fs::write(path, contents)
            .map_err(|err| anyhow!("Failed to write key to {:?}: {}", path, err))?;

        println!("Key written to: {:?}", path);
        Ok(keypair)
    }
}

pub mod keypair_file {
    use super::*;
    use anyhow::{anyhow, Result};
    use base64ct::{Base64, Encoding};
    use std::path::Path;

    /// Read an account keypair from a file containing a hex-encoded
    /// 32-byte seed. Base64-encoded seeds are accepted as a fallback.
    pub fn read_account_keypair<P: AsRef<Path>>(path: P) -> Result<AccountKeyPair> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!("Key file not found at path: {:?}", path));
        }

        let file_contents = std::fs::read_to_string(path)?;
        let contents = file_contents.trim();

        // Hex seed, with or without 0x prefix
        if let Ok(bytes) = hex::decode(contents.trim_start_matches("0x")) {
            return AccountKeyPair::from_seed_bytes(&bytes)
                .map_err(|e| anyhow!("Invalid key material in {:?}: {}", path, e));
        }

        // Base64 seed
        if let Ok(bytes) = Base64::decode_vec(contents) {
            return AccountKeyPair::from_seed_bytes(&bytes)
                .map_err(|e| anyhow!("Invalid key material in {:?}: {}", path, e));
        }

        Err(anyhow!(
            "Invalid key file format. Expected hex or base64 encoded seed at {:?}",
            path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::keygen::generate_account_key_and_write_to_file;
    use super::keypair_file::read_account_keypair;
    use super::*;
    use base64ct::{Base64, Encoding};

    #[test]
    fn generate_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owner.key");
        let written = generate_account_key_and_write_to_file(&path).unwrap();
        let read = read_account_keypair(&path).unwrap();
        assert_eq!(written.address(), read.address());
    }

    #[test]
    fn reads_prefixed_hex_and_base64() {
        let dir = tempfile::tempdir().unwrap();
        let seed = [5u8; 32];
        let expected = AccountKeyPair::from_seed_bytes(&seed).unwrap().address();

        let hex_path = dir.path().join("hex.key");
        std::fs::write(&hex_path, format!("0x{}\n", hex::encode(seed))).unwrap();
        assert_eq!(read_account_keypair(&hex_path).unwrap().address(), expected);

        let b64_path = dir.path().join("b64.key");
        std::fs::write(&b64_path, Base64::encode_string(&seed)).unwrap();
        assert_eq!(read_account_keypair(&b64_path).unwrap().address(), expected);
    }

    #[test]
    fn rejects_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_account_keypair(dir.path().join("absent.key")).is_err());

        let bad_path = dir.path().join("bad.key");
        std::fs::write(&bad_path, "not a key !!").unwrap();
        assert!(read_account_keypair(&bad_path).is_err());

        // Hex that decodes to the wrong length is still rejected.
        let short_path = dir.path().join("short.key");
        std::fs::write(&short_path, hex::encode([1u8; 16])).unwrap();
        assert!(read_account_keypair(&short_path).is_err());
    }
}
