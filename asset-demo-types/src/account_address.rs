// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 16-byte account address.
///
/// Addresses are printed as `0x`-prefixed hex with leading zeros trimmed
/// (`0x1` for the framework address) and parsed from either the short
/// literal or the full 32-character form. The BCS form is the raw 16
/// bytes; human-readable formats (JSON) use the hex literal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; Self::LENGTH]);

impl AccountAddress {
    pub const LENGTH: usize = 16;

    /// The reserved all-zero address.
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    /// The framework address `0x1`, home of the standard fungible store.
    pub const ONE: Self = {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[Self::LENGTH - 1] = 1;
        Self(bytes)
    };

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| {
                TypeError::InvalidAddress(format!(
                    "expected {} bytes, got {}",
                    Self::LENGTH,
                    bytes.len()
                ))
            })
    }

    /// Parse a `0x`-prefixed hex literal. Odd-length and short literals
    /// are left-padded, so `0x1` and `0x00000000000000000000000000000001`
    /// are the same address.
    pub fn from_hex_literal(literal: &str) -> Result<Self, TypeError> {
        let hex_part = literal
            .strip_prefix("0x")
            .ok_or_else(|| TypeError::InvalidAddress(format!("missing 0x prefix: {literal:?}")))?;
        if hex_part.is_empty() || hex_part.len() > Self::LENGTH * 2 {
            return Err(TypeError::InvalidAddress(literal.to_string()));
        }
        let mut padded = String::with_capacity(Self::LENGTH * 2);
        for _ in 0..(Self::LENGTH * 2 - hex_part.len()) {
            padded.push('0');
        }
        padded.push_str(hex_part);
        let bytes =
            hex::decode(&padded).map_err(|_| TypeError::InvalidAddress(literal.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Short `0x`-prefixed literal with leading zeros trimmed.
    pub fn to_hex_literal(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl FromStr for AccountAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex_literal())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let literal = String::deserialize(deserializer)?;
            Self::from_hex_literal(&literal).map_err(serde::de::Error::custom)
        } else {
            <[u8; Self::LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_round_trip() {
        let addr = AccountAddress::from_hex_literal("0xf8eda27b31a0dcd9b6c06074d74a2c6c").unwrap();
        assert_eq!(addr.to_hex_literal(), "0xf8eda27b31a0dcd9b6c06074d74a2c6c");
        assert_eq!(
            addr,
            addr.to_hex_literal().parse::<AccountAddress>().unwrap()
        );
    }

    #[test]
    fn short_literals_are_left_padded() {
        assert_eq!(AccountAddress::from_hex_literal("0x1").unwrap(), AccountAddress::ONE);
        assert_eq!(AccountAddress::ONE.to_hex_literal(), "0x1");
        assert_eq!(AccountAddress::ZERO.to_hex_literal(), "0x0");
        // Odd number of hex digits is fine.
        let a = AccountAddress::from_hex_literal("0xabc").unwrap();
        let b = AccountAddress::from_hex_literal("0x0abc").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        assert!(AccountAddress::from_hex_literal("f8ed").is_err());
        assert!(AccountAddress::from_hex_literal("0x").is_err());
        assert!(AccountAddress::from_hex_literal("0xzz").is_err());
        // 17 bytes is one too many.
        assert!(AccountAddress::from_hex_literal(
            "0xf8eda27b31a0dcd9b6c06074d74a2c6c00"
        )
        .is_err());
    }

    #[test]
    fn bcs_form_is_raw_bytes() {
        let addr = AccountAddress::from_hex_literal("0x1").unwrap();
        let bytes = bcs::to_bytes(&addr).unwrap();
        assert_eq!(bytes.len(), AccountAddress::LENGTH);
        assert_eq!(bcs::from_bytes::<AccountAddress>(&bytes).unwrap(), addr);
    }

    #[test]
    fn json_form_is_hex_literal() {
        let addr = AccountAddress::from_hex_literal("0x1").unwrap();
        assert_eq!(serde_json::to_string(&addr).unwrap(), "\"0x1\"");
        let back: AccountAddress = serde_json::from_str("\"0x1\"").unwrap();
        assert_eq!(back, addr);
    }
}
