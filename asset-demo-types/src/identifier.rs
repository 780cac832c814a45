// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated Move identifier: module and function names.
///
/// Valid identifiers match `[a-zA-Z][a-zA-Z0-9_]*` or `_[a-zA-Z0-9_]+`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(Box<str>);

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some('_') if s.len() > 1 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Identifier {
    pub fn new(s: impl Into<Box<str>>) -> Result<Self, TypeError> {
        let s = s.into();
        if is_valid_identifier(&s) {
            Ok(Self(s))
        } else {
            Err(TypeError::InvalidIdentifier(s.into_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl FromStr for Identifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identifier::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_move_style_names() {
        for ok in ["managed_asset", "mint", "freeze_account", "_private", "v2"] {
            assert!(Identifier::new(ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_names() {
        for bad in ["", "_", "0x1", "9lives", "has-dash", "has space", "mód"] {
            assert!(Identifier::new(bad).is_err(), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Identifier>("\"mint\"").is_ok());
        assert!(serde_json::from_str::<Identifier>("\"not valid\"").is_err());
    }
}
