// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::error::TypeError;
use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Move type tag, rendered in canonical form for view-call arguments
/// (`u64`, `address`, `vector<u8>`, `0x1::stc::STC`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: Identifier,
    pub name: Identifier,
    pub type_args: Vec<TypeTag>,
}

/// A fully-qualified entry or view function: `0xADDR::module::function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId {
    pub address: AccountAddress,
    pub module: Identifier,
    pub function: Identifier,
}

impl FunctionId {
    pub fn new(address: AccountAddress, module: Identifier, function: Identifier) -> Self {
        Self {
            address,
            module,
            function,
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.function)
    }
}

impl FromStr for FunctionId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split("::");
        let (addr, module, function) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(a), Some(m), Some(f), None) => (a, m, f),
            _ => return Err(TypeError::InvalidTypeTag(format!("bad function id: {s}"))),
        };
        Ok(Self {
            address: AccountAddress::from_hex_literal(addr)?,
            module: Identifier::new(module)?,
            function: Identifier::new(function)?,
        })
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_args.split_first() {
            write!(f, "<{first}")?;
            for tag in rest {
                write!(f, ", {tag}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_tag(s.trim())
    }
}

fn parse_type_tag(s: &str) -> Result<TypeTag, TypeError> {
    match s {
        "bool" => return Ok(TypeTag::Bool),
        "u8" => return Ok(TypeTag::U8),
        "u64" => return Ok(TypeTag::U64),
        "u128" => return Ok(TypeTag::U128),
        "address" => return Ok(TypeTag::Address),
        "signer" => return Ok(TypeTag::Signer),
        _ => {}
    }
    if let Some(rest) = s.strip_prefix("vector<") {
        let inner = rest
            .strip_suffix('>')
            .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
        return Ok(TypeTag::Vector(Box::new(parse_type_tag(inner.trim())?)));
    }
    parse_struct_tag(s).map(|tag| TypeTag::Struct(Box::new(tag)))
}

fn parse_struct_tag(s: &str) -> Result<StructTag, TypeError> {
    let (base, generics) = match s.find('<') {
        Some(open) => {
            let inner = s[open + 1..]
                .strip_suffix('>')
                .ok_or_else(|| TypeError::InvalidTypeTag(s.to_string()))?;
            (&s[..open], Some(inner))
        }
        None => (s, None),
    };

    let mut parts = base.split("::");
    let (addr, module, name) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(m), Some(n), None) => (a, m, n),
        _ => return Err(TypeError::InvalidTypeTag(s.to_string())),
    };

    let type_args = match generics {
        None => vec![],
        Some(inner) => split_top_level(inner)
            .into_iter()
            .map(|arg| parse_type_tag(arg.trim()))
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(StructTag {
        address: AccountAddress::from_hex_literal(addr)?,
        module: Identifier::new(module)?,
        name: Identifier::new(name)?,
        type_args,
    })
}

// Split on commas that are not nested inside angle brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_tags_round_trip() {
        for s in ["bool", "u8", "u64", "u128", "address", "vector<u8>"] {
            let tag: TypeTag = s.parse().unwrap();
            assert_eq!(tag.to_string(), s);
        }
    }

    #[test]
    fn struct_tag_round_trip() {
        let s = "0x1::fungible_store::Store";
        let tag: TypeTag = s.parse().unwrap();
        assert_eq!(tag.to_string(), s);

        let generic = "0x1::option::Option<vector<0x1::stc::STC>>";
        let tag: TypeTag = generic.parse().unwrap();
        assert_eq!(tag.to_string(), generic);
    }

    #[test]
    fn nested_generics_split_correctly() {
        let s = "0x1::pair::Pair<0x1::option::Option<u64>, address>";
        let TypeTag::Struct(tag) = s.parse::<TypeTag>().unwrap() else {
            panic!("expected struct tag");
        };
        assert_eq!(tag.type_args.len(), 2);
        assert_eq!(tag.to_string(), s);
    }

    #[test]
    fn function_id_round_trip() {
        let id: FunctionId = "0xf8eda27b31a0dcd9b6c06074d74a2c6c::managed_asset::mint"
            .parse()
            .unwrap();
        assert_eq!(id.module.as_str(), "managed_asset");
        assert_eq!(
            id.to_string(),
            "0xf8eda27b31a0dcd9b6c06074d74a2c6c::managed_asset::mint"
        );
    }

    #[test]
    fn rejects_malformed_tags() {
        for bad in ["", "u256", "vector<u8", "0x1::too::many::parts", "0x1::m"] {
            assert!(bad.parse::<TypeTag>().is_err(), "{bad:?} should fail");
        }
    }
}
