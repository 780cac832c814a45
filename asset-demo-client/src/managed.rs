// Copyright (c) The Asset Demo Contributors
// SPDX-License-Identifier: Apache-2.0

//! Call constructors for the managed-asset contract surface.
//!
//! The admin module lives under the issuing account; the standard
//! fungible-store interface lives under `0x1` and is keyed by the asset's
//! metadata address.

use asset_demo_types::{AccountAddress, FunctionId, Identifier, MoveValue};

pub const MANAGED_ASSET_MODULE: &str = "managed_asset";
pub const FUNGIBLE_STORE_MODULE: &str = "fungible_store";

// Static names below are valid identifiers by construction.
fn ident(name: &str) -> Identifier {
    Identifier::new(name).expect("static identifier")
}

fn managed_fn(admin: AccountAddress, name: &str) -> FunctionId {
    FunctionId::new(admin, ident(MANAGED_ASSET_MODULE), ident(name))
}

fn store_fn(name: &str) -> FunctionId {
    FunctionId::new(AccountAddress::ONE, ident(FUNGIBLE_STORE_MODULE), ident(name))
}

/// `managed_asset::mint(to, amount)`, signed by the admin.
pub fn mint_call(
    admin: AccountAddress,
    to: AccountAddress,
    amount: u64,
) -> (FunctionId, Vec<MoveValue>) {
    (
        managed_fn(admin, "mint"),
        vec![MoveValue::Address(to), MoveValue::U64(amount)],
    )
}

/// `managed_asset::transfer(from, to, amount)`: admin-authorized move of
/// holdings, using the contract's transfer capability.
pub fn admin_transfer_call(
    admin: AccountAddress,
    from: AccountAddress,
    to: AccountAddress,
    amount: u64,
) -> (FunctionId, Vec<MoveValue>) {
    (
        managed_fn(admin, "transfer"),
        vec![
            MoveValue::Address(from),
            MoveValue::Address(to),
            MoveValue::U64(amount),
        ],
    )
}

/// `managed_asset::burn(from, amount)`, signed by the admin.
pub fn burn_call(
    admin: AccountAddress,
    from: AccountAddress,
    amount: u64,
) -> (FunctionId, Vec<MoveValue>) {
    (
        managed_fn(admin, "burn"),
        vec![MoveValue::Address(from), MoveValue::U64(amount)],
    )
}

/// `managed_asset::freeze_account(target)`, signed by the admin.
pub fn freeze_call(admin: AccountAddress, target: AccountAddress) -> (FunctionId, Vec<MoveValue>) {
    (
        managed_fn(admin, "freeze_account"),
        vec![MoveValue::Address(target)],
    )
}

/// `managed_asset::unfreeze_account(target)`, signed by the admin.
pub fn unfreeze_call(
    admin: AccountAddress,
    target: AccountAddress,
) -> (FunctionId, Vec<MoveValue>) {
    (
        managed_fn(admin, "unfreeze_account"),
        vec![MoveValue::Address(target)],
    )
}

/// View: `managed_asset::get_metadata()`, the asset's metadata address.
pub fn get_metadata_call(admin: AccountAddress) -> (FunctionId, Vec<MoveValue>) {
    (managed_fn(admin, "get_metadata"), vec![])
}

/// Entry: `0x1::fungible_store::transfer(metadata, to, amount)`, a
/// self-authorized transfer out of the signer's own holdings store.
pub fn store_transfer_call(
    metadata: AccountAddress,
    to: AccountAddress,
    amount: u64,
) -> (FunctionId, Vec<MoveValue>) {
    (
        store_fn("transfer"),
        vec![
            MoveValue::Address(metadata),
            MoveValue::Address(to),
            MoveValue::U64(amount),
        ],
    )
}

/// View: `0x1::fungible_store::balance(holder, metadata)`.
pub fn balance_call(
    holder: AccountAddress,
    metadata: AccountAddress,
) -> (FunctionId, Vec<MoveValue>) {
    (
        store_fn("balance"),
        vec![MoveValue::Address(holder), MoveValue::Address(metadata)],
    )
}

/// View: `0x1::fungible_store::supply(metadata)`.
pub fn supply_call(metadata: AccountAddress) -> (FunctionId, Vec<MoveValue>) {
    (store_fn("supply"), vec![MoveValue::Address(metadata)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_ids_render_fully_qualified() {
        let admin = AccountAddress::from_hex_literal("0xa550c18").unwrap();
        let (function, args) = mint_call(admin, AccountAddress::ONE, 100);
        assert_eq!(function.to_string(), "0xa550c18::managed_asset::mint");
        assert_eq!(args.len(), 2);

        let (function, _) = store_transfer_call(AccountAddress::ONE, admin, 1);
        assert_eq!(function.to_string(), "0x1::fungible_store::transfer");
    }
}
