use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Address of the name NFT contract. Name ownership and the admin
    /// list are looked up there.
    pub name_address: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (name, bech32_prefix) -> bech32 address
pub const RECORDS: Map<(&str, &str), String> = Map::new("records");

/// (bech32 address, name) -> bech32_prefix, kept in lock-step with RECORDS
pub const ADDRESSES: Map<(&str, &str), String> = Map::new("addresses");

/// bech32 address -> name shown for reverse lookups
pub const PRIMARY_NAME: Map<&str, String> = Map::new("primary_name");

/// Consumed ADR-36 signatures. A signature can only set a record once.
pub const SIGNATURES: Map<&[u8], bool> = Map::new("signatures");
