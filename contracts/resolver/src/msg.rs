use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub name_address: String,
}

/// Address family of an ADR-36 signer. Selects the public key format,
/// the address derivation and the digest used for signing.
#[cw_serde]
pub enum AddressHash {
    Cosmos,
    Ethereum,
}

/// ADR-36 proof that the signer controls `signer_bech32_address`.
#[cw_serde]
pub struct Adr36Info {
    pub signer_bech32_address: String,
    pub address_hash: AddressHash,
    pub pub_key: Binary,
    pub signature: Binary,
    pub signature_salt: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Bind `name` to the proven signer address under `bech32_prefix`
    SetRecord {
        name: String,
        bech32_prefix: String,
        adr36_info: Adr36Info,
    },
    /// Choose the name shown for reverse lookups of `bech32_address`
    SetPrimary {
        name: String,
        bech32_address: String,
    },
    /// Delete the record binding `name` to `bech32_address`
    RemoveRecord {
        name: String,
        bech32_address: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// All (bech32_prefix, address) bindings of a name
    #[returns(AddressesResponse)]
    Addresses { name: String },
    /// Single binding lookup
    #[returns(AddressResponse)]
    Address { name: String, bech32_prefix: String },
    /// Reverse lookup, bare names
    #[returns(NamesResponse)]
    Names { address: String },
    /// Reverse lookup, fully qualified `name.prefix` identifiers
    #[returns(IcnsNamesResponse)]
    IcnsNames { address: String },
    #[returns(PrimaryNameResponse)]
    PrimaryName { address: String },
    /// Admins of the name NFT contract
    #[returns(AdminResponse)]
    Admin {},
    /// Resolve a fully qualified identifier like `alice.cosmos`
    #[returns(AddressByIcnsResponse)]
    AddressByIcns { icns: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct AddressesResponse {
    pub addresses: Vec<(String, String)>,
}

#[cw_serde]
pub struct AddressResponse {
    pub address: String,
}

#[cw_serde]
pub struct NamesResponse {
    pub names: Vec<String>,
    pub primary_name: String,
}

#[cw_serde]
pub struct IcnsNamesResponse {
    pub names: Vec<String>,
    pub primary_name: String,
}

#[cw_serde]
pub struct PrimaryNameResponse {
    pub name: String,
}

#[cw_serde]
pub struct AdminResponse {
    pub admins: Vec<String>,
}

#[cw_serde]
pub struct AddressByIcnsResponse {
    pub bech32_address: String,
}

/// Subset of the name NFT contract's query interface used by the resolver.
#[cw_serde]
pub enum NameQueryMsg {
    Admin {},
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
}
