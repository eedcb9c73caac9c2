#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdError, StdResult,
};
use cw2::set_contract_version;
use cw721::OwnerOfResponse;
use cw_utils::nonpayable;
use semver::Version;
use subtle_encoding::bech32;

use crate::crypto::adr36_verify;
use crate::error::ContractError;
use crate::msg::{
    AddressByIcnsResponse, AddressResponse, AddressesResponse, AdminResponse, Adr36Info,
    ExecuteMsg, IcnsNamesResponse, InstantiateMsg, MigrateMsg, NameQueryMsg, NamesResponse,
    PrimaryNameResponse, QueryMsg,
};
use crate::state::{Config, ADDRESSES, CONFIG, PRIMARY_NAME, RECORDS, SIGNATURES};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:icns-resolver";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        name_address: deps.api.addr_validate(&msg.name_address)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("name_address", config.name_address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetRecord {
            name,
            bech32_prefix,
            adr36_info,
        } => execute_set_record(deps, info, name, bech32_prefix, adr36_info),
        ExecuteMsg::SetPrimary {
            name,
            bech32_address,
        } => execute_set_primary(deps, info, name, bech32_address),
        ExecuteMsg::RemoveRecord {
            name,
            bech32_address,
        } => execute_remove_record(deps, info, name, bech32_address),
    }
}

pub fn execute_set_record(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    bech32_prefix: String,
    adr36_info: Adr36Info,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    check_name_authorized(deps.as_ref(), &config, &name, &info.sender)?;

    // verify ownership of the claimed address before touching state
    adr36_verify(deps.api, &adr36_info, &name, &bech32_prefix)?;

    if SIGNATURES.has(deps.storage, &adr36_info.signature) {
        return Err(ContractError::SignatureAlreadyUsed {});
    }
    SIGNATURES.save(deps.storage, &adr36_info.signature, &true)?;

    let address = adr36_info.signer_bech32_address;

    // an overwrite can detach the previous address, clean up its reverse
    // entry and primary name
    if let Some(old_address) = RECORDS.may_load(deps.storage, (&name, &bech32_prefix))? {
        if old_address != address {
            ADDRESSES.remove(deps.storage, (&old_address, &name));
            if PRIMARY_NAME.may_load(deps.storage, &old_address)? == Some(name.clone()) {
                PRIMARY_NAME.remove(deps.storage, &old_address);
            }
        }
    }

    RECORDS.save(deps.storage, (&name, &bech32_prefix), &address)?;
    ADDRESSES.save(deps.storage, (&address, &name), &bech32_prefix)?;

    // the first record of an address becomes its primary name
    if PRIMARY_NAME.may_load(deps.storage, &address)?.is_none() {
        PRIMARY_NAME.save(deps.storage, &address, &name)?;
    }

    Ok(Response::new()
        .add_attribute("action", "set_record")
        .add_attribute("name", name)
        .add_attribute("bech32_prefix", bech32_prefix)
        .add_attribute("address", address))
}

pub fn execute_set_primary(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    bech32_address: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    check_name_authorized(deps.as_ref(), &config, &name, &info.sender)?;

    if !ADDRESSES.has(deps.storage, (&bech32_address, &name)) {
        return Err(ContractError::RecordNotFound {});
    }
    PRIMARY_NAME.save(deps.storage, &bech32_address, &name)?;

    Ok(Response::new()
        .add_attribute("action", "set_primary")
        .add_attribute("name", name)
        .add_attribute("address", bech32_address))
}

pub fn execute_remove_record(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    bech32_address: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    check_name_authorized(deps.as_ref(), &config, &name, &info.sender)?;

    let (bech32_prefix, _) =
        bech32::decode(&bech32_address).map_err(|_| ContractError::InvalidBech32 {
            address: bech32_address.clone(),
        })?;

    let stored = RECORDS.may_load(deps.storage, (&name, &bech32_prefix))?;
    if stored.as_deref() != Some(bech32_address.as_str()) {
        return Err(ContractError::RecordNotFound {});
    }

    RECORDS.remove(deps.storage, (&name, &bech32_prefix));
    ADDRESSES.remove(deps.storage, (&bech32_address, &name));
    if PRIMARY_NAME.may_load(deps.storage, &bech32_address)? == Some(name.clone()) {
        PRIMARY_NAME.remove(deps.storage, &bech32_address);
    }

    Ok(Response::new()
        .add_attribute("action", "remove_record")
        .add_attribute("name", name)
        .add_attribute("address", bech32_address))
}

/// The name NFT owner manages its records; admins of the name contract
/// may act on any name.
fn check_name_authorized(
    deps: Deps,
    config: &Config,
    name: &str,
    sender: &Addr,
) -> Result<(), ContractError> {
    if is_admin(deps, &config.name_address, sender.as_str())? {
        return Ok(());
    }
    if is_name_owner(deps, &config.name_address, name, sender) {
        return Ok(());
    }
    Err(ContractError::Unauthorized {})
}

pub fn is_admin(deps: Deps, name_address: &Addr, addr: &str) -> Result<bool, ContractError> {
    let AdminResponse { admins } = deps
        .querier
        .query_wasm_smart(name_address, &NameQueryMsg::Admin {})?;
    Ok(admins.iter().any(|admin| admin == addr))
}

fn is_name_owner(deps: Deps, name_address: &Addr, name: &str, sender: &Addr) -> bool {
    let res: StdResult<OwnerOfResponse> = deps.querier.query_wasm_smart(
        name_address,
        &NameQueryMsg::OwnerOf {
            token_id: name.to_string(),
            include_expired: None,
        },
    );
    match res {
        Ok(owner_of) => owner_of.owner == *sender,
        Err(_) => false,
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Addresses { name } => to_binary(&query_addresses(deps, name)?),
        QueryMsg::Address {
            name,
            bech32_prefix,
        } => to_binary(&query_address(deps, name, bech32_prefix)?),
        QueryMsg::Names { address } => to_binary(&query_names(deps, address)?),
        QueryMsg::IcnsNames { address } => to_binary(&query_icns_names(deps, address)?),
        QueryMsg::PrimaryName { address } => to_binary(&query_primary_name(deps, address)?),
        QueryMsg::Admin {} => to_binary(&query_admin(deps)?),
        QueryMsg::AddressByIcns { icns } => to_binary(&query_address_by_icns(deps, icns)?),
    }
}

fn query_addresses(deps: Deps, name: String) -> StdResult<AddressesResponse> {
    let addresses = RECORDS
        .prefix(&name)
        .range(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AddressesResponse { addresses })
}

fn query_address(deps: Deps, name: String, bech32_prefix: String) -> StdResult<AddressResponse> {
    let address = RECORDS.load(deps.storage, (&name, &bech32_prefix))?;
    Ok(AddressResponse { address })
}

fn query_names(deps: Deps, address: String) -> StdResult<NamesResponse> {
    let names = ADDRESSES
        .prefix(&address)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    let primary_name = PRIMARY_NAME
        .may_load(deps.storage, &address)?
        .unwrap_or_default();
    Ok(NamesResponse {
        names,
        primary_name,
    })
}

fn query_icns_names(deps: Deps, address: String) -> StdResult<IcnsNamesResponse> {
    let names = ADDRESSES
        .prefix(&address)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(name, prefix)| format!("{name}.{prefix}")))
        .collect::<StdResult<Vec<_>>>()?;

    let primary_name = match PRIMARY_NAME.may_load(deps.storage, &address)? {
        Some(name) => {
            let prefix = ADDRESSES.load(deps.storage, (&address, &name))?;
            format!("{name}.{prefix}")
        }
        None => String::default(),
    };

    Ok(IcnsNamesResponse {
        names,
        primary_name,
    })
}

fn query_primary_name(deps: Deps, address: String) -> StdResult<PrimaryNameResponse> {
    let name = PRIMARY_NAME.load(deps.storage, &address)?;
    Ok(PrimaryNameResponse { name })
}

fn query_admin(deps: Deps) -> StdResult<AdminResponse> {
    let config = CONFIG.load(deps.storage)?;
    deps.querier
        .query_wasm_smart(config.name_address, &NameQueryMsg::Admin {})
}

fn query_address_by_icns(deps: Deps, icns: String) -> StdResult<AddressByIcnsResponse> {
    let (name, bech32_prefix) = icns
        .rsplit_once('.')
        .ok_or_else(|| StdError::generic_err("invalid icns: expected name.bech32_prefix"))?;
    let bech32_address = RECORDS.load(deps.storage, (name, bech32_prefix))?;
    Ok(AddressByIcnsResponse { bech32_address })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
