use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw721::OwnerOfResponse;
use cw_multi_test::{App, Contract, ContractWrapper, Executor};
use cw_storage_plus::{Item, Map};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use subtle_encoding::bech32;

use crate::contract;
use crate::crypto::{adr36_sign_doc, derive_address_bytes, message_hash};
use crate::msg::{AddressHash, Adr36Info, AdminResponse, ExecuteMsg, InstantiateMsg, NameQueryMsg};

pub const ADMIN: &str = "admin1";

// Minimal stand-in for the name NFT contract: serves the admin list and
// token owners the resolver looks up.

#[cw_serde]
pub struct NameInstantiateMsg {
    pub admins: Vec<String>,
}

#[cw_serde]
pub enum NameExecuteMsg {
    Mint { token_id: String, owner: String },
}

const NAME_ADMINS: Item<Vec<String>> = Item::new("admins");
const NAME_TOKENS: Map<&str, String> = Map::new("tokens");

fn name_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: NameInstantiateMsg,
) -> StdResult<Response> {
    NAME_ADMINS.save(deps.storage, &msg.admins)?;
    Ok(Response::default())
}

fn name_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: NameExecuteMsg,
) -> StdResult<Response> {
    match msg {
        NameExecuteMsg::Mint { token_id, owner } => {
            NAME_TOKENS.save(deps.storage, &token_id, &owner)?;
            Ok(Response::default())
        }
    }
}

fn name_query(deps: Deps, _env: Env, msg: NameQueryMsg) -> StdResult<Binary> {
    match msg {
        NameQueryMsg::Admin {} => to_binary(&AdminResponse {
            admins: NAME_ADMINS.load(deps.storage)?,
        }),
        NameQueryMsg::OwnerOf { token_id, .. } => {
            let owner = NAME_TOKENS.load(deps.storage, &token_id)?;
            to_binary(&OwnerOfResponse {
                owner,
                approvals: vec![],
            })
        }
    }
}

pub fn name_nft_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        name_execute,
        name_instantiate,
        name_query,
    ))
}

pub fn resolver_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        contract::execute,
        contract::instantiate,
        contract::query,
    ))
}

pub fn instantiate_name_nft(app: &mut App, admins: Vec<String>) -> Addr {
    let code_id = app.store_code(name_nft_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &NameInstantiateMsg { admins },
        &[],
        "name-nft",
        None,
    )
    .unwrap()
}

pub fn instantiate_resolver_with_name_nft(app: &mut App, name_nft: &Addr) -> Addr {
    let code_id = app.store_code(resolver_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(ADMIN),
        &InstantiateMsg {
            name_address: name_nft.to_string(),
        },
        &[],
        "resolver",
        None,
    )
    .unwrap()
}

pub fn default_setup(app: &mut App) -> (Addr, Addr) {
    let name_nft = instantiate_name_nft(app, vec![ADMIN.to_string()]);
    let resolver = instantiate_resolver_with_name_nft(app, &name_nft);
    (name_nft, resolver)
}

pub fn mint_name(app: &mut App, name_nft: &Addr, name: &str, owner: &str) {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        name_nft.clone(),
        &NameExecuteMsg::Mint {
            token_id: name.to_string(),
            owner: owner.to_string(),
        },
        &[],
    )
    .unwrap();
}

// --- ADR-36 proof construction -----------------------------------------

pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).unwrap()
}

pub fn pub_key_bytes(key: &SigningKey, address_hash: &AddressHash) -> Vec<u8> {
    let compress = matches!(address_hash, AddressHash::Cosmos);
    key.verifying_key()
        .as_affine()
        .to_encoded_point(compress)
        .as_bytes()
        .to_vec()
}

pub fn bech32_address(key: &SigningKey, address_hash: &AddressHash, prefix: &str) -> String {
    let pub_key = pub_key_bytes(key, address_hash);
    bech32::encode(prefix, derive_address_bytes(address_hash, &pub_key).unwrap())
}

pub fn adr36_proof(
    key: &SigningKey,
    address_hash: AddressHash,
    bech32_prefix: &str,
    name: &str,
    salt: u128,
) -> Adr36Info {
    let pub_key = pub_key_bytes(key, &address_hash);
    let signer = bech32_address(key, &address_hash, bech32_prefix);
    let salt = Uint128::new(salt);

    let doc = adr36_sign_doc(name, bech32_prefix, &signer, salt);
    let digest = message_hash(&address_hash, &doc);
    let signature: Signature = key.sign_prehash(&digest).unwrap();
    let signature = signature.normalize_s().unwrap_or(signature);

    Adr36Info {
        signer_bech32_address: signer,
        address_hash,
        pub_key: Binary::from(pub_key),
        signature: Binary::from(signature.to_bytes().to_vec()),
        signature_salt: salt,
    }
}

pub fn set_record_msg(
    key: &SigningKey,
    address_hash: AddressHash,
    bech32_prefix: &str,
    name: &str,
    salt: u128,
) -> ExecuteMsg {
    ExecuteMsg::SetRecord {
        name: name.to_string(),
        bech32_prefix: bech32_prefix.to_string(),
        adr36_info: adr36_proof(key, address_hash, bech32_prefix, name, salt),
    }
}
