use cosmwasm_std::{Api, Binary, Uint128};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use subtle_encoding::bech32;

use crate::error::ContractError;
use crate::msg::{AddressHash, Adr36Info};

/// Compressed secp256k1 public key, used by cosmos-family chains
const COSMOS_PUBKEY_LEN: usize = 33;
/// Uncompressed secp256k1 public key with 0x04 tag, used by ethereum-family chains
const ETHEREUM_PUBKEY_LEN: usize = 65;

/// Checks an ADR-36 ownership proof for `name` under `bech32_prefix`:
/// the signer address must decode under the prefix, derive from the
/// public key, and the sign doc signature must verify.
pub fn adr36_verify(
    api: &dyn Api,
    info: &Adr36Info,
    name: &str,
    bech32_prefix: &str,
) -> Result<(), ContractError> {
    let (hrp, address_bytes) =
        bech32::decode(&info.signer_bech32_address).map_err(|_| ContractError::InvalidBech32 {
            address: info.signer_bech32_address.clone(),
        })?;
    if hrp != bech32_prefix {
        return Err(ContractError::InvalidBech32 {
            address: info.signer_bech32_address.clone(),
        });
    }

    let derived = derive_address_bytes(&info.address_hash, &info.pub_key)?;
    if derived != address_bytes {
        return Err(ContractError::InvalidSignature {});
    }

    let doc = adr36_sign_doc(
        name,
        bech32_prefix,
        &info.signer_bech32_address,
        info.signature_salt,
    );
    let hash = message_hash(&info.address_hash, &doc);

    // ethereum wallets append a recovery byte, secp256k1_verify wants r || s
    let signature = match info.signature.len() {
        64 => info.signature.to_vec(),
        65 => info.signature[..64].to_vec(),
        _ => return Err(ContractError::InvalidSignature {}),
    };

    let verified = api
        .secp256k1_verify(&hash, &signature, &info.pub_key)
        .map_err(|_| ContractError::InvalidSignature {})?;
    if !verified {
        return Err(ContractError::InvalidSignature {});
    }

    Ok(())
}

/// Address bytes implied by a public key for the given family.
pub fn derive_address_bytes(
    address_hash: &AddressHash,
    pub_key: &[u8],
) -> Result<Vec<u8>, ContractError> {
    match address_hash {
        AddressHash::Cosmos => {
            if pub_key.len() != COSMOS_PUBKEY_LEN {
                return Err(ContractError::UnsupportedAddressFamily {});
            }
            Ok(Ripemd160::digest(Sha256::digest(pub_key)).to_vec())
        }
        AddressHash::Ethereum => {
            if pub_key.len() != ETHEREUM_PUBKEY_LEN || pub_key[0] != 0x04 {
                return Err(ContractError::UnsupportedAddressFamily {});
            }
            Ok(Keccak256::digest(&pub_key[1..])[12..].to_vec())
        }
    }
}

/// ADR-36 amino sign doc over the registration statement. This is the
/// exact payload wallets sign for `sign/MsgSignData`.
pub fn adr36_sign_doc(name: &str, bech32_prefix: &str, signer: &str, salt: Uint128) -> String {
    let statement = format!(
        "The following is the record registration for ICNS.\n\nName: {name}.{bech32_prefix}\nOwner: {signer}\nSalt: {salt}"
    );
    let data = Binary::from(statement.into_bytes()).to_base64();
    format!(
        "{{\"account_number\":\"0\",\"chain_id\":\"\",\"fee\":{{\"amount\":[],\"gas\":\"0\"}},\"memo\":\"\",\"msgs\":[{{\"type\":\"sign/MsgSignData\",\"value\":{{\"data\":\"{data}\",\"signer\":\"{signer}\"}}}}],\"sequence\":\"0\"}}"
    )
}

/// Digest of the sign doc per family: sha256 for cosmos, EIP-191
/// personal_sign + keccak256 for ethereum.
pub fn message_hash(address_hash: &AddressHash, doc: &str) -> Vec<u8> {
    match address_hash {
        AddressHash::Cosmos => Sha256::digest(doc.as_bytes()).to_vec(),
        AddressHash::Ethereum => {
            let mut hasher = Keccak256::new();
            hasher.update(format!("\x19Ethereum Signed Message:\n{}", doc.len()));
            hasher.update(doc.as_bytes());
            hasher.finalize().to_vec()
        }
    }
}
