use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("InvalidSignature")]
    InvalidSignature {},

    #[error("SignatureAlreadyUsed")]
    SignatureAlreadyUsed {},

    #[error("UnsupportedAddressFamily: public key does not match the declared address family")]
    UnsupportedAddressFamily {},

    #[error("InvalidBech32: {address}")]
    InvalidBech32 { address: String },

    #[error("RecordNotFound")]
    RecordNotFound {},
}
