use std::str::FromStr;

use alloy::{
    hex,
    signers::{local::PrivateKeySigner, Signer},
};

use crate::{
    constants::AUTH_MESSAGE_TEMPLATE,
    error::{Error, Result},
};

pub fn parse_private_key(private_key: &str) -> Result<PrivateKeySigner> {
    PrivateKeySigner::from_str(private_key).map_err(|err| Error::KeyFormat(err.to_string()))
}

pub fn checksummed_address(signer: &PrivateKeySigner) -> String {
    signer.address().to_checksum(None)
}

pub fn auth_message(address: &str) -> String {
    AUTH_MESSAGE_TEMPLATE.replace("{address}", address)
}

// EIP-191 personal sign over the fixed template. Produced fresh for every
// login attempt, never cached.
pub async fn sign_auth_message(signer: &PrivateKeySigner, address: &str) -> Result<String> {
    let message = auth_message(address);
    let signature = signer
        .sign_message(message.as_bytes())
        .await
        .map_err(|err| Error::Signing(err.to_string()))?;

    Ok(format!("0x{}", hex::encode(signature.as_bytes())))
}
