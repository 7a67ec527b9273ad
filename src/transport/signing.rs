//! `ACS3-HMAC-SHA256` request signing.
//!
//! RPC-style requests carry their parameters in the query string and send an empty body.

use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};

pub const ALGORITHM: &str = "ACS3-HMAC-SHA256";

/// RFC 3986 unreserved characters stay as-is; everything else is `%XX` encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
#[error("signing key rejected: {0}")]
pub struct SigningError(hmac::digest::InvalidLength);

#[derive(Debug, Clone)]
pub struct SigningInput<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub action: &'a str,
    pub version: &'a str,
    pub query: &'a [(String, String)],
    /// `x-acs-date`, UTC, `%Y-%m-%dT%H:%M:%SZ`.
    pub date: &'a str,
    pub nonce: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Encoded query string, identical to the one that was signed.
    pub query_string: String,
    /// Headers to attach besides `host`.
    pub headers: Vec<(&'static str, String)>,
}

pub fn sign(
    access_key_id: &str,
    access_key_secret: &str,
    input: &SigningInput<'_>,
) -> Result<SignedRequest, SigningError> {
    let query_string = canonical_query_string(input.query);
    let payload_hash = hex::encode(Sha256::digest(b""));

    let signed_headers = [
        ("host", input.host.to_owned()),
        ("x-acs-action", input.action.to_owned()),
        ("x-acs-content-sha256", payload_hash.clone()),
        ("x-acs-date", input.date.to_owned()),
        ("x-acs-signature-nonce", input.nonce.to_owned()),
        ("x-acs-version", input.version.to_owned()),
    ];

    let request = canonical_request(input.method, &query_string, &signed_headers, &payload_hash);
    let string_to_sign = format!(
        "{ALGORITHM}\n{}",
        hex::encode(Sha256::digest(request.as_bytes()))
    );

    let mut mac =
        HmacSha256::new_from_slice(access_key_secret.as_bytes()).map_err(SigningError)?;
    mac.update(string_to_sign.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    let header_names = signed_header_names(&signed_headers);
    let authorization = format!(
        "{ALGORITHM} Credential={access_key_id},SignedHeaders={header_names},Signature={signature}"
    );

    let mut headers = signed_headers
        .into_iter()
        .filter(|(name, _)| *name != "host")
        .collect::<Vec<_>>();
    headers.push(("authorization", authorization));

    Ok(SignedRequest {
        query_string,
        headers,
    })
}

/// Sorted, RFC 3986 encoded `key=value` pairs joined by `&`.
pub fn canonical_query_string(params: &[(String, String)]) -> String {
    let mut encoded = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>();
    encoded.sort();
    encoded
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn canonical_request(
    method: &str,
    query_string: &str,
    headers: &[(&'static str, String)],
    payload_hash: &str,
) -> String {
    let canonical_headers = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect::<String>();
    format!(
        "{method}\n/\n{query_string}\n{canonical_headers}\n{}\n{payload_hash}",
        signed_header_names(headers)
    )
}

fn signed_header_names(headers: &[(&'static str, String)]) -> String {
    headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";")
}

fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}
