//! OCI HTTP request signatures (draft-cavage, rsa-sha256).
//!
//! GET requests sign the `date`, `(request-target)` and `host` headers.

use crate::error::ApiError;
use crate::identity::profile::OciProfile;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::Url;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::path::Path;

const SIGNED_HEADERS: &str = "date (request-target) host";

/// Header values to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub host: String,
    pub authorization: String,
}

/// Signs identity API requests with the profile's API key.
pub struct RequestSigner {
    key_id: String,
    signing_key: SigningKey<Sha256>,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Load the profile's `key_file` and build a signer keyed by `tenancy/user/fingerprint`.
    pub fn from_profile(profile: &OciProfile) -> Result<Self, ApiError> {
        let pem = std::fs::read_to_string(&profile.key_file).map_err(|e| {
            ApiError::KeyLoadError {
                path: profile.key_file.clone(),
                message: e.to_string(),
            }
        })?;
        Self::from_pem(profile.key_id(), &pem, &profile.key_file)
    }

    /// Build a signer from an unencrypted PKCS#1 or PKCS#8 PEM key.
    pub fn from_pem(key_id: String, pem: &str, origin: &Path) -> Result<Self, ApiError> {
        let key_error = |message: String| ApiError::KeyLoadError {
            path: origin.to_path_buf(),
            message,
        };

        if pem.contains("ENCRYPTED") {
            return Err(key_error(
                "encrypted private keys are not supported".to_string(),
            ));
        }

        let private_key = if pem.contains("BEGIN RSA PRIVATE KEY") {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| key_error(e.to_string()))?
        } else {
            RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| key_error(e.to_string()))?
        };

        Ok(Self {
            key_id,
            signing_key: SigningKey::<Sha256>::new(private_key),
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Produce the `date`, `host` and `authorization` headers for `method url` at `now`.
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders, ApiError> {
        let date = http_date(now);
        let host = host_header(url)?;
        let signing_string = signing_string(&date, method, url, &host);

        let signature = self
            .signing_key
            .try_sign(signing_string.as_bytes())
            .map_err(|e| ApiError::SigningError(e.to_string()))?;
        let encoded = STANDARD.encode(signature.to_bytes());

        Ok(SignedHeaders {
            authorization: format!(
                "Signature version=\"1\",keyId=\"{}\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
                self.key_id, SIGNED_HEADERS, encoded
            ),
            date,
            host,
        })
    }
}

/// RFC 7231 IMF-fixdate, e.g. `Sun, 05 Jan 2014 21:31:40 GMT`.
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Host header value: hostname plus port when it is not the scheme default.
pub fn host_header(url: &Url) -> Result<String, ApiError> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::SigningError(format!("URL has no host: {}", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Lowercased method plus path and query, exactly as sent.
pub fn request_target(method: &str, url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{} {}?{}", method.to_ascii_lowercase(), url.path(), query),
        None => format!("{} {}", method.to_ascii_lowercase(), url.path()),
    }
}

pub fn signing_string(date: &str, method: &str, url: &Url, host: &str) -> String {
    format!(
        "date: {}\n(request-target): {}\nhost: {}",
        date,
        request_target(method, url),
        host
    )
}
