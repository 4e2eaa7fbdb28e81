//! Message digests of UTF-8 text, rendered as lower-case hex.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::tools::{ToolError, lenient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    pub const ALL: [Self; 5] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha384, Self::Sha512];

    #[must_use]
    pub fn digest_hex(self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(data)),
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha384 => hex::encode(Sha384::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HashRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default)]
    pub algorithms: Vec<Algorithm>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Digested {
    pub algorithm: Algorithm,
    pub hex: String,
}

#[derive(Debug, Serialize)]
pub struct HashResponse {
    pub bytes: usize,
    pub digests: Vec<Digested>,
}

pub fn hash(req: HashRequest) -> Result<HashResponse, ToolError> {
    let requested = if req.algorithms.is_empty() { Algorithm::ALL.to_vec() } else { req.algorithms };
    let mut algorithms: Vec<Algorithm> = Vec::with_capacity(requested.len());
    for algorithm in requested {
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }

    let data = req.text.as_bytes();
    let digests = algorithms
        .into_iter()
        .map(|algorithm| Digested { algorithm, hex: algorithm.digest_hex(data) })
        .collect();
    Ok(HashResponse { bytes: data.len(), digests })
}

#[cfg(test)]
#[path = "hash_test.rs"]
mod tests;
