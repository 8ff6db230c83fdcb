//! Trait seam for the external token/session collaborator.
//!
//! The console never talks to hardware directly: everything it needs from a
//! PKCS#11 module is expressed through the [`Module`] and [`Session`]
//! traits. A software implementation ships behind the `mock` feature.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::codec::error::CodecError;
use crate::codec::handle;
use crate::template::KeyTemplate;

#[cfg(feature = "mock")]
pub mod mock;

/// Result type alias for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Failures reported by the module/session collaborator
#[derive(Debug, Error)]
pub enum TokenError {
    /// No slot with the given index
    #[error("slot {slot} not found")]
    SlotNotFound { slot: u64 },

    /// The token requires a PIN and none was supplied, or it was wrong
    #[error("PIN rejected for slot {slot}")]
    PinRejected { slot: u64 },

    /// No object with the given handle in this session
    #[error("object {handle} not found")]
    ObjectNotFound { handle: ObjectHandle },

    /// The token does not implement the requested mechanism
    #[error("mechanism not supported: {name}")]
    MechanismNotSupported { name: String },

    /// Failure inside the underlying library
    #[error("token library error: {0}")]
    Library(String),
}

/// Opaque object identifier assigned by the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u64);

impl ObjectHandle {
    /// Renders the handle as minimal hex (zero renders as "0" here so that
    /// listings never show an empty cell)
    pub fn to_hex(self) -> String {
        let rendered = handle::encode_u64(self.0);
        if rendered.is_empty() {
            "0".to_string()
        } else {
            rendered
        }
    }

    /// Parses a handle from its minimal hex rendering
    pub fn from_hex(hex: &str) -> Result<Self, CodecError> {
        handle::decode_u64(hex).map(ObjectHandle)
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Storage class of a token object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    PrivateKey,
    PublicKey,
    SecretKey,
    Certificate,
    Data,
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectClass::PrivateKey => "PRIVATE_KEY",
            ObjectClass::PublicKey => "PUBLIC_KEY",
            ObjectClass::SecretKey => "SECRET_KEY",
            ObjectClass::Certificate => "CERTIFICATE",
            ObjectClass::Data => "DATA",
        };
        write!(f, "{}", name)
    }
}

/// Cryptographic key family of a key object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Rsa,
    Ec,
    Aes,
}

/// Digest mechanisms the console can request from a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl FromStr for DigestAlgorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            other => Err(TokenError::MechanismNotSupported {
                name: other.to_string(),
            }),
        }
    }
}

/// Description of a loaded module
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub name: String,
    pub library: String,
    pub manufacturer: String,
}

/// Description of a slot exposed by a module
#[derive(Debug, Clone)]
pub struct SlotInfo {
    pub index: u64,
    pub description: String,
    pub token_label: String,
    pub token_present: bool,
}

/// Summary of an object stored on a token
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub handle: ObjectHandle,
    pub class: ObjectClass,
    pub label: String,
}

/// A loaded PKCS#11 module
pub trait Module: Send {
    fn info(&self) -> ModuleInfo;

    fn slots(&self) -> Vec<SlotInfo>;

    /// Opens an authenticated session against the given slot
    fn open_session(&self, slot: u64, pin: Option<&str>) -> TokenResult<Box<dyn Session>>;
}

/// An authenticated channel into one slot's token
pub trait Session: Send {
    /// Index of the slot this session is bound to
    fn slot(&self) -> u64;

    /// Hands a completed attribute template to the token for object
    /// creation, returning the assigned handle
    fn create_object(&mut self, template: &KeyTemplate) -> TokenResult<ObjectHandle>;

    /// Enumerates the objects visible in this session
    fn objects(&self) -> TokenResult<Vec<ObjectInfo>>;

    /// Looks up a single object by handle
    fn object_info(&self, handle: ObjectHandle) -> TokenResult<ObjectInfo>;

    /// Destroys the object with the given handle
    fn destroy_object(&mut self, handle: ObjectHandle) -> TokenResult<()>;

    /// Computes a digest over `data` with the given mechanism
    fn digest(&mut self, algorithm: DigestAlgorithm, data: &[u8]) -> TokenResult<Vec<u8>>;
}
