//! Key attribute template construction and RSA key import.
//!
//! A template is the named attribute set handed to the session collaborator
//! when creating an object. [`create_template`] builds the paired
//! private/public RSA templates; the import functions attach the numeric
//! key components and delegate persistence entirely to the session.

use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::codec::int32::{self, IntValue};
use crate::error::{ConsoleError, ConsoleResult};
use crate::token::{KeyType, ObjectClass, ObjectHandle, Session};

/// Width of the generated key identifier in bytes
pub const KEY_ID_SIZE: usize = 20;

/// Source of random bytes for key identifiers.
///
/// Injected explicitly so tests can supply a deterministic sequence.
pub trait RandomSource: Send {
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Operating-system randomness, the production source
#[derive(Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Deterministic source that repeats a fixed pattern, for tests
#[derive(Debug)]
pub struct FixedRandom {
    pattern: Vec<u8>,
    position: usize,
}

impl FixedRandom {
    pub fn new(pattern: &[u8]) -> Self {
        FixedRandom {
            pattern: pattern.to_vec(),
            position: 0,
        }
    }
}

impl RandomSource for FixedRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.pattern[self.position % self.pattern.len()];
            self.position += 1;
        }
    }
}

/// A permitted key usage, parsed from its PKCS#11-style flag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    Sign,
    Decrypt,
    UnwrapKey,
    Verify,
    Encrypt,
    WrapKey,
}

impl FromStr for KeyUsage {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign" => Ok(KeyUsage::Sign),
            "decrypt" => Ok(KeyUsage::Decrypt),
            "unwrapKey" => Ok(KeyUsage::UnwrapKey),
            "verify" => Ok(KeyUsage::Verify),
            "encrypt" => Ok(KeyUsage::Encrypt),
            "wrapKey" => Ok(KeyUsage::WrapKey),
            other => Err(ConsoleError::Execution(format!(
                "unknown key usage: {}",
                other
            ))),
        }
    }
}

/// The attribute surface consumed by the session's object-creation API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTemplate {
    pub token: bool,
    pub class: ObjectClass,
    pub key_type: KeyType,
    pub private: bool,
    pub label: String,
    pub id: Vec<u8>,
    pub extractable: bool,
    pub derive: bool,
    pub sign: bool,
    pub decrypt: bool,
    pub unwrap: bool,
    pub verify: bool,
    pub encrypt: bool,
    pub wrap: bool,
    pub modulus: Option<Vec<u8>>,
    pub public_exponent: Option<Vec<u8>>,
    pub private_exponent: Option<Vec<u8>>,
    pub prime1: Option<Vec<u8>>,
    pub prime2: Option<Vec<u8>>,
    pub exp1: Option<Vec<u8>>,
    pub exp2: Option<Vec<u8>>,
    pub coefficient: Option<Vec<u8>>,
}

/// Paired private/public templates sharing one identifier and label
#[derive(Debug, Clone)]
pub struct TemplatePair {
    pub private_key: KeyTemplate,
    pub public_key: KeyTemplate,
}

/// Public components of an RSA key
#[derive(Debug, Clone)]
pub struct RsaPublicComponents {
    pub modulus: Vec<u8>,
    pub public_exponent: IntValue,
}

/// Full component set of an RSA private key, including the CRT
/// acceleration parameters
#[derive(Debug, Clone)]
pub struct RsaPrivateComponents {
    pub modulus: Vec<u8>,
    pub public_exponent: IntValue,
    pub private_exponent: Vec<u8>,
    pub prime1: Vec<u8>,
    pub prime2: Vec<u8>,
    pub exp1: Vec<u8>,
    pub exp2: Vec<u8>,
    pub coefficient: Vec<u8>,
}

/// Builds the paired RSA key templates.
///
/// Both templates carry the same freshly generated 20-byte id and the same
/// label. Usage flags map onto the private template (sign, decrypt, unwrap)
/// and the public template (verify, encrypt, wrap) by membership in
/// `usages`.
pub fn create_template(
    rng: &mut dyn RandomSource,
    label: &str,
    extractable: bool,
    usages: &[KeyUsage],
) -> TemplatePair {
    let mut id = vec![0u8; KEY_ID_SIZE];
    rng.fill_bytes(&mut id);
    let has = |usage: KeyUsage| usages.contains(&usage);
    let private_key = KeyTemplate {
        token: true,
        class: ObjectClass::PrivateKey,
        key_type: KeyType::Rsa,
        private: true,
        label: label.to_string(),
        id: id.clone(),
        extractable,
        derive: false,
        sign: has(KeyUsage::Sign),
        decrypt: has(KeyUsage::Decrypt),
        unwrap: has(KeyUsage::UnwrapKey),
        verify: false,
        encrypt: false,
        wrap: false,
        modulus: None,
        public_exponent: None,
        private_exponent: None,
        prime1: None,
        prime2: None,
        exp1: None,
        exp2: None,
        coefficient: None,
    };
    let public_key = KeyTemplate {
        private: false,
        class: ObjectClass::PublicKey,
        sign: false,
        decrypt: false,
        unwrap: false,
        verify: has(KeyUsage::Verify),
        encrypt: has(KeyUsage::Encrypt),
        wrap: has(KeyUsage::WrapKey),
        ..private_key.clone()
    };
    TemplatePair {
        private_key,
        public_key,
    }
}

/// Imports an RSA public key into the session, returning its handle
pub fn import_rsa_public_key(
    session: &mut dyn Session,
    rng: &mut dyn RandomSource,
    key: &RsaPublicComponents,
    label: &str,
    extractable: bool,
    usages: &[KeyUsage],
) -> ConsoleResult<ObjectHandle> {
    let mut template = create_template(rng, label, extractable, usages).public_key;
    template.modulus = Some(key.modulus.clone());
    template.public_exponent = Some(int32::coerce_to_buffer(key.public_exponent.clone()));
    Ok(session.create_object(&template)?)
}

/// Imports an RSA private key into the session, returning its handle
pub fn import_rsa_private_key(
    session: &mut dyn Session,
    rng: &mut dyn RandomSource,
    key: &RsaPrivateComponents,
    label: &str,
    extractable: bool,
    usages: &[KeyUsage],
) -> ConsoleResult<ObjectHandle> {
    let mut template = create_template(rng, label, extractable, usages).private_key;
    template.modulus = Some(key.modulus.clone());
    template.public_exponent = Some(int32::coerce_to_buffer(key.public_exponent.clone()));
    template.private_exponent = Some(key.private_exponent.clone());
    template.prime1 = Some(key.prime1.clone());
    template.prime2 = Some(key.prime2.clone());
    template.exp1 = Some(key.exp1.clone());
    template.exp2 = Some(key.exp2.clone());
    template.coefficient = Some(key.coefficient.clone());
    Ok(session.create_object(&template)?)
}
