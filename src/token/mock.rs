//! Software token backend used for development and tests.
//!
//! The mock module exposes two slots. Slot 0 holds a token protected by the
//! PIN `1234` and preloaded with a demo certificate and RSA key pair; slot 1
//! holds an uninitialized token with no PIN. Handles are assigned
//! sequentially starting at 1, so handle hex renderings stay short.

use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256, Sha512};

use super::{
    DigestAlgorithm, Module, ModuleInfo, ObjectClass, ObjectHandle, ObjectInfo, Session, SlotInfo,
    TokenError, TokenResult,
};
use crate::template::KeyTemplate;

/// Default PIN accepted by slot 0
pub const DEMO_PIN: &str = "1234";

struct StoredObject {
    handle: u64,
    class: ObjectClass,
    label: String,
}

struct MockSlot {
    description: String,
    token_label: String,
    pin: Option<String>,
    objects: Vec<StoredObject>,
}

struct MockStore {
    slots: Vec<MockSlot>,
    next_handle: u64,
}

impl MockStore {
    fn slot_mut(&mut self, slot: u64) -> TokenResult<&mut MockSlot> {
        self.slots
            .get_mut(slot as usize)
            .ok_or(TokenError::SlotNotFound { slot })
    }

    fn slot(&self, slot: u64) -> TokenResult<&MockSlot> {
        self.slots
            .get(slot as usize)
            .ok_or(TokenError::SlotNotFound { slot })
    }
}

/// In-memory [`Module`] implementation
pub struct MockModule {
    name: String,
    library: String,
    store: Arc<Mutex<MockStore>>,
}

impl MockModule {
    pub fn new(name: &str, library: &str) -> Self {
        let mut store = MockStore {
            slots: vec![
                MockSlot {
                    description: "Software slot 0".to_string(),
                    token_label: "DEMO TOKEN".to_string(),
                    pin: Some(DEMO_PIN.to_string()),
                    objects: Vec::new(),
                },
                MockSlot {
                    description: "Software slot 1".to_string(),
                    token_label: "EMPTY TOKEN".to_string(),
                    pin: None,
                    objects: Vec::new(),
                },
            ],
            next_handle: 1,
        };
        for (class, label) in [
            (ObjectClass::Certificate, "demo-ca"),
            (ObjectClass::PublicKey, "demo-rsa"),
            (ObjectClass::PrivateKey, "demo-rsa"),
        ] {
            let handle = store.next_handle;
            store.next_handle += 1;
            store.slots[0].objects.push(StoredObject {
                handle,
                class,
                label: label.to_string(),
            });
        }
        MockModule {
            name: name.to_string(),
            library: library.to_string(),
            store: Arc::new(Mutex::new(store)),
        }
    }
}

impl Module for MockModule {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.name.clone(),
            library: self.library.clone(),
            manufacturer: "p11console software token".to_string(),
        }
    }

    fn slots(&self) -> Vec<SlotInfo> {
        let store = self.store.lock().expect("mock store poisoned");
        store
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotInfo {
                index: index as u64,
                description: slot.description.clone(),
                token_label: slot.token_label.clone(),
                token_present: true,
            })
            .collect()
    }

    fn open_session(&self, slot: u64, pin: Option<&str>) -> TokenResult<Box<dyn Session>> {
        let store = self.store.lock().expect("mock store poisoned");
        let mock_slot = store.slot(slot)?;
        if let Some(expected) = &mock_slot.pin {
            if pin != Some(expected.as_str()) {
                return Err(TokenError::PinRejected { slot });
            }
        }
        Ok(Box::new(MockSession {
            slot,
            store: Arc::clone(&self.store),
        }))
    }
}

/// Session bound to one mock slot, sharing the module's object store
pub struct MockSession {
    slot: u64,
    store: Arc<Mutex<MockStore>>,
}

impl Session for MockSession {
    fn slot(&self) -> u64 {
        self.slot
    }

    fn create_object(&mut self, template: &KeyTemplate) -> TokenResult<ObjectHandle> {
        let mut store = self.store.lock().expect("mock store poisoned");
        let handle = store.next_handle;
        store.next_handle += 1;
        let slot = store.slot_mut(self.slot)?;
        slot.objects.push(StoredObject {
            handle,
            class: template.class,
            label: template.label.clone(),
        });
        Ok(ObjectHandle(handle))
    }

    fn objects(&self) -> TokenResult<Vec<ObjectInfo>> {
        let store = self.store.lock().expect("mock store poisoned");
        let slot = store.slot(self.slot)?;
        Ok(slot
            .objects
            .iter()
            .map(|object| ObjectInfo {
                handle: ObjectHandle(object.handle),
                class: object.class,
                label: object.label.clone(),
            })
            .collect())
    }

    fn object_info(&self, handle: ObjectHandle) -> TokenResult<ObjectInfo> {
        self.objects()?
            .into_iter()
            .find(|object| object.handle == handle)
            .ok_or(TokenError::ObjectNotFound { handle })
    }

    fn destroy_object(&mut self, handle: ObjectHandle) -> TokenResult<()> {
        let mut store = self.store.lock().expect("mock store poisoned");
        let slot = store.slot_mut(self.slot)?;
        let before = slot.objects.len();
        slot.objects.retain(|object| object.handle != handle.0);
        if slot.objects.len() == before {
            return Err(TokenError::ObjectNotFound { handle });
        }
        Ok(())
    }

    fn digest(&mut self, algorithm: DigestAlgorithm, data: &[u8]) -> TokenResult<Vec<u8>> {
        let digest = match algorithm {
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        };
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{self, FixedRandom, KeyUsage};

    #[test]
    fn test_open_session_checks_pin() {
        let module = MockModule::new("demo", "/usr/lib/softhsm2.so");
        assert!(module.open_session(0, Some(DEMO_PIN)).is_ok());
        assert!(matches!(
            module.open_session(0, Some("0000")),
            Err(TokenError::PinRejected { slot: 0 })
        ));
        assert!(matches!(
            module.open_session(0, None),
            Err(TokenError::PinRejected { slot: 0 })
        ));
        assert!(module.open_session(1, None).is_ok());
        assert!(matches!(
            module.open_session(7, None),
            Err(TokenError::SlotNotFound { slot: 7 })
        ));
    }

    #[test]
    fn test_preloaded_objects_visible() {
        let module = MockModule::new("demo", "lib.so");
        let session = module.open_session(0, Some(DEMO_PIN)).unwrap();
        let objects = session.objects().unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].class, ObjectClass::Certificate);
        assert_eq!(objects[0].handle, ObjectHandle(1));
    }

    #[test]
    fn test_create_and_destroy_object() {
        let module = MockModule::new("demo", "lib.so");
        let mut session = module.open_session(1, None).unwrap();
        let mut rng = FixedRandom::new(&[7u8; 20]);
        let pair = template::create_template(&mut rng, "imported", false, &[KeyUsage::Sign]);
        let handle = session.create_object(&pair.private_key).unwrap();
        assert_eq!(session.object_info(handle).unwrap().label, "imported");
        session.destroy_object(handle).unwrap();
        assert!(matches!(
            session.destroy_object(handle),
            Err(TokenError::ObjectNotFound { .. })
        ));
    }

    #[test]
    fn test_digest_matches_sha2() {
        let module = MockModule::new("demo", "lib.so");
        let mut session = module.open_session(1, None).unwrap();
        let digest = session.digest(DigestAlgorithm::Sha256, b"abc").unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
