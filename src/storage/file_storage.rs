use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::error::StorageError;
use crate::models::{ClassRegistry, Entity, CLASS_TAG};

/// Whole-file JSON store. Every save rewrites the complete object set;
/// reload replaces the in-memory map wholesale.
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Entity>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    /// Direct handle to the live map. Callers may mutate it, including
    /// clearing it entirely.
    pub fn all(&self) -> &BTreeMap<String, Entity> {
        &self.objects
    }

    pub fn all_mut(&mut self) -> &mut BTreeMap<String, Entity> {
        &mut self.objects
    }

    /// Inserts (or overwrites) the entry under the entity's composite key.
    pub fn insert(&mut self, entity: Entity) -> Result<(), StorageError> {
        if entity.id().is_empty() {
            return Err(StorageError::MissingId);
        }
        self.objects.insert(entity.storage_key(), entity);
        Ok(())
    }

    /// Serializes every held entity and overwrites the backing file with
    /// the whole mapping as one JSON document.
    pub fn save(&self) -> Result<(), StorageError> {
        let mut document = Map::new();
        for (key, entity) in &self.objects {
            document.insert(key.clone(), Value::Object(entity.serialize()));
        }
        let payload = serde_json::to_string(&document)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// A missing or unparseable file leaves the current state untouched.
    /// Once the document reads as a JSON object it is trusted: a missing or
    /// unregistered class tag and any malformed record are hard errors, and
    /// the in-memory map is only replaced after every record rebuilds.
    pub fn reload(&mut self, registry: &ClassRegistry) -> Result<(), StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Ok(()),
        };
        let document = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => document,
            _ => return Ok(()),
        };
        let mut objects = BTreeMap::new();
        for (key, record) in document {
            let Value::Object(record) = record else {
                return Err(StorageError::NotAnObject { key });
            };
            let tag = match record.get(CLASS_TAG).and_then(Value::as_str) {
                Some(tag) => tag.to_string(),
                None => return Err(StorageError::MissingTag { key }),
            };
            let kind = registry
                .kind_of(&tag)
                .ok_or(StorageError::UnknownClass(tag))?;
            let entity = Entity::from_map(kind, record).map_err(|source| {
                StorageError::Reconstruct {
                    key: key.clone(),
                    source,
                }
            })?;
            objects.insert(key, entity);
        }
        self.objects = objects;
        Ok(())
    }
}
