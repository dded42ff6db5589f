use std::path::Path;

use serde_json::Value;

use super::error::CommandError;
use super::parser::{split_args, MethodCallParser};
use super::result::CommandResult;
use crate::models::{ClassRegistry, Entity, EntityKind};
use crate::storage::{FileStorage, StorageError};

/// Attributes coerced to integers by the four-token update form.
const INTEGER_ATTRS: [&str; 5] = [
    "number_rooms",
    "number_bathrooms",
    "max_guest",
    "price_by_night",
    "age",
];

/// Attributes coerced to floats.
const FLOAT_ATTRS: [&str; 2] = ["latitude", "longitude"];

/// Owns the class registry, the object store, and the method-call parser;
/// dispatches one normalized line at a time to the verb handlers.
pub struct CommandEngine {
    registry: ClassRegistry,
    storage: FileStorage,
    method_parser: MethodCallParser,
}

impl CommandEngine {
    /// Builds the engine and loads any existing data file. A missing or
    /// corrupt file starts empty; a well-formed file with bad records is a
    /// hard error.
    pub fn new(data_file: impl AsRef<Path>) -> Result<Self, StorageError> {
        let registry = ClassRegistry::new();
        let mut storage = FileStorage::new(data_file.as_ref());
        storage.reload(&registry)?;
        Ok(CommandEngine {
            registry,
            storage,
            method_parser: MethodCallParser::new(),
        })
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut FileStorage {
        &mut self.storage
    }

    pub fn execute(&mut self, line: &str) -> Result<CommandResult, CommandError> {
        let line = line.trim();
        let line = match self
            .method_parser
            .rewrite(line, &self.registry, &mut self.storage)?
        {
            Some(line) => line,
            // dictionary-form update already applied and saved
            None => return Ok(CommandResult::Updated),
        };
        let (verb, rest) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, rest),
            None => (line.as_str(), ""),
        };
        let args = split_args(rest);
        match verb {
            "create" => self.execute_create(&args),
            "show" => self.execute_show(&args),
            "destroy" => self.execute_destroy(&args),
            "update" => self.execute_update(&args),
            "all" => self.execute_all(&args),
            "count" => self.execute_count(&args),
            _ => Err(CommandError::UnknownSyntax(line.clone())),
        }
    }

    fn execute_create(&mut self, args: &[String]) -> Result<CommandResult, CommandError> {
        let (_, kind) = self.class_kind(args)?;
        let entity = Entity::new(kind);
        let id = entity.id().to_string();
        self.storage.insert(entity)?;
        self.storage.save()?;
        Ok(CommandResult::Created(id))
    }

    fn execute_show(&self, args: &[String]) -> Result<CommandResult, CommandError> {
        let key = self.instance_key(args)?;
        let entity = self
            .storage
            .all()
            .get(&key)
            .ok_or(CommandError::InstanceNotFound)?;
        Ok(CommandResult::Show(entity.to_string()))
    }

    fn execute_destroy(&mut self, args: &[String]) -> Result<CommandResult, CommandError> {
        let key = self.instance_key(args)?;
        if self.storage.all_mut().remove(&key).is_none() {
            return Err(CommandError::InstanceNotFound);
        }
        self.storage.save()?;
        Ok(CommandResult::Destroyed)
    }

    fn execute_update(&mut self, args: &[String]) -> Result<CommandResult, CommandError> {
        let key = self.instance_key(args)?;
        let entity = self
            .storage
            .all_mut()
            .get_mut(&key)
            .ok_or(CommandError::InstanceNotFound)?;
        let attr = args.get(2).ok_or(CommandError::AttributeNameMissing)?;
        let raw = args.get(3).ok_or(CommandError::AttributeValueMissing)?;
        // tokens past the value are ignored
        let value = coerce(attr, raw)?;
        entity.set_attr(attr, value)?;
        entity.touch();
        self.storage.save()?;
        Ok(CommandResult::Updated)
    }

    fn execute_all(&self, args: &[String]) -> Result<CommandResult, CommandError> {
        let listed = match args.first() {
            Some(class) => {
                if !self.registry.contains(class) {
                    return Err(CommandError::ClassUnknown);
                }
                self.storage
                    .all()
                    .iter()
                    .filter(|(key, _)| key.split('.').next() == Some(class.as_str()))
                    .map(|(_, entity)| entity.to_string())
                    .collect()
            }
            None => self
                .storage
                .all()
                .values()
                .map(|entity| entity.to_string())
                .collect(),
        };
        Ok(CommandResult::Listed(listed))
    }

    fn execute_count(&self, args: &[String]) -> Result<CommandResult, CommandError> {
        let (class, _) = self.class_kind(args)?;
        let count = self
            .storage
            .all()
            .values()
            .filter(|entity| entity.kind().name() == class)
            .count();
        Ok(CommandResult::Count(count))
    }

    fn class_kind<'a>(&self, args: &'a [String]) -> Result<(&'a str, EntityKind), CommandError> {
        let class = args.first().ok_or(CommandError::ClassMissing)?;
        let kind = self
            .registry
            .kind_of(class)
            .ok_or(CommandError::ClassUnknown)?;
        Ok((class, kind))
    }

    fn instance_key(&self, args: &[String]) -> Result<String, CommandError> {
        let (class, _) = self.class_kind(args)?;
        let id = args.get(1).ok_or(CommandError::InstanceIdMissing)?;
        Ok(format!("{class}.{id}"))
    }
}

/// Fixed per-attribute coercion for the four-token update form. Known
/// numeric attributes parse as integers or floats; everything else stays a
/// string. A failed parse aborts the command before any mutation.
fn coerce(attr: &str, raw: &str) -> Result<Value, CommandError> {
    if INTEGER_ATTRS.contains(&attr) {
        let parsed: i64 = raw.parse().map_err(|_| invalid(attr, raw))?;
        return Ok(Value::from(parsed));
    }
    if FLOAT_ATTRS.contains(&attr) {
        let parsed: f64 = raw.parse().map_err(|_| invalid(attr, raw))?;
        if !parsed.is_finite() {
            return Err(invalid(attr, raw));
        }
        return Ok(Value::from(parsed));
    }
    Ok(Value::String(raw.to_string()))
}

fn invalid(attr: &str, value: &str) -> CommandError {
    CommandError::InvalidValue {
        attr: attr.to_string(),
        value: value.to_string(),
    }
}
