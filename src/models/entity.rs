use std::fmt;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::base;
use super::error::ModelError;
use super::{Amenity, City, Place, Review, State, User};

/// Field carrying the variant name in every serialized record.
pub const CLASS_TAG: &str = "__class__";

/// Lifecycle attributes, not settable through attribute updates.
const RESERVED: [&str; 4] = ["id", "created_at", "updated_at", CLASS_TAG];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::BaseModel,
        EntityKind::User,
        EntityKind::State,
        EntityKind::City,
        EntityKind::Amenity,
        EntityKind::Place,
        EntityKind::Review,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::BaseModel => "BaseModel",
            EntityKind::User => "User",
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }
}

/// Variant-specific field set of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Fields {
    BaseModel,
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
    Review(Review),
}

impl Fields {
    pub fn default_for(kind: EntityKind) -> Self {
        match kind {
            EntityKind::BaseModel => Fields::BaseModel,
            EntityKind::User => Fields::User(User::default()),
            EntityKind::State => Fields::State(State::default()),
            EntityKind::City => Fields::City(City::default()),
            EntityKind::Amenity => Fields::Amenity(Amenity::default()),
            EntityKind::Place => Fields::Place(Place::default()),
            EntityKind::Review => Fields::Review(Review::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Fields::BaseModel => EntityKind::BaseModel,
            Fields::User(_) => EntityKind::User,
            Fields::State(_) => EntityKind::State,
            Fields::City(_) => EntityKind::City,
            Fields::Amenity(_) => EntityKind::Amenity,
            Fields::Place(_) => EntityKind::Place,
            Fields::Review(_) => EntityKind::Review,
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            Fields::BaseModel => Map::new(),
            Fields::User(v) => as_map(v),
            Fields::State(v) => as_map(v),
            Fields::City(v) => as_map(v),
            Fields::Amenity(v) => as_map(v),
            Fields::Place(v) => as_map(v),
            Fields::Review(v) => as_map(v),
        }
    }

    /// Builds the field set for `kind` from an attribute map. Absent fields
    /// take the variant default; unknown names are an error.
    pub fn from_map(kind: EntityKind, map: Map<String, Value>) -> Result<Self, ModelError> {
        match kind {
            EntityKind::BaseModel => match map.into_iter().next() {
                None => Ok(Fields::BaseModel),
                Some((name, _)) => Err(ModelError::UnknownAttribute(name)),
            },
            EntityKind::User => from_map(map).map(Fields::User),
            EntityKind::State => from_map(map).map(Fields::State),
            EntityKind::City => from_map(map).map(Fields::City),
            EntityKind::Amenity => from_map(map).map(Fields::Amenity),
            EntityKind::Place => from_map(map).map(Fields::Place),
            EntityKind::Review => from_map(map).map(Fields::Review),
        }
    }
}

fn as_map<T: Serialize>(fields: &T) -> Map<String, Value> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn from_map<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, ModelError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| ModelError::Fields(e.to_string()))
}

/// One stored object: identity, lifecycle timestamps, and a tagged field
/// set. The id and created_at never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    fields: Fields,
}

impl Entity {
    /// Fresh entity: random id, both timestamps set to now, default fields.
    pub fn new(kind: EntityKind) -> Self {
        let now = base::now();
        Entity {
            id: base::fresh_id(),
            created_at: now,
            updated_at: now,
            fields: Fields::default_for(kind),
        }
    }

    /// Rebuilds an entity from a persisted attribute map, adopting its id
    /// and timestamps verbatim. The type tag is ignored here; the caller
    /// already resolved `kind` from it.
    pub fn from_map(kind: EntityKind, mut map: Map<String, Value>) -> Result<Self, ModelError> {
        map.remove(CLASS_TAG);
        let id = match map.remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(ModelError::Fields(format!("id must be a string, got {other}")))
            }
            None => String::new(),
        };
        let created_at = take_timestamp(&mut map, "created_at")?;
        let updated_at = take_timestamp(&mut map, "updated_at")?;
        Ok(Entity {
            id,
            created_at,
            updated_at,
            fields: Fields::from_map(kind, map)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.fields.kind()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Key under which this entity lives in storage.
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.kind().name(), self.id)
    }

    /// Marks the entity as modified. Persisting is the caller's job.
    pub fn touch(&mut self) {
        self.updated_at = base::now();
    }

    /// Full attribute map plus the type tag; timestamps leave their
    /// in-memory form only here.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = self.fields.to_map();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert(
            "created_at".to_string(),
            Value::String(base::format_timestamp(self.created_at)),
        );
        map.insert(
            "updated_at".to_string(),
            Value::String(base::format_timestamp(self.updated_at)),
        );
        map.insert(
            CLASS_TAG.to_string(),
            Value::String(self.kind().name().to_string()),
        );
        map
    }

    /// Sets one variant field from a JSON value. Rejects lifecycle names,
    /// unknown names, and type mismatches; the entity is untouched on error.
    pub fn set_attr(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        if RESERVED.contains(&name) {
            return Err(ModelError::ReadOnlyAttribute(name.to_string()));
        }
        let mut map = self.fields.to_map();
        if !map.contains_key(name) {
            return Err(ModelError::UnknownAttribute(name.to_string()));
        }
        map.insert(name.to_string(), value);
        self.fields = Fields::from_map(self.kind(), map)?;
        Ok(())
    }
}

fn take_timestamp(map: &mut Map<String, Value>, field: &str) -> Result<NaiveDateTime, ModelError> {
    match map.remove(field) {
        Some(Value::String(raw)) => base::parse_timestamp(&raw),
        Some(other) => Err(ModelError::Fields(format!(
            "{field} must be a string, got {other}"
        ))),
        None => Err(ModelError::Fields(format!("missing {field}"))),
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = self.serialize();
        map.remove(CLASS_TAG);
        let attrs = serde_json::to_string(&map).map_err(|_| fmt::Error)?;
        write!(f, "[{}] ({}) {}", self.kind().name(), self.id, attrs)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn sample_map(kind: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), json!("U1"));
        map.insert("created_at".into(), json!("2024-01-01T00:00:00.000000"));
        map.insert("updated_at".into(), json!("2024-01-01T00:00:00.000000"));
        map.insert(CLASS_TAG.into(), json!(kind));
        map
    }

    #[test]
    fn test_new_entity_ids_are_unique() {
        let a = Entity::new(EntityKind::User);
        let b = Entity::new(EntityKind::User);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_entity_timestamps_match() {
        let entity = Entity::new(EntityKind::State);
        assert_eq!(entity.created_at(), entity.updated_at());
    }

    #[test]
    fn test_touch_advances_updated_at_only() {
        let mut entity = Entity::new(EntityKind::User);
        let created = entity.created_at();
        thread::sleep(Duration::from_millis(2));
        entity.touch();
        assert!(entity.updated_at() > created);
        assert_eq!(entity.created_at(), created);
    }

    #[test]
    fn test_serialize_carries_tag_and_iso_timestamps() {
        let entity = Entity::new(EntityKind::City);
        let map = entity.serialize();
        assert_eq!(map.get(CLASS_TAG), Some(&json!("City")));
        assert_eq!(map.get("id"), Some(&json!(entity.id())));
        let created = map.get("created_at").and_then(Value::as_str).unwrap();
        assert!(base::parse_timestamp(created).is_ok());
        assert_eq!(map.get("state_id"), Some(&json!("")));
    }

    #[test]
    fn test_from_map_round_trip() {
        let mut entity = Entity::new(EntityKind::Place);
        entity.set_attr("name", json!("Loft")).unwrap();
        entity.set_attr("number_rooms", json!(4)).unwrap();
        let rebuilt = Entity::from_map(EntityKind::Place, entity.serialize()).unwrap();
        assert_eq!(rebuilt, entity);
    }

    #[test]
    fn test_from_map_absent_fields_take_defaults() {
        let entity = Entity::from_map(EntityKind::Place, sample_map("Place")).unwrap();
        match entity.fields() {
            Fields::Place(place) => {
                assert_eq!(place.number_rooms, 0);
                assert_eq!(place.latitude, 0.0);
                assert!(place.amenity_ids.is_empty());
            }
            other => panic!("expected Place fields, got {:?}", other),
        }
    }

    #[test]
    fn test_from_map_rejects_unknown_attribute() {
        let mut map = sample_map("User");
        map.insert("nickname".into(), json!("Ann"));
        assert!(Entity::from_map(EntityKind::User, map).is_err());
    }

    #[test]
    fn test_from_map_rejects_bad_timestamp() {
        let mut map = sample_map("User");
        map.insert("created_at".into(), json!("yesterday"));
        assert!(matches!(
            Entity::from_map(EntityKind::User, map),
            Err(ModelError::Timestamp { .. })
        ));
    }

    #[test]
    fn test_from_map_missing_id_becomes_empty() {
        let mut map = sample_map("User");
        map.remove("id");
        let entity = Entity::from_map(EntityKind::User, map).unwrap();
        assert_eq!(entity.id(), "");
    }

    #[test]
    fn test_set_attr_updates_field() {
        let mut entity = Entity::new(EntityKind::User);
        entity.set_attr("first_name", json!("Ann")).unwrap();
        match entity.fields() {
            Fields::User(user) => assert_eq!(user.first_name, "Ann"),
            other => panic!("expected User fields, got {:?}", other),
        }
    }

    #[test]
    fn test_set_attr_rejects_unknown_name() {
        let mut entity = Entity::new(EntityKind::User);
        assert!(matches!(
            entity.set_attr("nickname", json!("Ann")),
            Err(ModelError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_set_attr_rejects_lifecycle_names() {
        let mut entity = Entity::new(EntityKind::User);
        assert!(matches!(
            entity.set_attr("id", json!("other")),
            Err(ModelError::ReadOnlyAttribute(_))
        ));
    }

    #[test]
    fn test_set_attr_rejects_type_mismatch() {
        let mut entity = Entity::new(EntityKind::Place);
        let before = entity.clone();
        assert!(entity.set_attr("number_rooms", json!("four")).is_err());
        assert_eq!(entity, before);
    }

    #[test]
    fn test_base_model_has_no_settable_attributes() {
        let mut entity = Entity::new(EntityKind::BaseModel);
        assert!(matches!(
            entity.set_attr("name", json!("x")),
            Err(ModelError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_display_format() {
        let mut map = sample_map("User");
        map.insert("first_name".into(), json!("Ann"));
        let entity = Entity::from_map(EntityKind::User, map).unwrap();
        assert_eq!(
            entity.to_string(),
            "[User] (U1) {\"created_at\":\"2024-01-01T00:00:00.000000\",\
             \"email\":\"\",\"first_name\":\"Ann\",\"id\":\"U1\",\"last_name\":\"\",\
             \"password\":\"\",\"updated_at\":\"2024-01-01T00:00:00.000000\"}"
        );
    }
}
