pub mod cli;
pub mod command;
pub mod models;
pub mod storage;

pub use cli::Console;
pub use command::{CommandEngine, CommandError, CommandResult};
pub use models::{ClassRegistry, Entity, EntityKind, Fields};
pub use storage::{FileStorage, StorageError};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_console_state_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("file.json");

        // Phase 1: create and mutate objects
        let user_id;
        {
            let mut engine = CommandEngine::new(&data_file).unwrap();
            user_id = match engine.execute("create User").unwrap() {
                CommandResult::Created(id) => id,
                other => panic!("expected Created, got {:?}", other),
            };
            engine
                .execute(&format!("update User {user_id} first_name \"Ann Lee\""))
                .unwrap();
            engine.execute("create Place").unwrap();
        } // engine dropped here

        // Phase 2: new engine on the same file (simulating restart)
        {
            let mut engine = CommandEngine::new(&data_file).unwrap();
            assert_eq!(engine.storage().all().len(), 2);

            match engine.execute(&format!("show User {user_id}")).unwrap() {
                CommandResult::Show(repr) => {
                    assert!(repr.starts_with(&format!("[User] ({user_id}) ")));
                    assert!(repr.contains("Ann Lee"));
                }
                other => panic!("expected Show, got {:?}", other),
            }
            assert_eq!(
                engine.execute("count Place").unwrap(),
                CommandResult::Count(1)
            );

            // destroy persists too
            engine.execute(&format!("destroy User {user_id}")).unwrap();
        }

        // Phase 3: the destroy from phase 2 is on disk
        {
            let mut engine = CommandEngine::new(&data_file).unwrap();
            assert_eq!(
                engine.execute("count User").unwrap(),
                CommandResult::Count(0)
            );
            assert_eq!(
                engine.execute("count Place").unwrap(),
                CommandResult::Count(1)
            );
        }
    }

    #[test]
    fn test_round_trip_preserves_attribute_values() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("file.json");
        let registry = ClassRegistry::new();

        let mut storage = FileStorage::new(&data_file);
        let mut place = Entity::new(EntityKind::Place);
        place
            .set_attr("name", serde_json::json!("Loft"))
            .unwrap();
        place
            .set_attr("latitude", serde_json::json!(45.52))
            .unwrap();
        storage.insert(place).unwrap();
        storage.save().unwrap();

        let before = storage.all().clone();
        let mut restored = FileStorage::new(&data_file);
        restored.reload(&registry).unwrap();
        assert_eq!(restored.all(), &before);
    }
}
