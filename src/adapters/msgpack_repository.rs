//! MessagePack-backed model repository.
//!
//! The learned table maps struct keys to value vectors, which rules out JSON
//! for the artifact body. MessagePack handles non-string map keys natively
//! and keeps the files compact.

use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::{
    Result,
    error::Error,
    ports::repository::ModelRepository,
    q_learning::SavedAgent,
};

/// Stores model artifacts as MessagePack files on disk.
#[derive(Debug, Default, Clone)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ModelRepository for MsgPackRepository {
    fn save(&self, model: &SavedAgent, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create model file {}", path.display()),
            source,
        })?;
        rmp_serde::encode::write(&mut file, model).map_err(|e| Error::Encode {
            operation: format!("serialize model to {}", path.display()),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open model file {}", path.display()),
            source,
        })?;
        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| Error::Decode {
            operation: format!("decode model from {}", path.display()),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{Hyperparameters, QLearningAgent};

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_model.msgpack");

        let agent = QLearningAgent::with_seed(Hyperparameters::default(), 5, 7);
        let saved = SavedAgent::from_agent(&agent, "roundtrip");

        let repository = MsgPackRepository::new();
        repository.save(&saved, &path).unwrap();
        let loaded = repository.load(&path).unwrap();

        assert_eq!(loaded.version, SavedAgent::VERSION);
        assert_eq!(loaded.variant, "roundtrip");
        assert_eq!(loaded.table().len(), saved.table().len());
    }

    #[test]
    fn loading_a_missing_file_reports_the_path() {
        let repository = MsgPackRepository::new();
        let err = repository.load(Path::new("/nonexistent/model.msgpack"));
        assert!(matches!(err, Err(Error::Io { .. })));
    }
}
