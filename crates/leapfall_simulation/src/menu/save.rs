//! Save/load seam для main menu
//!
//! `SaveService` — граница с persistence. Menu никогда не паникует на ней:
//! все ошибки приходят как `SaveError` и логируются вызывающим.
//!
//! - `RonSaveService`: SessionState в RON файле (Godot: `user://savegame.ron`)
//! - `InMemorySaveService`: headless demo + тесты

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logger;

pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Текущая игровая сессия (то, что сохраняется)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,
    /// Scene path уровня, например `res://scenes/Levels/Level_1.tscn`
    pub current_level: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            current_level: String::new(),
        }
    }
}

impl SessionState {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            current_level: level.into(),
        }
    }

    /// Короткое имя уровня (`Level_1` для `res://scenes/Levels/Level_1.tscn`)
    pub fn level_name(&self) -> &str {
        let file = self
            .current_level
            .rsplit('/')
            .next()
            .unwrap_or(self.current_level.as_str());
        file.split('.').next().unwrap_or(file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("No save file")]
    NotFound,
    #[error("Unsupported save version: {0}")]
    InvalidVersion(u32),
}

pub trait SaveService: Send + Sync {
    fn save_file_exists(&self) -> bool;

    /// Прочитать сохранённую сессию. Вызывающий применяет её только при `Ok`
    fn load_game(&self) -> Result<SessionState, SaveError>;

    /// Удалить save (отсутствие файла — не ошибка)
    fn delete_save_file(&mut self) -> Result<(), SaveError>;

    fn save_current_level(&mut self, session: &SessionState) -> Result<(), SaveError>;
}

/// Проверка загруженной сессии (version + непустой level)
fn validate(session: SessionState) -> Result<SessionState, SaveError> {
    if session.version > SAVE_FORMAT_VERSION {
        return Err(SaveError::InvalidVersion(session.version));
    }
    if session.current_level.is_empty() {
        return Err(SaveError::Deserialization("empty current_level".to_string()));
    }
    Ok(session)
}

/// Save file в RON формате
#[derive(Debug, Clone)]
pub struct RonSaveService {
    path: PathBuf,
}

impl RonSaveService {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveService for RonSaveService {
    fn save_file_exists(&self) -> bool {
        self.path.is_file()
    }

    fn load_game(&self) -> Result<SessionState, SaveError> {
        if !self.save_file_exists() {
            return Err(SaveError::NotFound);
        }

        let ron_string =
            std::fs::read_to_string(&self.path).map_err(|e| SaveError::Io(e.to_string()))?;

        let session: SessionState =
            ron::from_str(&ron_string).map_err(|e| SaveError::Deserialization(e.to_string()))?;

        let session = validate(session)?;
        logger::log_info(&format!(
            "💾 Save loaded from {} (level: {})",
            self.path.display(),
            session.level_name()
        ));
        Ok(session)
    }

    fn delete_save_file(&mut self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                logger::log(&format!("🗑️ Save file deleted: {}", self.path.display()));
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SaveError::Io(e.to_string())),
        }
    }

    fn save_current_level(&mut self, session: &SessionState) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SaveError::Io(e.to_string()))?;
            }
        }

        let ron_string = ron::ser::to_string_pretty(session, ron::ser::PrettyConfig::default())
            .map_err(|e| SaveError::Serialization(e.to_string()))?;

        std::fs::write(&self.path, ron_string).map_err(|e| SaveError::Io(e.to_string()))?;

        logger::log_info(&format!("💾 Game saved to {}", self.path.display()));
        Ok(())
    }
}

/// In-memory save (headless demo, тесты)
#[derive(Debug, Clone, Default)]
pub struct InMemorySaveService {
    saved: Option<SessionState>,
    fail_loads: bool,
}

impl InMemorySaveService {
    pub fn with_save(session: SessionState) -> Self {
        Self {
            saved: Some(session),
            fail_loads: false,
        }
    }

    /// Save "существует", но load всегда падает (corrupted file)
    pub fn corrupted() -> Self {
        Self {
            saved: Some(SessionState::default()),
            fail_loads: true,
        }
    }

    pub fn saved(&self) -> Option<&SessionState> {
        self.saved.as_ref()
    }
}

impl SaveService for InMemorySaveService {
    fn save_file_exists(&self) -> bool {
        self.saved.is_some()
    }

    fn load_game(&self) -> Result<SessionState, SaveError> {
        if self.fail_loads {
            return Err(SaveError::Deserialization("corrupted save".to_string()));
        }

        let session = self.saved.clone().ok_or(SaveError::NotFound)?;
        validate(session)
    }

    fn delete_save_file(&mut self) -> Result<(), SaveError> {
        self.saved = None;
        Ok(())
    }

    fn save_current_level(&mut self, session: &SessionState) -> Result<(), SaveError> {
        self.saved = Some(session.clone());
        self.fail_loads = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name() {
        let session = SessionState::new("res://scenes/Levels/Level_1.tscn");
        assert_eq!(session.level_name(), "Level_1");
        assert_eq!(SessionState::new("Level_2").level_name(), "Level_2");
    }

    #[test]
    fn test_ron_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = RonSaveService::new(dir.path().join("saves").join("savegame.ron"));
        assert!(!service.save_file_exists());

        let session = SessionState::new("res://scenes/Levels/Level_3.tscn");
        service.save_current_level(&session).unwrap();
        assert!(service.save_file_exists());

        let loaded = service.load_game().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_ron_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = RonSaveService::new(dir.path().join("savegame.ron"));
        assert!(service.delete_save_file().is_ok());

        service
            .save_current_level(&SessionState::new("res://a.tscn"))
            .unwrap();
        service.delete_save_file().unwrap();
        assert!(!service.save_file_exists());
    }

    #[test]
    fn test_ron_load_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.ron");
        std::fs::write(&path, "(version: 1, current_level: ").unwrap();

        let service = RonSaveService::new(&path);
        assert!(matches!(
            service.load_game(),
            Err(SaveError::Deserialization(_))
        ));
    }

    #[test]
    fn test_ron_load_future_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.ron");
        std::fs::write(&path, "(version: 99, current_level: \"res://a.tscn\")").unwrap();

        let service = RonSaveService::new(&path);
        assert!(matches!(service.load_game(), Err(SaveError::InvalidVersion(99))));
    }

    #[test]
    fn test_ron_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = RonSaveService::new(dir.path().join("none.ron"));
        assert!(matches!(service.load_game(), Err(SaveError::NotFound)));
    }

    #[test]
    fn test_in_memory_corrupted() {
        let service = InMemorySaveService::corrupted();
        assert!(service.save_file_exists());
        assert!(service.load_game().is_err());
    }
}
