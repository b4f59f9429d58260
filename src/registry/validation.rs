//! Entity configuration validation.

use crate::config::EntityConfig;

/// Validate one entity entry from configuration.
pub fn validate_entity_config(entity_id: &str, entity: &EntityConfig) -> Result<(), String> {
    if entity_id.trim().is_empty() {
        return Err("Entity ID cannot be empty".to_string());
    }

    if entity.files.is_empty() {
        return Err(format!("Entity '{}' declares no files", entity_id));
    }

    for (idx, file) in entity.files.iter().enumerate() {
        if file.trim().is_empty() {
            return Err(format!("Entity '{}' has an empty filename", entity_id));
        }
        if file.split('/').any(|segment| segment == "..") {
            return Err(format!(
                "Entity '{}' filename '{}' escapes its folder",
                entity_id, file
            ));
        }
        if entity.files[..idx].contains(file) {
            return Err(format!(
                "Entity '{}' declares '{}' more than once",
                entity_id, file
            ));
        }
    }

    Ok(())
}

/// Collected results of checking a configuration.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub subject: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(subject: String) -> Self {
        Self {
            subject,
            checks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.checks.iter().all(|(_, passed)| *passed)
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}
