use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::models::DonorRecord;

/// Errors that can occur with registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Donor already registered: {0}")]
    DuplicateId(String),

    #[error("Donor not found: {0}")]
    NotFound(String),

    #[error("Registry lock poisoned")]
    Poisoned,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    donors: Vec<DonorRecord>,
}

/// In-memory donor registry
///
/// Readers take an `Arc` snapshot of the current donor list. Writers build a
/// new list and swap it in, so a snapshot never changes once handed out.
#[derive(Debug, Default)]
pub struct DonorRegistry {
    donors: RwLock<Arc<Vec<DonorRecord>>>,
}

impl DonorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records, rejecting duplicate ids
    pub fn from_records(records: Vec<DonorRecord>) -> Result<Self, RegistryError> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(RegistryError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self {
            donors: RwLock::new(Arc::new(records)),
        })
    }

    /// Parse a TOML seed document with a `[[donors]]` array
    pub fn from_toml_str(contents: &str) -> Result<Self, RegistryError> {
        let seed: SeedFile = toml::from_str(contents)?;
        Self::from_records(seed.donors)
    }

    /// Load the registry from a TOML seed file
    pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let registry = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded {} donors from {}",
            registry.len(),
            path.as_ref().display()
        );
        Ok(registry)
    }

    /// Current donor list; unaffected by later registrations
    pub fn snapshot(&self) -> Arc<Vec<DonorRecord>> {
        match self.donors.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Add a donor
    pub fn register(&self, record: DonorRecord) -> Result<(), RegistryError> {
        let mut guard = self.donors.write().map_err(|_| RegistryError::Poisoned)?;

        if guard.iter().any(|d| d.id == record.id) {
            return Err(RegistryError::DuplicateId(record.id));
        }

        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        tracing::debug!("Registering donor {} ({})", record.id, record.blood_type);
        next.push(record);
        *guard = Arc::new(next);

        Ok(())
    }

    /// Change one donor in place and return the updated record.
    ///
    /// Like `register`, the change lands in a new list; earlier snapshots keep
    /// the old record.
    pub fn update<F>(&self, id: &str, change: F) -> Result<DonorRecord, RegistryError>
    where
        F: FnOnce(&mut DonorRecord),
    {
        let mut guard = self.donors.write().map_err(|_| RegistryError::Poisoned)?;

        let index = guard
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        let mut next: Vec<DonorRecord> = guard.iter().cloned().collect();
        change(&mut next[index]);
        let updated = next[index].clone();
        tracing::debug!(
            "Updated donor {} (available={}, organs={})",
            updated.id,
            updated.available,
            updated.organs.len()
        );
        *guard = Arc::new(next);

        Ok(updated)
    }

    pub fn get(&self, id: &str) -> Option<DonorRecord> {
        self.snapshot().iter().find(|d| d.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;

    fn donor(id: &str) -> DonorRecord {
        DonorRecord {
            id: id.to_string(),
            name: format!("Donor {}", id),
            age: 40,
            blood_type: BloodType::BNegative,
            organs: vec![],
            last_donation: None,
            city: "Oakland".to_string(),
            state: "CA".to_string(),
            available: true,
            distance_km: None,
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = DonorRegistry::new();
        registry.register(donor("1")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("1").unwrap().name, "Donor 1");
        assert!(registry.get("2").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = DonorRegistry::new();
        registry.register(donor("1")).unwrap();

        let err = registry.register(donor("1")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "1"));
        assert_eq!(registry.len(), 1);

        assert!(DonorRegistry::from_records(vec![donor("a"), donor("a")]).is_err());
    }

    #[test]
    fn test_snapshot_isolated_from_writes() {
        let registry = DonorRegistry::from_records(vec![donor("1")]).unwrap();
        let before = registry.snapshot();

        registry.register(donor("2")).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn test_update_leaves_earlier_snapshot_untouched() {
        let registry = DonorRegistry::from_records(vec![donor("1"), donor("2")]).unwrap();
        let before = registry.snapshot();

        let updated = registry.update("2", |d| d.available = false).unwrap();

        assert!(!updated.available);
        assert!(before[1].available);
        assert!(!registry.get("2").unwrap().available);
        assert!(registry.get("1").unwrap().available);
    }

    #[test]
    fn test_update_unknown_id() {
        let registry = DonorRegistry::from_records(vec![donor("1")]).unwrap();
        let err = registry.update("9", |d| d.available = false).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(id) if id == "9"));
    }

    #[test]
    fn test_seed_from_toml() {
        let seed = r#"
            [[donors]]
            id = "1"
            name = "John Doe"
            age = 28
            bloodType = "O+"
            city = "San Francisco"
            state = "CA"
            available = true
            lastDonation = "2023-01-15T00:00:00Z"
            distanceKm = 2.4

            [[donors]]
            id = "2"
            name = "Jane Smith"
            age = 35
            bloodType = "A-"
            organs = ["Kidney", "Liver"]
            city = "San Francisco"
            state = "CA"
        "#;

        let registry = DonorRegistry::from_toml_str(seed).unwrap();
        let snapshot = registry.snapshot();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].blood_type, BloodType::OPositive);
        assert!(snapshot[0].last_donation.is_some());
        assert!(snapshot[1].available);
        assert_eq!(snapshot[1].organs.len(), 2);
    }

    #[test]
    fn test_seed_rejects_unknown_blood_type() {
        let seed = r#"
            [[donors]]
            id = "1"
            name = "X"
            age = 30
            bloodType = "Z+"
            city = "Oakland"
            state = "CA"
        "#;

        assert!(matches!(
            DonorRegistry::from_toml_str(seed),
            Err(RegistryError::Parse(_))
        ));
    }
}
