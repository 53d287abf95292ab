use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::AppError;
use crate::geo::Coordinate;
use crate::models::location::{default_locations, NamedLocation};

pub type LocationTable = BTreeMap<String, Coordinate>;

/// Name to coordinate directory. Readers take a cheap snapshot; the admin
/// replace-all swaps the whole table at once.
pub struct LocationDirectory {
    table: RwLock<Arc<LocationTable>>,
}

impl Default for LocationDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl LocationDirectory {
    pub fn seeded() -> Self {
        let table = default_locations()
            .into_iter()
            .map(|location| (location.name.clone(), location.coordinate()))
            .collect();

        Self {
            table: RwLock::new(Arc::new(table)),
        }
    }

    pub fn snapshot(&self) -> Result<Arc<LocationTable>, AppError> {
        self.table
            .read()
            .map(|table| Arc::clone(&table))
            .map_err(|_| AppError::Internal("location table lock poisoned".to_string()))
    }

    pub fn list(&self) -> Result<Vec<NamedLocation>, AppError> {
        let table = self.snapshot()?;
        Ok(table
            .iter()
            .map(|(name, coordinate)| NamedLocation {
                name: name.clone(),
                lat: coordinate.lat,
                lng: coordinate.lng,
            })
            .collect())
    }

    pub fn replace_all(&self, locations: Vec<NamedLocation>) -> Result<usize, AppError> {
        let mut seen = HashSet::new();
        let mut table = LocationTable::new();

        for location in locations {
            let name = location.name.trim();
            if name.is_empty() {
                return Err(AppError::BadRequest(
                    "location name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(AppError::BadRequest(format!("duplicate location: {name}")));
            }

            let coordinate = location.coordinate();
            coordinate
                .validate()
                .map_err(|err| AppError::BadRequest(format!("{name}: {err}")))?;

            table.insert(name.to_string(), coordinate);
        }

        let count = table.len();
        let mut guard = self
            .table
            .write()
            .map_err(|_| AppError::Internal("location table lock poisoned".to_string()))?;
        *guard = Arc::new(table);

        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |table| table.len())
    }
}
