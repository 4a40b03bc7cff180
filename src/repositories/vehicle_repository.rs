use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Vehicle;
use crate::utils::errors::VehicleError;

pub type RepositoryResult<T> = Result<T, VehicleError>;

/// Operaciones del almacén de vehículos
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_all(&self) -> HashMap<i64, Vehicle>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Vehicle>;
    async fn count(&self) -> usize;
    async fn add(&self, vehicle: Vehicle) -> RepositoryResult<()>;
    async fn add_multiple(&self, vehicles: Vec<Vehicle>) -> RepositoryResult<()>;
    async fn search_by_color_and_year(&self, color: &str, year: i32) -> RepositoryResult<Vec<Vehicle>>;
    async fn search_by_brand(&self, brand: &str, start_year: i32, end_year: i32) -> RepositoryResult<Vec<Vehicle>>;
    async fn get_average_speed_by_brand(&self, brand: &str) -> RepositoryResult<f64>;
    async fn get_average_capacity_by_brand(&self, brand: &str) -> RepositoryResult<f64>;
    async fn get_vehicles_by_fuel_type(&self, fuel_type: &str) -> RepositoryResult<Vec<Vehicle>>;
    async fn get_vehicles_by_transmission(&self, transmission: &str) -> RepositoryResult<Vec<Vehicle>>;
    async fn get_vehicles_by_dimensions(
        &self,
        min_length: f64,
        max_length: f64,
        min_width: f64,
        max_width: f64,
    ) -> RepositoryResult<Vec<Vehicle>>;
    async fn get_vehicles_by_weight(&self, min_weight: f64, max_weight: f64) -> RepositoryResult<Vec<Vehicle>>;
    async fn update_max_speed_by_id(&self, id: i64, max_speed: f64) -> RepositoryResult<Vehicle>;
    async fn update_fuel_type_by_id(&self, id: i64, fuel_type: &str) -> RepositoryResult<Vehicle>;
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;
}

/// Almacén en memoria: mapa id -> Vehicle protegido por un RwLock
#[derive(Default)]
pub struct InMemoryVehicleRepository {
    db: RwLock<HashMap<i64, Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorrido lineal que devuelve copias de los registros que cumplen `predicate`,
    /// ordenadas por id. Falla con VehiclesNotFound si no hay coincidencias.
    async fn filter<F>(&self, predicate: F) -> RepositoryResult<Vec<Vehicle>>
    where
        F: Fn(&Vehicle) -> bool + Send,
    {
        let db = self.db.read().await;
        let mut matches: Vec<Vehicle> = db.values().filter(|&v| predicate(v)).cloned().collect();

        if matches.is_empty() {
            return Err(VehicleError::VehiclesNotFound);
        }

        matches.sort_by_key(|v| v.id);
        Ok(matches)
    }

    /// Media aritmética de `field` sobre los vehículos de la marca
    async fn average_by_brand<F>(&self, brand: &str, field: F) -> RepositoryResult<f64>
    where
        F: Fn(&Vehicle) -> f64 + Send,
    {
        let db = self.db.read().await;
        let (total, size) = db
            .values()
            .filter(|v| v.brand == brand)
            .fold((0.0_f64, 0_usize), |(total, size), v| (total + field(v), size + 1));

        if size == 0 {
            return Err(VehicleError::VehiclesNotFound);
        }

        Ok(total / size as f64)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_all(&self) -> HashMap<i64, Vehicle> {
        self.db.read().await.clone()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Vehicle> {
        self.db
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(VehicleError::NotFound(id))
    }

    async fn count(&self) -> usize {
        self.db.read().await.len()
    }

    async fn add(&self, vehicle: Vehicle) -> RepositoryResult<()> {
        let mut db = self.db.write().await;

        if db.contains_key(&vehicle.id) {
            return Err(VehicleError::AlreadyExists(vehicle.id));
        }

        debug!("Insertando vehículo {}", vehicle.id);
        db.insert(vehicle.id, vehicle);
        Ok(())
    }

    async fn add_multiple(&self, vehicles: Vec<Vehicle>) -> RepositoryResult<()> {
        let mut db = self.db.write().await;

        // Fase 1: comprobar todos los ids contra el almacén y contra el propio lote
        let mut seen = HashSet::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            if db.contains_key(&vehicle.id) || !seen.insert(vehicle.id) {
                return Err(VehicleError::AlreadyExists(vehicle.id));
            }
        }

        // Fase 2: insertar
        debug!("Insertando lote de {} vehículos", vehicles.len());
        db.extend(vehicles.into_iter().map(|v| (v.id, v)));
        Ok(())
    }

    async fn search_by_color_and_year(&self, color: &str, year: i32) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.color == color && v.fabrication_year == year).await
    }

    async fn search_by_brand(&self, brand: &str, start_year: i32, end_year: i32) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.brand == brand && v.fabrication_year >= start_year && v.fabrication_year <= end_year)
            .await
    }

    async fn get_average_speed_by_brand(&self, brand: &str) -> RepositoryResult<f64> {
        self.average_by_brand(brand, |v| v.max_speed).await
    }

    async fn get_average_capacity_by_brand(&self, brand: &str) -> RepositoryResult<f64> {
        self.average_by_brand(brand, |v| f64::from(v.capacity)).await
    }

    async fn get_vehicles_by_fuel_type(&self, fuel_type: &str) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.fuel_type == fuel_type).await
    }

    async fn get_vehicles_by_transmission(&self, transmission: &str) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.transmission == transmission).await
    }

    async fn get_vehicles_by_dimensions(
        &self,
        min_length: f64,
        max_length: f64,
        min_width: f64,
        max_width: f64,
    ) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.fits_dimensions(min_length, max_length, min_width, max_width))
            .await
    }

    async fn get_vehicles_by_weight(&self, min_weight: f64, max_weight: f64) -> RepositoryResult<Vec<Vehicle>> {
        self.filter(|v| v.weight >= min_weight && v.weight <= max_weight).await
    }

    async fn update_max_speed_by_id(&self, id: i64, max_speed: f64) -> RepositoryResult<Vehicle> {
        let mut db = self.db.write().await;
        let entry = db.get_mut(&id).ok_or(VehicleError::NotFound(id))?;
        entry.max_speed = max_speed;
        Ok(entry.clone())
    }

    async fn update_fuel_type_by_id(&self, id: i64, fuel_type: &str) -> RepositoryResult<Vehicle> {
        let mut db = self.db.write().await;
        let entry = db.get_mut(&id).ok_or(VehicleError::NotFound(id))?;
        entry.fuel_type = fuel_type.to_string();
        Ok(entry.clone())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.db
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(VehicleError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dimensions;

    fn vehicle(id: i64, brand: &str, color: &str, year: i32, max_speed: f64) -> Vehicle {
        Vehicle {
            id,
            brand: brand.to_string(),
            model: "Corolla".to_string(),
            registration: format!("REG-{}", id),
            color: color.to_string(),
            fabrication_year: year,
            capacity: 5,
            max_speed,
            fuel_type: "gasoline".to_string(),
            transmission: "manual".to_string(),
            weight: 1300.0,
            dimensions: Dimensions { height: 1.4, length: 4.6, width: 1.8 },
        }
    }

    async fn toyota_store() -> InMemoryVehicleRepository {
        let repository = InMemoryVehicleRepository::new();
        repository.add(vehicle(1, "Toyota", "red", 2020, 180.0)).await.unwrap();
        repository.add(vehicle(2, "Toyota", "blue", 2022, 200.0)).await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_add_then_find_all() {
        let repository = toyota_store().await;
        let all = repository.find_all().await;

        assert_eq!(all.len(), 2);
        assert_eq!(all[&1].color, "red");
        assert_eq!(all[&2].color, "blue");
    }

    #[tokio::test]
    async fn test_add_duplicate_leaves_store_unchanged() {
        let repository = toyota_store().await;
        let before = repository.find_all().await;

        let err = repository.add(vehicle(1, "Ford", "black", 2010, 150.0)).await.unwrap_err();

        assert_eq!(err, VehicleError::AlreadyExists(1));
        assert_eq!(repository.find_all().await, before);
    }

    #[tokio::test]
    async fn test_add_multiple_is_all_or_nothing() {
        let repository = toyota_store().await;

        let err = repository
            .add_multiple(vec![vehicle(3, "Ford", "black", 2010, 150.0), vehicle(2, "Ford", "white", 2011, 160.0)])
            .await
            .unwrap_err();

        assert_eq!(err, VehicleError::AlreadyExists(2));
        assert_eq!(repository.count().await, 2);
        assert!(repository.find_by_id(3).await.is_err());
    }

    #[tokio::test]
    async fn test_add_multiple_rejects_duplicates_within_batch() {
        let repository = InMemoryVehicleRepository::new();

        let err = repository
            .add_multiple(vec![vehicle(7, "Ford", "black", 2010, 150.0), vehicle(7, "Ford", "white", 2011, 160.0)])
            .await
            .unwrap_err();

        assert_eq!(err, VehicleError::AlreadyExists(7));
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_add_multiple_inserts_all() {
        let repository = InMemoryVehicleRepository::new();
        repository
            .add_multiple(vec![vehicle(1, "Ford", "black", 2010, 150.0), vehicle(2, "Ford", "white", 2011, 160.0)])
            .await
            .unwrap();

        assert_eq!(repository.count().await, 2);
    }

    #[tokio::test]
    async fn test_search_by_color_and_year() {
        let repository = toyota_store().await;

        let found = repository.search_by_color_and_year("red", 2020).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let err = repository.search_by_color_and_year("red", 2022).await.unwrap_err();
        assert_eq!(err, VehicleError::VehiclesNotFound);
    }

    #[tokio::test]
    async fn test_search_by_brand_inclusive_bounds() {
        let repository = toyota_store().await;

        let found = repository.search_by_brand("Toyota", 2020, 2022).await.unwrap();
        assert_eq!(found.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2]);

        let found = repository.search_by_brand("Toyota", 2022, 2022).await.unwrap();
        assert_eq!(found.len(), 1);

        assert!(repository.search_by_brand("Toyota", 2023, 2030).await.is_err());
        assert!(repository.search_by_brand("Honda", 2000, 2030).await.is_err());
    }

    #[tokio::test]
    async fn test_averages_by_brand() {
        let repository = toyota_store().await;
        repository.add(Vehicle { capacity: 2, ..vehicle(3, "Toyota", "green", 2021, 160.0) }).await.unwrap();

        let speed = repository.get_average_speed_by_brand("Toyota").await.unwrap();
        assert!((speed - 180.0).abs() < f64::EPSILON);

        let capacity = repository.get_average_capacity_by_brand("Toyota").await.unwrap();
        assert!((capacity - 4.0).abs() < f64::EPSILON);

        assert_eq!(
            repository.get_average_speed_by_brand("Honda").await.unwrap_err(),
            VehicleError::VehiclesNotFound
        );
        assert_eq!(
            repository.get_average_capacity_by_brand("Honda").await.unwrap_err(),
            VehicleError::VehiclesNotFound
        );
    }

    #[tokio::test]
    async fn test_fuel_type_and_transmission_filters() {
        let repository = toyota_store().await;
        repository
            .add(Vehicle {
                fuel_type: "diesel".to_string(),
                transmission: "automatic".to_string(),
                ..vehicle(3, "Ford", "black", 2015, 170.0)
            })
            .await
            .unwrap();

        assert_eq!(repository.get_vehicles_by_fuel_type("gasoline").await.unwrap().len(), 2);
        assert_eq!(repository.get_vehicles_by_fuel_type("diesel").await.unwrap()[0].id, 3);
        assert!(repository.get_vehicles_by_fuel_type("electric").await.is_err());

        assert_eq!(repository.get_vehicles_by_transmission("automatic").await.unwrap()[0].id, 3);
        assert!(repository.get_vehicles_by_transmission("cvt").await.is_err());
    }

    #[tokio::test]
    async fn test_dimensions_and_weight_inclusive() {
        let repository = toyota_store().await;

        let found = repository.get_vehicles_by_dimensions(4.6, 4.6, 1.8, 1.8).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(repository.get_vehicles_by_dimensions(4.7, 5.0, 1.0, 2.0).await.is_err());

        let found = repository.get_vehicles_by_weight(1300.0, 1300.0).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(
            repository.get_vehicles_by_weight(1000.0, 1000.0).await.unwrap_err(),
            VehicleError::VehiclesNotFound
        );
    }

    #[tokio::test]
    async fn test_updates() {
        let repository = toyota_store().await;

        let returned = repository.update_max_speed_by_id(1, 220.0).await.unwrap();
        assert_eq!(returned.id, 1);
        assert_eq!(returned.max_speed, 220.0);

        let returned = repository.update_fuel_type_by_id(1, "hybrid").await.unwrap();
        assert_eq!(returned.max_speed, 220.0);
        assert_eq!(returned.fuel_type, "hybrid");

        let updated = repository.find_by_id(1).await.unwrap();
        assert_eq!(updated.max_speed, 220.0);
        assert_eq!(updated.fuel_type, "hybrid");

        assert_eq!(repository.update_max_speed_by_id(99, 100.0).await.unwrap_err(), VehicleError::NotFound(99));
        assert_eq!(repository.update_fuel_type_by_id(99, "diesel").await.unwrap_err(), VehicleError::NotFound(99));
    }

    #[tokio::test]
    async fn test_concurrent_updates_return_own_write() {
        let repository = std::sync::Arc::new(toyota_store().await);

        let handles: Vec<_> = (1..=50)
            .map(|i| {
                let repository = repository.clone();
                let speed = 100.0 + i as f64;
                tokio::spawn(async move {
                    let returned = repository.update_max_speed_by_id(1, speed).await.unwrap();
                    (speed, returned.max_speed)
                })
            })
            .collect();

        for handle in handles {
            let (written, returned) = handle.await.unwrap();
            assert_eq!(written, returned);
        }
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repository = toyota_store().await;

        repository.delete_by_id(1).await.unwrap();
        assert_eq!(repository.delete_by_id(1).await.unwrap_err(), VehicleError::NotFound(1));
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let repository = InMemoryVehicleRepository::new();

        assert!(repository.find_all().await.is_empty());
        assert!(repository.search_by_color_and_year("red", 2020).await.is_err());
        assert!(repository.search_by_brand("Toyota", 0, 3000).await.is_err());
        assert!(repository.get_vehicles_by_fuel_type("gasoline").await.is_err());
        assert!(repository.get_vehicles_by_transmission("manual").await.is_err());
        assert!(repository.get_vehicles_by_dimensions(0.0, 100.0, 0.0, 100.0).await.is_err());
        assert!(repository.get_vehicles_by_weight(0.0, 10_000.0).await.is_err());
        assert!(repository.get_average_speed_by_brand("Toyota").await.is_err());
    }

    #[tokio::test]
    async fn test_find_all_returns_copy() {
        let repository = toyota_store().await;
        let mut snapshot = repository.find_all().await;
        snapshot.remove(&1);

        assert_eq!(repository.count().await, 2);
    }
}
