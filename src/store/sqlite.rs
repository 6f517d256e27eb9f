use crate::models::{Device, DeviceId, NewDevice, Timestamp};
use crate::store::DeviceStore;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDeviceStore {
    pool: SqlitePool,
}

impl SqliteDeviceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for SqliteDeviceStore {
    async fn create(&self, device: NewDevice) -> anyhow::Result<Device> {
        let record = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (name, brand, brand_folded, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, brand, created_at
            "#,
        )
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.brand.to_lowercase())
        .bind(Timestamp::now())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to insert device '{}'", device.name))?;
        Ok(record)
    }

    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>> {
        let record = sqlx::query_as::<_, Device>(
            "SELECT id, name, brand, created_at FROM devices WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to query device {id}"))?;
        Ok(record)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Device>> {
        let records = sqlx::query_as::<_, Device>(
            "SELECT id, name, brand, created_at FROM devices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list devices")?;
        Ok(records)
    }

    async fn exists_by_id(&self, id: DeviceId) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM devices WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to check existence of device {id}"))?;
        Ok(exists)
    }

    async fn update(&self, device: &Device) -> anyhow::Result<Option<Device>> {
        let record = sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices SET name = ?, brand = ?, brand_folded = ?
            WHERE id = ?
            RETURNING id, name, brand, created_at
            "#,
        )
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.brand.to_lowercase())
        .bind(device.id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to update device {}", device.id))?;
        Ok(record)
    }

    async fn delete_by_id(&self, id: DeviceId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete device {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_brand(&self, query: &str) -> anyhow::Result<Vec<Device>> {
        // sqlite lower() only folds ASCII, so folding happens here and in brand_folded.
        // instr() avoids escaping LIKE wildcards in user input
        let folded = query.to_lowercase();
        let records = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, name, brand, created_at FROM devices
            WHERE ?1 = '' OR instr(brand_folded, ?1) > 0
            ORDER BY id
            "#,
        )
        .bind(&folded)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to search devices by brand '{query}'"))?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Every `:memory:` connection is its own database, so the pool is pinned to one.
    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::server::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn new_device(name: &str, brand: &str) -> NewDevice {
        NewDevice {
            name: name.to_string(),
            brand: brand.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = SqliteDeviceStore::new(memory_pool().await);
        let first = store.create(new_device("Phone", "Apple")).await.unwrap();
        let second = store.create(new_device("TV", "Samsung")).await.unwrap();
        assert_eq!(first.id, DeviceId::from(1));
        assert_eq!(second.id, DeviceId::from(2));
        assert!(i64::from(first.created_at) > 0);
        assert_eq!(store.find_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let store = SqliteDeviceStore::new(memory_pool().await);
        let created = store.create(new_device("Phone", "Apple")).await.unwrap();
        let changed = Device {
            name: "Tablet".to_string(),
            brand: "Samsung".to_string(),
            created_at: Timestamp::from(0),
            ..created.clone()
        };
        let updated = store.update(&changed).await.unwrap().unwrap();
        assert_eq!(updated.name, "Tablet");
        assert_eq!(updated.brand, "Samsung");
        assert_eq!(updated.created_at, created.created_at);

        let missing = Device {
            id: DeviceId::from(99),
            ..changed
        };
        assert_eq!(store.update(&missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = SqliteDeviceStore::new(memory_pool().await);
        let created = store.create(new_device("Phone", "Apple")).await.unwrap();
        assert!(store.exists_by_id(created.id).await.unwrap());
        assert!(store.delete_by_id(created.id).await.unwrap());
        assert!(!store.exists_by_id(created.id).await.unwrap());
        assert!(!store.delete_by_id(created.id).await.unwrap());

        // AUTOINCREMENT never hands out a deleted id again
        let next = store.create(new_device("TV", "Samsung")).await.unwrap();
        assert_eq!(next.id, DeviceId::from(2));
    }

    #[tokio::test]
    async fn test_search_by_brand() {
        let store = SqliteDeviceStore::new(memory_pool().await);
        store.create(new_device("Phone", "Apple")).await.unwrap();
        store.create(new_device("TV", "Samsung")).await.unwrap();
        store.create(new_device("Watch", "samsung galaxy")).await.unwrap();
        store.create(new_device("Odd", "100%_pure")).await.unwrap();
        store.create(new_device("Camera", "Ölmann")).await.unwrap();

        let found = store.search_by_brand("SAMSUNG").await.unwrap();
        assert_eq!(
            found.iter().map(|it| it.name.as_str()).collect::<Vec<_>>(),
            vec!["TV", "Watch"]
        );
        assert_eq!(store.search_by_brand("").await.unwrap().len(), 5);
        assert_eq!(store.search_by_brand("%").await.unwrap().len(), 1);
        assert_eq!(store.search_by_brand("_").await.unwrap().len(), 1);
        assert!(store.search_by_brand("nokia").await.unwrap().is_empty());

        let found = store.search_by_brand("ölmann").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Camera");
        assert_eq!(store.search_by_brand("ÖLM").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_refolds_brand() {
        let store = SqliteDeviceStore::new(memory_pool().await);
        let created = store.create(new_device("Camera", "Apple")).await.unwrap();
        let changed = Device {
            brand: "ÉCLAIR".to_string(),
            ..created
        };
        store.update(&changed).await.unwrap().unwrap();
        assert!(store.search_by_brand("apple").await.unwrap().is_empty());
        assert_eq!(store.search_by_brand("éclair").await.unwrap().len(), 1);
    }
}
