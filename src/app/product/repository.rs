//! 产品存储
//!
//! 每个操作都只涉及单行，依赖存储自身的单语句原子性。

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

use super::model::{Product, ProductInput};
use crate::core::error::CoreError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 全部产品，按 id 升序
    async fn list(&self) -> Result<Vec<Product>, CoreError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, CoreError>;

    /// 插入并返回分配了 id 的记录
    async fn insert(&self, input: &ProductInput) -> Result<Product, CoreError>;

    /// 覆盖已有记录，不存在时返回 `None`
    async fn update(&self, id: i64, input: &ProductInput) -> Result<Option<Product>, CoreError>;

    /// 删除记录，返回是否确实删除了一行
    async fn delete(&self, id: i64) -> Result<bool, CoreError>;

    /// 探测存储是否可用
    async fn ping(&self) -> Result<(), CoreError>;

    /// 存储类型名称，用于健康检查
    fn kind(&self) -> &'static str;
}

#[derive(Default)]
struct MemoryTable {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// 内存存储，id 单调递增且不复用
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<MemoryTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<std::sync::MutexGuard<'_, MemoryTable>, CoreError> {
        self.table
            .lock()
            .map_err(|_| CoreError::InternalServerError("product table lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.table()?.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, CoreError> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &ProductInput) -> Result<Product, CoreError> {
        let mut table = self.table()?;
        table.last_id += 1;
        let product = Product {
            id: table.last_id,
            name: input.name.clone(),
            price: input.price,
        };
        table.rows.insert(product.id, product.clone());
        debug!("内存表插入产品 {}", product.id);
        Ok(product)
    }

    async fn update(&self, id: i64, input: &ProductInput) -> Result<Option<Product>, CoreError> {
        let mut table = self.table()?;
        Ok(table.rows.get_mut(&id).map(|product| {
            product.name = input.name.clone();
            product.price = input.price;
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, CoreError> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.table().map(|_| ())
    }

    fn kind(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(feature = "database")]
pub use postgres::PgProductRepository;

#[cfg(feature = "database")]
mod postgres {
    use async_trait::async_trait;
    use sqlx::PgPool;
    use tracing::debug;

    use super::ProductRepository;
    use crate::app::product::model::{Product, ProductInput};
    use crate::core::error::CoreError;

    pub struct PgProductRepository {
        pool: PgPool,
    }

    impl PgProductRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl ProductRepository for PgProductRepository {
        async fn list(&self) -> Result<Vec<Product>, CoreError> {
            let products =
                sqlx::query_as::<_, Product>("SELECT id, name, price FROM products ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?;
            Ok(products)
        }

        async fn find(&self, id: i64) -> Result<Option<Product>, CoreError> {
            let product =
                sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(product)
        }

        async fn insert(&self, input: &ProductInput) -> Result<Product, CoreError> {
            debug!("Inserting product: {}", input.name);

            let product = sqlx::query_as::<_, Product>(
                "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price",
            )
            .bind(&input.name)
            .bind(input.price)
            .fetch_one(&self.pool)
            .await?;
            Ok(product)
        }

        async fn update(
            &self,
            id: i64,
            input: &ProductInput,
        ) -> Result<Option<Product>, CoreError> {
            debug!("Updating product: {}", id);

            let product = sqlx::query_as::<_, Product>(
                r#"
                UPDATE products SET name = $1, price = $2
                WHERE id = $3
                RETURNING id, name, price
                "#,
            )
            .bind(&input.name)
            .bind(input.price)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(product)
        }

        async fn delete(&self, id: i64) -> Result<bool, CoreError> {
            debug!("Deleting product: {}", id);

            let result = sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        }

        async fn ping(&self) -> Result<(), CoreError> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }

        fn kind(&self) -> &'static str {
            "postgres"
        }
    }
}
