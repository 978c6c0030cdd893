//! 产品业务服务

use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::model::{Product, ProductInput};
use super::repository::ProductRepository;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn storage_kind(&self) -> &'static str {
        self.repository.kind()
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.repository.list().await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, CoreError> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| CoreError::product_not_found(id))
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, CoreError> {
        input.validate()?;

        let product = self.repository.insert(&input.normalized()).await?;
        info!("创建产品: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, input: ProductInput) -> Result<Product, CoreError> {
        input.validate()?;

        let product = self
            .repository
            .update(id, &input.normalized())
            .await?
            .ok_or_else(|| CoreError::product_not_found(id))?;
        info!("更新产品: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        if !self.repository.delete(id).await? {
            return Err(CoreError::product_not_found(id));
        }
        info!("删除产品: {}", id);
        Ok(())
    }

    /// 探测存储是否可用
    pub async fn check_storage(&self) -> Result<(), CoreError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::repository::InMemoryProductRepository;
    use async_trait::async_trait;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    /// 所有操作都失败的存储
    struct OfflineRepository;

    fn offline() -> CoreError {
        CoreError::Database("connection refused".to_string())
    }

    #[async_trait]
    impl ProductRepository for OfflineRepository {
        async fn list(&self) -> Result<Vec<Product>, CoreError> {
            Err(offline())
        }

        async fn find(&self, _id: i64) -> Result<Option<Product>, CoreError> {
            Err(offline())
        }

        async fn insert(&self, _input: &ProductInput) -> Result<Product, CoreError> {
            Err(offline())
        }

        async fn update(
            &self,
            _id: i64,
            _input: &ProductInput,
        ) -> Result<Option<Product>, CoreError> {
            Err(offline())
        }

        async fn delete(&self, _id: i64) -> Result<bool, CoreError> {
            Err(offline())
        }

        async fn ping(&self) -> Result<(), CoreError> {
            Err(offline())
        }

        fn kind(&self) -> &'static str {
            "offline"
        }
    }

    #[tokio::test]
    async fn test_check_storage() {
        service().check_storage().await.unwrap();

        let service = ProductService::new(Arc::new(OfflineRepository));
        assert!(matches!(
            service.check_storage().await,
            Err(CoreError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_trims() {
        let service = service();
        let product = service
            .create_product(ProductInput::new("  Pen ", 10.0))
            .await
            .unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Pen");
        assert_eq!(service.list_products().await.unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn test_invalid_create_leaves_collection_unchanged() {
        let service = service();
        service
            .create_product(ProductInput::new("Pen", 10.0))
            .await
            .unwrap();

        for input in [ProductInput::new("", 5.0), ProductInput::new("Ink", 0.0)] {
            let err = service.create_product(input).await.unwrap_err();
            assert!(matches!(err, CoreError::BadRequest(_)));
        }
        assert_eq!(service.list_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let service = service();
        let err = service
            .update_product(99, ProductInput::new("", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));

        let err = service
            .update_product(99, ProductInput::new("Pen", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let pen = service
            .create_product(ProductInput::new("Pen", 10.0))
            .await
            .unwrap();

        service.delete_product(pen.id).await.unwrap();
        assert!(matches!(
            service.delete_product(pen.id).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(service.list_products().await.unwrap().is_empty());
    }
}
