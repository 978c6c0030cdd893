//! 产品数据模型

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// 创建 / 更新请求体，`id` 始终由服务端分配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: f64,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// 入库前去掉名称首尾空白
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            price: self.price,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("Name must not be empty"));
        return Err(error);
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Borrowed("Price must be greater than 0"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        assert!(ProductInput::new("Pen", 10.0).validate().is_ok());
        assert!(ProductInput::new(" Pen ", 0.01).validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = ProductInput::new("   ", 5.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for price in [0.0, -1.0, f64::NAN] {
            let errors = ProductInput::new("Pen", price).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("price"), "price {}", price);
        }
    }

    #[test]
    fn test_both_fields_reported() {
        let errors = ProductInput::new("", -2.5).validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(
            fields["name"][0].message.as_deref(),
            Some("Name must not be empty")
        );
        assert_eq!(
            fields["price"][0].message.as_deref(),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn test_normalized_trims_name() {
        let input = ProductInput::new("  Pen\t", 10.0).normalized();
        assert_eq!(input.name, "Pen");
        assert_eq!(input.price, 10.0);
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: 1,
            name: "Pen".to_string(),
            price: 10.0,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value, serde_json::json!({"id": 1, "name": "Pen", "price": 10.0}));
    }
}
