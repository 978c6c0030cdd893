//! 前端状态
//!
//! 状态只描述界面，不做任何 I/O。每个用户动作对应一次转换：
//! 消费旧状态，返回新状态。

use crate::app::product::{Product, ProductInput};

/// 表单原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please enter a valid product name.")]
    InvalidName,
    #[error("Please enter a valid product price.")]
    InvalidPrice,
}

impl Draft {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// 从已有产品复制可编辑字段
    pub fn from_product(product: &Product) -> Self {
        Self::new(product.name.clone(), product.price.to_string())
    }

    pub fn with_field(mut self, field: DraftField, value: impl Into<String>) -> Self {
        match field {
            DraftField::Name => self.name = value.into(),
            DraftField::Price => self.price = value.into(),
        }
        self
    }

    /// 发送前的本地校验，先查名称再查价格
    pub fn validate(&self) -> Result<ProductInput, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::InvalidName);
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| DraftError::InvalidPrice)?;
        if !price.is_finite() || price <= 0.0 {
            return Err(DraftError::InvalidPrice);
        }
        Ok(ProductInput::new(self.name.clone(), price))
    }
}

/// 同一时刻最多编辑一个产品
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditMode {
    #[default]
    NoEdit,
    Editing { id: i64, draft: Draft },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// 服务端列表的本地副本，可随时丢弃重拉
    pub products: Vec<Product>,
    /// 新建表单
    pub draft: Draft,
    pub edit: EditMode,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用最新列表替换缓存
    pub fn loaded(self, products: Vec<Product>) -> Self {
        Self { products, ..self }
    }

    pub fn draft_changed(self, field: DraftField, value: impl Into<String>) -> Self {
        Self {
            draft: self.draft.with_field(field, value),
            ..self
        }
    }

    pub fn draft_cleared(self) -> Self {
        Self {
            draft: Draft::default(),
            ..self
        }
    }

    /// 进入编辑，之前未保存的编辑直接丢弃
    pub fn begin_edit(self, product: &Product) -> Self {
        Self {
            edit: EditMode::Editing {
                id: product.id,
                draft: Draft::from_product(product),
            },
            ..self
        }
    }

    /// 未处于编辑状态时保持不变
    pub fn edit_changed(self, field: DraftField, value: impl Into<String>) -> Self {
        match self.edit {
            EditMode::Editing { id, draft } => Self {
                edit: EditMode::Editing {
                    id,
                    draft: draft.with_field(field, value),
                },
                ..self
            },
            EditMode::NoEdit => self,
        }
    }

    pub fn cancel_edit(self) -> Self {
        self.edit_closed()
    }

    /// 保存成功后退出编辑
    pub fn edit_closed(self) -> Self {
        Self {
            edit: EditMode::NoEdit,
            ..self
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        match &self.edit {
            EditMode::Editing { id, .. } => Some(*id),
            EditMode::NoEdit => None,
        }
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert_eq!(
            Draft::new("Pen", "10").validate(),
            Ok(ProductInput::new("Pen", 10.0))
        );
        assert_eq!(
            Draft::new(" Pen ", " 2.5 ").validate(),
            Ok(ProductInput::new(" Pen ", 2.5))
        );
        assert_eq!(Draft::new("  ", "10").validate(), Err(DraftError::InvalidName));
        assert_eq!(Draft::new("", "").validate(), Err(DraftError::InvalidName));
        for price in ["", "abc", "0", "-3", "NaN", "inf"] {
            assert_eq!(
                Draft::new("Pen", price).validate(),
                Err(DraftError::InvalidPrice),
                "price {:?}",
                price
            );
        }
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(
            DraftError::InvalidName.to_string(),
            "Please enter a valid product name."
        );
        assert_eq!(
            DraftError::InvalidPrice.to_string(),
            "Please enter a valid product price."
        );
    }

    #[test]
    fn test_draft_changes_and_clear() {
        let state = UiState::new()
            .draft_changed(DraftField::Name, "Pen")
            .draft_changed(DraftField::Price, "10");
        assert_eq!(state.draft, Draft::new("Pen", "10"));

        let state = state.draft_cleared();
        assert_eq!(state.draft, Draft::default());
    }

    #[test]
    fn test_begin_edit_replaces_previous_edit() {
        let pen = product(1, "Pen", 10.0);
        let ink = product(2, "Ink", 3.5);
        let state = UiState::new()
            .loaded(vec![pen.clone(), ink.clone()])
            .begin_edit(&pen)
            .edit_changed(DraftField::Price, "99")
            .begin_edit(&ink);

        assert_eq!(
            state.edit,
            EditMode::Editing {
                id: 2,
                draft: Draft::new("Ink", "3.5"),
            }
        );
    }

    #[test]
    fn test_edit_changes_do_not_touch_cache() {
        let pen = product(1, "Pen", 10.0);
        let state = UiState::new()
            .loaded(vec![pen.clone()])
            .begin_edit(&pen)
            .edit_changed(DraftField::Name, "Marker");

        assert_eq!(state.products, vec![pen]);
        assert_eq!(state.editing_id(), Some(1));

        let state = state.cancel_edit();
        assert_eq!(state.edit, EditMode::NoEdit);
        assert_eq!(state.editing_id(), None);
    }

    #[test]
    fn test_edit_change_without_edit_is_noop() {
        let state = UiState::new().edit_changed(DraftField::Name, "Pen");
        assert_eq!(state, UiState::new());
    }

    #[test]
    fn test_loaded_keeps_drafts() {
        let pen = product(1, "Pen", 10.0);
        let state = UiState::new()
            .draft_changed(DraftField::Name, "Ink")
            .loaded(vec![pen.clone()])
            .begin_edit(&pen)
            .loaded(vec![]);
        assert_eq!(state.draft.name, "Ink");
        assert_eq!(state.editing_id(), Some(1));
        assert!(state.find(1).is_none());
    }
}
