//! 前端控制器
//!
//! 把用户动作转换成接口调用和状态转换。变更成功后总是整体重拉列表，
//! 不把接口返回值合并进缓存。所有接口错误都在这里记录并吞掉。

use tracing::{error, info};

use super::api::ProductApi;
use super::state::{DraftError, DraftField, EditMode, UiState};

/// 一次用户动作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// 本地校验失败，需要阻塞式提示，请求未发出
    Alert(DraftError),
    /// 请求失败，已记录日志，状态保持不变
    Failed,
    /// 当前状态下动作不适用
    Ignored,
}

pub struct ProductUi<A: ProductApi> {
    api: A,
    state: UiState,
}

impl<A: ProductApi> ProductUi<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UiState::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn transition(&mut self, f: impl FnOnce(UiState) -> UiState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    /// 首次加载，失败时缓存保持为空
    pub async fn load(&mut self) -> Outcome {
        self.refresh().await
    }

    /// 重拉列表，失败时保留旧缓存
    pub async fn refresh(&mut self) -> Outcome {
        match self.api.list().await {
            Ok(products) => {
                self.transition(|state| state.loaded(products));
                Outcome::Applied
            }
            Err(e) => {
                error!("Error fetching products: {}", e);
                Outcome::Failed
            }
        }
    }

    pub fn change_draft(&mut self, field: DraftField, value: impl Into<String>) -> Outcome {
        self.transition(|state| state.draft_changed(field, value));
        Outcome::Applied
    }

    pub async fn submit_create(&mut self) -> Outcome {
        let input = match self.state.draft.validate() {
            Ok(input) => input,
            Err(alert) => return Outcome::Alert(alert),
        };

        match self.api.create(&input).await {
            Ok(product) => {
                info!("created product {}", product.id);
                self.transition(UiState::draft_cleared);
                self.refresh().await;
                Outcome::Applied
            }
            Err(e) => {
                error!("Error creating product: {}", e);
                Outcome::Failed
            }
        }
    }

    /// 只能编辑当前列表里的产品
    pub fn begin_edit(&mut self, id: i64) -> Outcome {
        let Some(product) = self.state.find(id).cloned() else {
            return Outcome::Ignored;
        };
        self.transition(|state| state.begin_edit(&product));
        Outcome::Applied
    }

    pub fn change_edit(&mut self, field: DraftField, value: impl Into<String>) -> Outcome {
        if self.state.editing_id().is_none() {
            return Outcome::Ignored;
        }
        self.transition(|state| state.edit_changed(field, value));
        Outcome::Applied
    }

    pub async fn save_edit(&mut self) -> Outcome {
        let EditMode::Editing { id, draft } = &self.state.edit else {
            return Outcome::Ignored;
        };
        let id = *id;
        let input = match draft.validate() {
            Ok(input) => input,
            Err(alert) => return Outcome::Alert(alert),
        };

        match self.api.update(id, &input).await {
            Ok(_) => {
                self.transition(UiState::edit_closed);
                self.refresh().await;
                Outcome::Applied
            }
            Err(e) => {
                error!("Error updating product: {}", e);
                Outcome::Failed
            }
        }
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        if self.state.editing_id().is_none() {
            return Outcome::Ignored;
        }
        self.transition(UiState::cancel_edit);
        Outcome::Applied
    }

    pub async fn delete(&mut self, id: i64) -> Outcome {
        match self.api.delete(id).await {
            Ok(()) => {
                self.refresh().await;
                Outcome::Applied
            }
            Err(e) => {
                error!("Error deleting product: {}", e);
                Outcome::Failed
            }
        }
    }
}
