//! 产品管理前端：接口客户端、界面状态、控制器与终端渲染

pub mod api;
pub mod console;
pub mod controller;
pub mod render;
pub mod state;

pub use api::{ClientError, HttpProductApi, ProductApi};
pub use controller::{Outcome, ProductUi};
pub use state::{Draft, DraftError, DraftField, EditMode, UiState};
