//! 产品表格渲染

use super::state::{EditMode, UiState};

const NAME_WIDTH: usize = 24;
const PRICE_WIDTH: usize = 12;

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

pub fn format_price(price: f64) -> String {
    format!("₹{}", price)
}

/// 把当前状态渲染成纯文本表格
pub fn render(state: &UiState) -> String {
    let mut lines = vec![
        "Manage Products".to_string(),
        format!(
            "New product: name={:?} price={:?}",
            state.draft.name, state.draft.price
        ),
        String::new(),
        format!(
            "{} | {} | Actions",
            pad("Name", NAME_WIDTH),
            pad("Price", PRICE_WIDTH)
        ),
        format!(
            "{}-+-{}-+-{}",
            "-".repeat(NAME_WIDTH),
            "-".repeat(PRICE_WIDTH),
            "-".repeat(16)
        ),
    ];

    if state.products.is_empty() {
        lines.push("No products found.".to_string());
    }

    lines.extend(state.products.iter().map(|product| match &state.edit {
        EditMode::Editing { id, draft } if *id == product.id => format!(
            "{} | {} | save / cancel [editing]",
            pad(&draft.name, NAME_WIDTH),
            pad(&draft.price, PRICE_WIDTH)
        ),
        _ => format!(
            "{} | {} | edit {id} / delete {id}",
            pad(&product.name, NAME_WIDTH),
            pad(&format_price(product.price), PRICE_WIDTH),
            id = product.id
        ),
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
