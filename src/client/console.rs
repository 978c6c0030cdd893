//! 终端命令解析与执行

use super::api::ProductApi;
use super::controller::{Outcome, ProductUi};
use super::state::DraftField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    DraftName(String),
    DraftPrice(String),
    Add,
    Edit(i64),
    Set(DraftField, String),
    Save,
    Cancel,
    Delete(i64),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                 reload products
  name <text>          set new product name
  price <text>         set new product price
  add                  create product from the form
  edit <id>            start editing a product
  set name <text>      change name of the product being edited
  set price <text>     change price of the product being edited
  save                 save the product being edited
  cancel               discard the edit
  delete <id>          delete a product
  help                 show this help
  quit                 exit";

fn parse_id(arg: &str) -> Result<i64, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("invalid product id: {:?}", arg.trim()))
}

fn parse_field(arg: &str) -> Result<DraftField, String> {
    match arg {
        "name" => Ok(DraftField::Name),
        "price" => Ok(DraftField::Price),
        other => Err(format!("unknown field: {:?}", other)),
    }
}

/// 解析一行输入；字段值保留原样（包括空白），方便验证空名称
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };

    match word {
        "list" | "ls" => Ok(Command::List),
        "name" => Ok(Command::DraftName(rest.to_string())),
        "price" => Ok(Command::DraftPrice(rest.to_string())),
        "add" => Ok(Command::Add),
        "edit" => parse_id(rest).map(Command::Edit),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(Command::Set(parse_field(field.trim_end())?, value.to_string()))
        }
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => parse_id(rest).map(Command::Delete),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command: {:?}", other)),
    }
}

/// 执行一条命令；`Help` 和 `Quit` 由调用方处理
pub async fn execute<A: ProductApi>(ui: &mut ProductUi<A>, command: Command) -> Outcome {
    match command {
        Command::List => ui.refresh().await,
        Command::DraftName(value) => ui.change_draft(DraftField::Name, value),
        Command::DraftPrice(value) => ui.change_draft(DraftField::Price, value),
        Command::Add => ui.submit_create().await,
        Command::Edit(id) => ui.begin_edit(id),
        Command::Set(field, value) => ui.change_edit(field, value),
        Command::Save => ui.save_edit().await,
        Command::Cancel => ui.cancel_edit(),
        Command::Delete(id) => ui.delete(id).await,
        Command::Help | Command::Quit => Outcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("list"), Ok(Command::List));
        assert_eq!(parse_command("  add  "), Ok(Command::Add));
        assert_eq!(parse_command("save"), Ok(Command::Save));
        assert_eq!(parse_command("cancel"), Ok(Command::Cancel));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("?"), Ok(Command::Help));
    }

    #[test]
    fn test_parse_draft_fields() {
        assert_eq!(
            parse_command("name Fountain Pen"),
            Ok(Command::DraftName("Fountain Pen".to_string()))
        );
        assert_eq!(parse_command("name"), Ok(Command::DraftName(String::new())));
        assert_eq!(
            parse_command("price 12.5"),
            Ok(Command::DraftPrice("12.5".to_string()))
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_command("edit 3"), Ok(Command::Edit(3)));
        assert_eq!(parse_command("delete 7"), Ok(Command::Delete(7)));
        assert!(parse_command("delete seven").is_err());
        assert!(parse_command("edit").is_err());
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_command("set name Blue Ink"),
            Ok(Command::Set(DraftField::Name, "Blue Ink".to_string()))
        );
        assert_eq!(
            parse_command("set price 15"),
            Ok(Command::Set(DraftField::Price, "15".to_string()))
        );
        assert!(parse_command("set colour red").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_command("").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
