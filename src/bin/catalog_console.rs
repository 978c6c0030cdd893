//! 产品管理终端前端
//!
//! 逐行读取命令，调用产品接口后重新渲染表格。

use product_catalog::{
    client::{
        console::{execute, parse_command, Command, HELP},
        render::render,
        HttpProductApi, Outcome, ProductUi,
    },
    infrastructure::{config::load_config, logger::init_logging},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _guard = init_logging(&config.logging)?;

    let api = HttpProductApi::new(config.client.api_base_url.clone());
    info!("产品接口: {}", api.base_url());

    let mut ui = ProductUi::new(api);
    ui.load().await;
    println!("{}", render(ui.state()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            command => match execute(&mut ui, command).await {
                Outcome::Alert(alert) => println!("! {}", alert),
                Outcome::Failed => println!("Request failed, see log for details."),
                Outcome::Ignored => println!("Nothing to do."),
                Outcome::Applied => {}
            },
        }

        println!("{}", render(ui.state()));
    }

    Ok(())
}
