use product_catalog::infrastructure::{config::load_config, logger::init_logging};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _guard = init_logging(&config.logging)?;

    info!("启动产品服务...");

    if let Err(e) = product_catalog::server::run(config).await {
        error!("服务异常退出: {:#}", e);
        return Err(e);
    }
    Ok(())
}
