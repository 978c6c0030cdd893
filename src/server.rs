//! 服务组装与启动

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{http::HeaderValue, middleware, Router};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    app::product::{
        self, handler::AppState, InMemoryProductRepository, ProductRepository, ProductService,
    },
    core::middleware::request_logging_middleware,
    infrastructure::config::{Config, DatabaseConfig, HttpConfig},
};

/// 根据配置选择存储：配置了数据库连接串时使用 Postgres，否则使用内存存储
pub async fn build_repository(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match &config.url {
        #[cfg(feature = "database")]
        Some(url) => {
            use crate::{
                app::product::repository::PgProductRepository,
                infrastructure::database::DatabaseManager,
            };

            let manager = DatabaseManager::new(url, config)
                .await
                .context("无法连接数据库")?;
            manager.ensure_schema().await.context("建表失败")?;
            Ok(Arc::new(PgProductRepository::new(manager.into_pool())))
        }
        #[cfg(not(feature = "database"))]
        Some(_) => anyhow::bail!("配置了 database.url，但编译时未启用 database 特性"),
        None => {
            warn!("未配置数据库，使用内存存储，重启后数据会丢失");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("忽略无效的跨域来源: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 组装路由与中间件
pub fn build_router(service: ProductService, http: &HttpConfig) -> Router {
    let state = AppState {
        product_service: service,
    };

    let router = product::routes().layer(middleware::from_fn(request_logging_middleware));
    let router = if http.timeout_seconds > 0 {
        router.layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
    } else {
        router
    };

    router
        .layer(cors_layer(&http.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动服务，直到收到退出信号
pub async fn run(config: Config) -> anyhow::Result<()> {
    let repository = build_repository(&config.database).await?;
    let app = build_router(ProductService::new(repository), &config.http);

    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("无法绑定到 {}", address))?;

    info!("🚀 产品服务运行在 http://{}", listener.local_addr()?);
    info!("   GET    /api/products       - 产品列表");
    info!("   POST   /api/products       - 创建产品");
    info!("   GET    /api/products/:id   - 获取产品");
    info!("   PUT    /api/products/:id   - 更新产品");
    info!("   DELETE /api/products/:id   - 删除产品");
    info!("   GET    /health             - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("收到 Ctrl+C，准备退出");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("收到终止信号，准备退出");
            }
            Err(e) => {
                warn!("无法监听终止信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
