//! # Admin Dashboard - نقطه ورود برنامه
//!
//! تنظیمات رو لود میکنه، دیتابیس تنظیمات کاربر رو آماده میکنه و
//! سرور HTTP رو بالا میاره.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use admin_dashboard::{api::create_router, config::Config, database::Database, error::Result};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات لود یا validate نشن
/// - دیتابیس متصل نشه
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> Result<()> {
    // اگه فایل .env نباشه اوکیه
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.environment.is_production());

    info!("🚀 Starting Admin Dashboard...");

    config.validate()?;
    info!(
        environment = ?config.environment,
        backend = %config.api_base_url,
        "✅ Configuration loaded successfully"
    );

    let database = Database::connect(&config.database_url).await?;
    database.migrate().await?;
    info!("✅ Preference store ready");

    let addr = config.server_addr();
    let app = create_router(database, config)?;

    let listener = TcpListener::bind(&addr).await?;
    info!("🌐 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// `RUST_LOG` اولویت داره؛ اگه نبود، default استفاده میشه.
/// در production لاگ‌ها JSON هستن.
fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("admin_dashboard=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .pretty(),
            )
            .init();
    }
}

/// صبر تا Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
