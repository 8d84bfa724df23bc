pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post, put},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    // Функция для форматирования чисел с разделителями триад
    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        for (i, ch) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push('.');
            }
            result.push(ch);
        }
        result.chars().rev().collect()
    }

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        use axum::body::to_bytes;
        use chrono::Utc;

        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();

        // Читаем тело ответа, чтобы узнать реальный размер
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => {
                let duration = start.elapsed();
                println!(
                    "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                    Utc::now().format("%H:%M:%S"),
                    duration.as_millis(),
                    "error",
                    parts.status.as_u16(),
                    method,
                    uri.path()
                );
                return Response::from_parts(parts, Body::default());
            }
        };

        let size = bytes.len();
        let duration = start.elapsed();

        // Голубой для 200, коричневый для остальных
        let color_code = if parts.status.as_u16() == 200 {
            "36"
        } else {
            "33"
        };

        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color_code,
            Utc::now().format("%H:%M:%S"),
            duration.as_millis(),
            format!("{}", format_number(size)),
            parts.status.as_u16(),
            method,
            uri.path()
        );

        Response::from_parts(parts, Body::from(bytes))
    }

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;

    shared::data::db::initialize_database(&db_path.to_string_lossy())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Auth tables and bootstrap admin account
    system::initialization::ensure_auth_tables().await?;
    system::initialization::ensure_admin_profile_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/signup",
            post(system::handlers::auth::signup),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System profiles management (admin only)
        .route(
            "/api/system/profiles",
            get(system::handlers::profiles::list)
                .post(system::handlers::profiles::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/profiles/rep-stats",
            get(system::handlers::profiles::rep_stats)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/profiles/:id",
            get(system::handlers::profiles::get_by_id)
                .put(system::handlers::profiles::update)
                .delete(system::handlers::profiles::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/profiles/:id/change-password",
            post(system::handlers::profiles::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // CLIENT ROUTES
        // ========================================
        .route(
            "/api/client/import-template",
            get(handlers::a001_client::import_template),
        )
        .route(
            "/api/client/my",
            get(handlers::a001_client::list_my)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/client",
            get(handlers::a001_client::list_all)
                .post(handlers::a001_client::upsert)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/client/import-csv",
            post(handlers::a001_client::import_csv)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/client/:id",
            get(handlers::a001_client::get_by_id)
                .delete(handlers::a001_client::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // ========================================
        // CALL ROUTES
        // ========================================
        .route(
            "/api/call/today",
            get(handlers::a002_call::today)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/call/my",
            get(handlers::a002_call::list_my)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/call/previous/:client_id",
            get(handlers::a002_call::previous_visit)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/call/visit",
            post(handlers::a002_call::log_adhoc_visit)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/call/:id/log",
            put(handlers::a002_call::log_visit)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/call",
            post(handlers::a002_call::schedule)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // ========================================
        // PRODUCT ROUTES
        // ========================================
        .route(
            "/api/product",
            get(handlers::a003_product::list_all)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/product",
            post(handlers::a003_product::upsert)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/product/testdata",
            post(handlers::a003_product::insert_test_data)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/product/:id",
            get(handlers::a003_product::get_by_id)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // ORDER ROUTES
        // ========================================
        .route(
            "/api/order",
            post(handlers::a004_order::submit)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/order/my",
            get(handlers::a004_order::list_my)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/order/:id",
            get(handlers::a004_order::get_by_id)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // DASHBOARD (ADMIN)
        // ========================================
        .route(
            "/api/dashboard/summary",
            get(handlers::d400_admin_summary::get_summary)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server address: {e}"))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
