use attendance_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::auth,
    routes, AppState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login));

    let account_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/auth/profile", put(routes::auth::update_profile))
        .layer(axum::middleware::from_fn(auth::require_auth));

    let employee_api = Router::new()
        .route("/api/attendance/checkin", post(routes::attendance::check_in))
        .route(
            "/api/attendance/checkout",
            post(routes::attendance::check_out),
        )
        .route(
            "/api/attendance/my-history",
            get(routes::attendance::my_history),
        )
        .route(
            "/api/attendance/my-summary",
            get(routes::attendance::my_summary),
        )
        .route("/api/attendance/today", get(routes::attendance::today))
        .route(
            "/api/dashboard/employee",
            get(routes::dashboard::employee_dashboard),
        )
        .layer(axum::middleware::from_fn(auth::require_employee));

    let manager_api = Router::new()
        .route("/api/auth/users", get(routes::auth::list_users))
        .route(
            "/api/attendance/all",
            get(routes::attendance::all_attendance),
        )
        .route(
            "/api/attendance/employee/:id",
            get(routes::attendance::employee_attendance),
        )
        .route(
            "/api/attendance/summary",
            get(routes::attendance::team_summary),
        )
        .route("/api/attendance/export", get(routes::attendance::export))
        .route(
            "/api/attendance/today-status",
            get(routes::attendance::today_status),
        )
        .route(
            "/api/dashboard/manager",
            get(routes::dashboard::manager_dashboard),
        )
        .layer(axum::middleware::from_fn(auth::require_manager));

    let app = public_api
        .merge(account_api)
        .merge(employee_api)
        .merge(manager_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
