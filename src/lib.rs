pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{attendance_service::AttendanceService, user_service::UserService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub attendance_service: AttendanceService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let attendance_service = AttendanceService::new(pool.clone());

        Self {
            pool,
            user_service,
            attendance_service,
        }
    }
}
