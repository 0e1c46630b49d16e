#[macro_use]
extern crate diesel;

mod appointment;
mod auth;
mod dashboard;
mod database;
mod doctor;
mod models;
mod nav;
mod protocol;
mod query;
mod room;
mod schema;
mod session;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let conn_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not found");
    let manager = ConnectionManager::<MysqlConnection>::new(conn_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET not found");
    let keys = web::Data::new(session::Keys { jwt_secret });

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .data(pool.clone())
            .app_data(keys.clone())
            .service(
                web::scope("/auth")
                    .configure(auth::config),
            )
            .service(
                web::scope("/appointment")
                    .configure(appointment::config),
            )
            .service(
                web::scope("/doctor")
                    .configure(doctor::config),
            )
            .service(
                web::scope("/room")
                    .configure(room::config),
            )
            .service(
                web::scope("/dashboard")
                    .configure(dashboard::config),
            )
    })
    .bind(bind)?
    .run()
    .await
}
