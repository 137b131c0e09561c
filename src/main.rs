mod extractors;
mod middleware;
mod routes;
mod structs;
mod utils;

use std::error::Error;
use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use hyper::header::HeaderValue;
use hyper::http::Method;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use middleware::logger_middleware::logger_middleware;
use routes::genres_list_route::genres_list_route;
use routes::robot_route::robot_route;
use structs::robot::{Robot, RobotFather};
use utils::catalog::GenreCatalog;
use utils::config::ApplicationConfiguration;

pub struct AppState {
    config: ApplicationConfiguration,
    catalog: GenreCatalog,
    robot_father: RobotFather,
}

fn app(app_state: AppState) -> Result<Router, Box<dyn Error>> {
    let allowed_origin = app_state.config.allowed_origin.clone();

    let mut router = Router::new()
        .route("/genres/list", get(genres_list_route))
        .route("/robot", get(robot_route))
        .layer(axum_middleware::from_fn(logger_middleware));

    if let Some(origin) = allowed_origin {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET])
            .allow_origin(origin.parse::<HeaderValue>()?);
        router = router.layer(cors);
    }

    Ok(router.with_state(Arc::new(app_state)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApplicationConfiguration::from_env()?;
    let bind_address = config.bind_address;

    // One robot father for the whole process, handed to every request through the state
    let robot_father = RobotFather::new(Arc::new(Robot::new()));
    info!(
        "Robot father holds robot {}",
        robot_father.child().serial_number()
    );

    let catalog = GenreCatalog::seeded();
    info!("Genre catalog seeded with {} genres", catalog.count());

    let router = app(AppState {
        config,
        catalog,
        robot_father,
    })?;

    info!("Listening on {bind_address}");
    axum::Server::bind(&bind_address)
        .serve(router.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
