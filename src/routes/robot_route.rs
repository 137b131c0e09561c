use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct RobotResponse {
    pub serial_number: String,
}

pub async fn robot_route(State(app_state): State<Arc<AppState>>) -> Json<RobotResponse> {
    let robot = app_state.robot_father.child();

    Json(RobotResponse {
        serial_number: robot.serial_number().to_string(),
    })
}
