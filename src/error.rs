use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// A strategy that cannot be projected meaningfully. The engine itself never
/// rejects input; these are raised where strategies enter the program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("{field} must be between 0 and {max}, got {value}")]
    AgeOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("goal age {goal_age} must be greater than current age {current_age}")]
    GoalAgeNotAfterCurrent { current_age: u32, goal_age: u32 },
    #[error("{field} must be a non-negative number, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 100 percent, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("unknown fund '{0}'")]
    UnknownFund(String),
    #[error("goal must be greater than 0, got {0}")]
    NonPositiveGoal(f64),
    #[error("life event '{name}' at age {age} is outside ages {current_age}..={goal_age}")]
    LifeEventOutsideHorizon {
        name: String,
        age: u32,
        current_age: u32,
        goal_age: u32,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid strategy: {0}")]
    InvalidStrategy(#[from] StrategyError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidStrategy(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        let mut response = (status, body).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}
