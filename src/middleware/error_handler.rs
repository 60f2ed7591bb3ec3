// Extractor error handlers.
//
// Malformed JSON bodies and query strings are turned into AppError so they
// leave the server in the same envelope as every other failure.

use actix_web::{error::JsonPayloadError, error::QueryPayloadError, web, Error, HttpRequest};

use crate::core::AppError;

/// Map JSON body errors to a validation error
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected JSON payload");

    let message = match &err {
        JsonPayloadError::ContentType => "Expected Content-Type: application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid request body: {}", other),
    };

    AppError::Validation(message).into()
}

/// Map query string errors to a validation error
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected query string");
    AppError::Validation(format!("Invalid query parameters: {}", err)).into()
}

/// Extractor configs wired to the handlers above
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
