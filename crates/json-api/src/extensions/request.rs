//! Request body helpers.

use salvo::prelude::Request;
use serde_json::{Map, Value};

use crate::errors::ApiError;

const INVALID_JSON_MESSAGE: &str = "request body must be valid JSON";

/// Read a body as an untyped JSON value so that field rules can report
/// their own messages instead of a deserializer error.
pub(crate) trait RequestExt {
    /// An empty body reads as `{}`.
    async fn json_value(&mut self) -> Result<Value, ApiError>;
}

impl RequestExt for Request {
    async fn json_value(&mut self) -> Result<Value, ApiError> {
        let payload = self
            .payload()
            .await
            .map_err(|_unreadable| ApiError::Validation(INVALID_JSON_MESSAGE.to_owned()))?;

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(payload)
            .map_err(|_malformed| ApiError::Validation(INVALID_JSON_MESSAGE.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn echo(req: &mut Request) -> Result<Json<Value>, ApiError> {
        Ok(Json(req.json_value().await?))
    }

    fn service() -> Service {
        Service::new(Router::with_path("echo").post(echo))
    }

    #[tokio::test]
    async fn json_bodies_are_parsed() -> TestResult {
        let value: Value = TestClient::post("http://example.com/echo")
            .json(&json!({ "name": "A" }))
            .send(&service())
            .await
            .take_json()
            .await?;

        assert_eq!(value, json!({ "name": "A" }));

        Ok(())
    }

    #[tokio::test]
    async fn empty_body_reads_as_empty_object() -> TestResult {
        let value: Value = TestClient::post("http://example.com/echo")
            .send(&service())
            .await
            .take_json()
            .await?;

        assert_eq!(value, json!({}));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() -> TestResult {
        let mut res = TestClient::post("http://example.com/echo")
            .raw_json("{\"name\": ")
            .send(&service())
            .await;

        let value: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(value, json!({ "message": INVALID_JSON_MESSAGE }));

        Ok(())
    }
}
