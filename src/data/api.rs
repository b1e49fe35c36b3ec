//! HTTP client for the exoplanet classification backend.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::domain::{ClassificationRequest, ClassificationResult, HealthStatus, PerformanceMetrics};
use crate::error::{AppError, GENERIC_FAILURE, SubmitError};
use crate::form::Classifier;

pub struct ApiClient {
    client: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to initialize HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.as_str()
    }

    /// `GET /health`.
    pub fn health(&self) -> Result<HealthStatus, SubmitError> {
        self.get_json("health")
    }

    /// `GET /performance`.
    pub fn performance(&self) -> Result<PerformanceMetrics, SubmitError> {
        self.get_json("performance")
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SubmitError> {
        let url = self.settings.endpoint(path);
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SubmitError::Request(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| SubmitError::Request(e.to_string()))?;
        tracing::debug!(%url, %status, "GET settled");
        interpret_response(status, &body)
    }
}

impl Classifier for ApiClient {
    fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult, SubmitError> {
        let url = self.settings.endpoint("predict");
        tracing::info!(%url, ?request, "POST classification");

        let resp = self.client.post(&url).json(request).send().map_err(|e| {
            tracing::warn!(%url, error = %e, "classification request failed");
            SubmitError::Request(e.to_string())
        })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| SubmitError::Request(e.to_string()))?;
        tracing::info!(%status, bytes = body.len(), "classification response");
        interpret_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turn a status line and raw body into a typed payload or a `SubmitError`.
///
/// - 2xx: body must parse as `T`, otherwise `MalformedResponse`
/// - anything else: `Request` carrying the body's `error` string, or the
///   generic message when the body is not JSON or has no `error` key
pub fn interpret_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, SubmitError> {
    if status.is_success() {
        return serde_json::from_str(body)
            .map_err(|e| SubmitError::MalformedResponse(format!("Invalid response from backend: {e}")));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    Err(SubmitError::Request(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use crate::domain::Category;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Raw request as seen by the stub backend.
    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    /// Accept one connection, capture the request, answer with `status` and a JSON `body`.
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else { return };
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }
            let len: usize = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(0);
            let mut body = vec![0u8; len];
            reader.read_exact(&mut body).unwrap();

            let mut stream = reader.into_inner();
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(Captured {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(body).unwrap(),
            });
        });
        (format!("http://{addr}"), rx)
    }

    fn client_for(base_url: String) -> ApiClient {
        let overrides = Overrides {
            base_url: Some(base_url),
            timeout_secs: Some(5),
        };
        let settings = Settings::resolve(&overrides, None, None, None).unwrap();
        ApiClient::new(settings).unwrap()
    }

    fn sample_request() -> ClassificationRequest {
        ClassificationRequest {
            orbital_period: 9.48,
            transit_duration: 2.96,
            planetary_radius: 2.26,
        }
    }

    #[test]
    fn classify_posts_one_json_request_to_predict() {
        let (url, rx) = serve_once("200 OK", r#"{"prediction":"CONFIRMED"}"#);
        let result = client_for(url).classify(&sample_request()).unwrap();
        assert_eq!(result.prediction, "CONFIRMED");

        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "POST /predict HTTP/1.1");
        assert_eq!(captured.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["orbital_period"], 9.48);
        assert_eq!(obj["transit_duration"], 2.96);
        assert_eq!(obj["planetary_radius"], 2.26);
    }

    #[test]
    fn classify_surfaces_backend_error_message() {
        let (url, rx) = serve_once("500 Internal Server Error", r#"{"error":"model unavailable"}"#);
        let err = client_for(url).classify(&sample_request()).unwrap_err();
        assert_eq!(err, SubmitError::Request("model unavailable".to_string()));
        assert_eq!(err.user_message(), "model unavailable");
        assert_eq!(rx.recv().unwrap().request_line, "POST /predict HTTP/1.1");
    }

    #[test]
    fn success_body_parses_into_result() {
        let body = r#"{"prediction":"CONFIRMED","confidence":{"grouped":{"Confirmed":0.9}}}"#;
        let result: ClassificationResult = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(Category::classify(&result.prediction), Category::Confirmed);
    }

    #[test]
    fn error_field_is_surfaced_verbatim() {
        let err = interpret_response::<ClassificationResult>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "model unavailable"}"#,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "model unavailable");
    }

    #[test]
    fn unparseable_error_body_gets_generic_message() {
        let err = interpret_response::<ClassificationResult>(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert_eq!(err, SubmitError::Request(GENERIC_FAILURE.to_string()));

        let err = interpret_response::<ClassificationResult>(StatusCode::BAD_REQUEST, r#"{"detail":"x"}"#).unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = interpret_response::<ClassificationResult>(StatusCode::BAD_REQUEST, "").unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn malformed_success_body_is_reported() {
        let err = interpret_response::<ClassificationResult>(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, SubmitError::MalformedResponse(_)));
        assert!(err.user_message().starts_with("Invalid response from backend"));

        // Valid JSON, wrong shape.
        let err = interpret_response::<ClassificationResult>(StatusCode::OK, r#"{"label":"x"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::MalformedResponse(_)));
    }

    #[test]
    fn health_and_metrics_parse() {
        let health: HealthStatus = interpret_response(
            StatusCode::OK,
            r#"{"status":"healthy","model_loaded":true,"scaler_loaded":false,"label_encoder_loaded":true}"#,
        )
        .unwrap();
        assert!(health.is_ready());

        let metrics: PerformanceMetrics = interpret_response(
            StatusCode::OK,
            r#"{"accuracy":0.94,"precision":0.92,"recall":0.91,"f1_score":0.915,
                "confusion_matrix":[[450,30,20],[25,380,45],[15,35,400]],
                "class_names":["False Positive","Candidate","Confirmed"]}"#,
        )
        .unwrap();
        assert_eq!(metrics.confusion_matrix.len(), 3);
        assert_eq!(metrics.class_names[2], "Confirmed");
    }
}
