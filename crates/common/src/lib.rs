use thiserror::Error;

pub mod utils;
pub mod env;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub mod municipalities {
    use super::*;

    /// Fetch the municipality names published by the directory at `url`.
    /// The directory answers with a plain JSON array of strings.
    pub async fn fetch_municipalities(client: &reqwest::Client, url: &str) -> Result<Vec<String>, CoreError> {
        let resp = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let names = resp
            .json::<Vec<String>>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_municipalities_decodes_string_array() {
        let app = Router::new().route(
            "/municipios",
            get(|| async { Json(vec!["Estremoz".to_string(), "Évora".to_string()]) }),
        );
        let base = serve(app).await;
        let names = municipalities::fetch_municipalities(&reqwest::Client::new(), &format!("{base}/municipios"))
            .await
            .expect("fetch");
        assert_eq!(names, vec!["Estremoz", "Évora"]);
    }

    #[tokio::test]
    async fn fetch_municipalities_reports_upstream_status() {
        let app = Router::new().route("/municipios", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = serve(app).await;
        let err = municipalities::fetch_municipalities(&reqwest::Client::new(), &format!("{base}/municipios"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn fetch_municipalities_rejects_unexpected_payload() {
        let app = Router::new().route("/municipios", get(|| async { Json(serde_json::json!({"nome": "Estremoz"})) }));
        let base = serve(app).await;
        let err = municipalities::fetch_municipalities(&reqwest::Client::new(), &format!("{base}/municipios"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, CoreError::Parse(_)));
    }
}
