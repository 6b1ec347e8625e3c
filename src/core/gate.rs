//! HTTP client for the gate service's pipeline configuration API.
//!
//! The gate owns pipeline storage and semantics; this client only issues
//! reads and reports transport or status failures.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::GateConfig;
use crate::error::{Error, Result};

fn http_error(e: reqwest::Error) -> Error {
    Error::gate_request_failed(e.to_string())
}

/// Read access to remotely stored pipeline configuration documents.
///
/// Command logic depends on this trait rather than on `GateClient` so tests
/// can substitute an in-memory source.
pub trait PipelineConfigSource {
    fn pipeline_config(&self, application: &str, name: &str) -> Result<Value>;
}

/// Blocking HTTP client for the gate service.
#[derive(Debug)]
pub struct GateClient {
    client: Client,
    base_url: String,
    auth_header: Option<String>,
}

impl GateClient {
    /// Creates a new gate client from connection configuration.
    pub fn new(config: &GateConfig) -> Result<Self> {
        if config.gate_endpoint.is_empty() {
            return Err(Error::config_invalid_value(
                "gate_endpoint",
                None,
                "Gate endpoint is not configured",
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url: config.gate_endpoint.trim_end_matches('/').to_string(),
            auth_header: config.auth_header.clone(),
        })
    }

    fn get(&self, endpoint: &str) -> Result<reqwest::blocking::Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.get(&url);

        if let Some(header) = &self.auth_header {
            let (name, value) = parse_header(header)?;
            request = request.header(name, value);
        }

        request.send().map_err(http_error)
    }
}

impl PipelineConfigSource for GateClient {
    fn pipeline_config(&self, application: &str, name: &str) -> Result<Value> {
        // Identifiers can carry '/', spaces, or query characters; encode
        // them so they stay single path segments.
        let response = self.get(&format!(
            "/applications/{}/pipelineConfigs/{}",
            urlencoding::encode(application),
            urlencoding::encode(name)
        ))?;

        let status = response.status();
        let body = response.text().map_err(http_error)?;

        // Anything other than a plain 200 is treated as a failed read.
        if status.as_u16() != 200 {
            return Err(Error::gate_unexpected_status(
                application,
                name,
                status.as_u16(),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::internal_json(
                e.to_string(),
                Some(format!("parse pipeline config for '{}'", name)),
            )
        })
    }
}

/// Parses a header line like "Authorization: Bearer token" into (name, value).
fn parse_header(header: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = header.splitn(2, ':').collect();
    if parts.len() != 2 {
        return Err(Error::config_invalid_value(
            "auth_header",
            Some(header.to_string()),
            "Expected 'Name: value' format",
        ));
    }
    Ok((parts[0].trim(), parts[1].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GateClient {
        GateClient::new(&GateConfig {
            gate_endpoint: server.base_url(),
            auth_header: None,
        })
        .unwrap()
    }

    #[test]
    fn test_fetch_returns_pipeline_document() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/applications/app1/pipelineConfigs/p1");
            then.status(200)
                .json_body(json!({"name": "p1", "disabled": false}));
        });

        let pipeline = client_for(&server).pipeline_config("app1", "p1").unwrap();

        mock.assert();
        assert_eq!(pipeline, json!({"name": "p1", "disabled": false}));
    }

    #[test]
    fn test_non_200_status_is_an_error_naming_the_pipeline() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/applications/app1/pipelineConfigs/p1");
            then.status(500).body("upstream broke");
        });

        let err = client_for(&server)
            .pipeline_config("app1", "p1")
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GateUnexpectedStatus);
        assert!(err.message.contains("app1"));
        assert!(err.message.contains("p1"));
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_auth_header_is_attached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/applications/app1/pipelineConfigs/p1")
                .header("Authorization", "Bearer sekrit");
            then.status(200).json_body(json!({}));
        });

        let client = GateClient::new(&GateConfig {
            gate_endpoint: server.base_url(),
            auth_header: Some("Authorization: Bearer sekrit".to_string()),
        })
        .unwrap();

        client.pipeline_config("app1", "p1").unwrap();
        mock.assert();
    }

    #[test]
    fn test_path_segments_are_percent_encoded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/applications/app1/pipelineConfigs/release%20candidate%2Fv2");
            then.status(200).json_body(json!({"name": "release candidate/v2"}));
        });

        client_for(&server)
            .pipeline_config("app1", "release candidate/v2")
            .unwrap();
        mock.assert();
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/applications/app1/pipelineConfigs/p1");
            then.status(200).body("<html>surprise</html>");
        });

        let err = client_for(&server)
            .pipeline_config("app1", "p1")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalJsonError);
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let err = GateClient::new(&GateConfig {
            gate_endpoint: String::new(),
            auth_header: None,
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_parse_header_rejects_missing_colon() {
        assert!(parse_header("NotAHeader").is_err());
        assert_eq!(
            parse_header("X-Api-Key:  abc ").unwrap(),
            ("X-Api-Key", "abc")
        );
    }
}
