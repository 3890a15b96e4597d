#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use portal_admin_api::auth::{generate_jwt, Claims};
use portal_admin_api::schema::UserRole;
use reqwest::StatusCode;
use serde_json::Value;

pub const JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Empty DATABASE_URL keeps the server on the in-memory store even if a
        // .env file names a database.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_portal-admin-api"));
        cmd.env("APP_ENV", "development")
            .env("SERVER_HOST", "127.0.0.1")
            .env("SERVER_PORT", port.to_string())
            .env("DATABASE_URL", "")
            .env("JWT_SECRET", JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn query(&self, procedure: &str) -> Result<(StatusCode, Value)> {
        let res = reqwest::Client::new()
            .get(self.url(&format!("/trpc/{}", procedure)))
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn mutate(&self, procedure: &str, input: &Value, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = reqwest::Client::new()
            .post(self.url(&format!("/trpc/{}", procedure)))
            .json(input);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await?;
        Ok((res.status(), res.json().await?))
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer token for an operator, signed with the secret the test server uses.
pub fn token_for(user_id: i32) -> String {
    let claims = Claims::new(user_id, format!("operator{}", user_id), UserRole::Staff, 1).unwrap();
    generate_jwt(&claims, JWT_SECRET).expect("token")
}

/// Field names listed in a VALIDATION_ERROR body.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["field_errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
