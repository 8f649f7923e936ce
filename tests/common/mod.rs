#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use diary_analyzer::JournalAnalyzer;
use diary_analyzer::build_analyzer;
use diary_analyzer::services::settings::load_config;
use serde_json::Value;
use tera::{Context, Tera};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MODEL_PATH: &str = "/models/test-model";
pub const API_KEY_ENV: &str = "DIARY_ANALYZER_TEST_KEY";

/// Knobs for the rendered test config.
pub struct ConfigParams {
    pub endpoint: String,
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub timeout_secs: Option<u64>,
    pub prompt_template: Option<String>,
    pub log_dir: Option<String>,
}

impl ConfigParams {
    pub fn for_server(server: &MockServer) -> Self {
        Self::for_endpoint(format!("{}{}", server.uri(), MODEL_PATH))
    }

    pub fn for_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            temperature: 0.7,
            max_new_tokens: 500,
            timeout_secs: None,
            prompt_template: None,
            log_dir: None,
        }
    }
}

pub fn load_test_config_template() -> String {
    let p = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/configs/analyzer.yaml");
    fs::read_to_string(p).unwrap()
}

pub fn render_config(params: &ConfigParams) -> tempfile::NamedTempFile {
    let tpl = load_test_config_template();
    let mut tera = Tera::default();
    tera.add_raw_template("cfg", &tpl).unwrap();
    let mut ctx = Context::new();
    ctx.insert("endpoint", &params.endpoint);
    ctx.insert("api_key_env", API_KEY_ENV);
    ctx.insert("temperature", &params.temperature);
    ctx.insert("max_new_tokens", &params.max_new_tokens);
    ctx.insert("timeout_secs", &params.timeout_secs);
    ctx.insert("prompt_template", &params.prompt_template);
    ctx.insert("log_dir", &params.log_dir);
    let config_text = tera.render("cfg", &ctx).unwrap();
    let cfg_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(cfg_file.path(), config_text).unwrap();
    cfg_file
}

/// Builds the production analyzer (real HTTP transport) from a rendered config.
pub fn analyzer_from(params: &ConfigParams) -> JournalAnalyzer {
    let cfg_file = render_config(params);
    let mut cfg = load_config(cfg_file.path()).unwrap();
    cfg.inference.api_key = Some("TESTKEY".to_string());
    build_analyzer(&cfg).unwrap()
}

pub async fn mount_generate(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_generate_raw(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Fails verification if anything reaches the endpoint.
pub async fn mount_no_calls(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(server)
        .await;
}

/// Address that refuses connections: bind an ephemeral port, then release it.
pub fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, MODEL_PATH)
}

pub async fn received_json_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
