#![allow(dead_code)]

use album_service::album::AlbumService;
use album_service::api;
use album_service::photos_client::HttpPhotosClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{any, method, path, path_regex};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Serves the album API on an ephemeral port, backed by the photos service at
/// `photos_base_url`. Returns the base URL of the album API.
pub async fn spawn_app(photos_base_url: &str) -> String {
    let client = HttpPhotosClient::new(
        photos_base_url,
        Duration::from_secs(1),
        Duration::from_secs(5),
    )
    .expect("build photos client");
    let albums = AlbumService::new(Arc::new(client));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(api::serve(listener, albums, std::future::pending()));

    format!("http://{addr}")
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wiremock")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingFile {
    Many { mappings: Vec<StubMapping> },
    One(StubMapping),
}

#[derive(Deserialize)]
struct StubMapping {
    request: RequestPattern,
    response: ResponseDefinition,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestPattern {
    method: Option<String>,
    url: Option<String>,
    url_path: Option<String>,
    url_pattern: Option<String>,
}

fn default_status() -> u16 {
    200
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseDefinition {
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    headers: HashMap<String, String>,
    body: Option<String>,
    json_body: Option<serde_json::Value>,
    body_file_name: Option<String>,
}

/// Mounts every WireMock-style stub mapping found in `{root}/mappings` on
/// `server`. Response bodies referenced by `bodyFileName` are read from
/// `{root}/__files`. Returns the number of mounted stubs.
pub async fn mount_mappings(server: &MockServer, root: &Path) -> usize {
    let mut files: Vec<PathBuf> = fs::read_dir(root.join("mappings"))
        .expect("read mappings dir")
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut mounted = 0;
    for file in files {
        let contents = fs::read_to_string(&file).expect("read mapping file");
        let mappings = match serde_json::from_str(&contents).expect("parse mapping file") {
            MappingFile::Many { mappings } => mappings,
            MappingFile::One(mapping) => vec![mapping],
        };

        for mapping in mappings {
            to_mock(mapping, root).mount(server).await;
            mounted += 1;
        }
    }
    mounted
}

/// WireMock's `url`: the path and query string must both match exactly.
struct ExactUrl(String);

impl Match for ExactUrl {
    fn matches(&self, request: &Request) -> bool {
        match request.url.query() {
            Some(query) => format!("{}?{query}", request.url.path()) == self.0,
            None => request.url.path() == self.0,
        }
    }
}

fn to_mock(mapping: StubMapping, root: &Path) -> Mock {
    let request = mapping.request;
    let mut builder = match &request.method {
        Some(m) if m != "ANY" => Mock::given(method(m.as_str())),
        _ => Mock::given(any()),
    };

    if let Some(url) = request.url {
        builder = builder.and(ExactUrl(url));
    } else if let Some(url_path) = request.url_path {
        builder = builder.and(path(url_path));
    } else if let Some(pattern) = request.url_pattern {
        builder = builder.and(path_regex(format!("^{pattern}$")));
    }

    let response = mapping.response;
    let mut template = ResponseTemplate::new(response.status);
    if let Some(body) = response.body {
        template = template.set_body_string(body);
    } else if let Some(json) = response.json_body {
        template = template.set_body_json(json);
    } else if let Some(name) = response.body_file_name {
        let bytes = fs::read(root.join("__files").join(name)).expect("read body file");
        template = template.set_body_bytes(bytes);
    }
    for (name, value) in &response.headers {
        template = template.insert_header(name.as_str(), value.as_str());
    }

    builder.respond_with(template)
}
