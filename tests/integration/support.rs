use async_trait::async_trait;
use compartment_paths::error::ApiError;
use compartment_paths::identity::{
    CompartmentPage, CompartmentSource, IdentityClient, ListOptions, RequestSigner,
};
use compartment_paths::types::CompartmentRecord;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

pub const TENANCY: &str = "ocid1.tenancy.oc1..tenancy";
pub const USER: &str = "ocid1.user.oc1..tester";
pub const FINGERPRINT: &str = "12:34:56:78:90:ab:cd:ef";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_signer() -> RequestSigner {
    let path = fixture_path("test_key.pem");
    let pem = std::fs::read_to_string(&path).unwrap();
    RequestSigner::from_pem(format!("{}/{}/{}", TENANCY, USER, FINGERPRINT), &pem, &path).unwrap()
}

/// Identity client for the stub server; bypasses any proxy from the environment.
pub fn stub_client(base_url: &str, options: ListOptions) -> IdentityClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    IdentityClient::with_client(http, base_url, TENANCY, fixture_signer(), options)
}

/// Root + two children + two grandchildren, listed children-first.
pub fn five_compartments() -> Vec<CompartmentRecord> {
    vec![
        CompartmentRecord::new("ocid1.compartment.oc1..x", "X", "ocid1.compartment.oc1..a"),
        CompartmentRecord::new("ocid1.compartment.oc1..y", "Y", "ocid1.compartment.oc1..b"),
        CompartmentRecord::new("ocid1.compartment.oc1..a", "A", TENANCY),
        CompartmentRecord::new("ocid1.compartment.oc1..b", "B", TENANCY),
    ]
}

/// In-memory source serving fixed pages linked by `page-N` tokens.
pub struct StaticSource {
    tenancy: String,
    pages: Vec<Vec<CompartmentRecord>>,
    fail_at: Option<usize>,
    requested: Mutex<Vec<Option<String>>>,
}

impl StaticSource {
    pub fn new(pages: Vec<Vec<CompartmentRecord>>) -> Self {
        Self {
            tenancy: TENANCY.to_string(),
            pages,
            fail_at: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Fail when page `index` (0-based) is requested.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn requested(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompartmentSource for StaticSource {
    fn tenancy_id(&self) -> &str {
        &self.tenancy
    }

    async fn list_page(&self, page: Option<&str>) -> Result<CompartmentPage, ApiError> {
        self.requested.lock().unwrap().push(page.map(str::to_string));
        let index = match page {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ApiError::Decode(format!("bad token {}", token)))?,
        };
        if self.fail_at == Some(index) {
            return Err(ApiError::HttpStatus {
                status: 500,
                body: "InternalError".to_string(),
            });
        }
        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = if index + 1 < self.pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };
        Ok(CompartmentPage { items, next_page })
    }
}

/// Canned HTTP response for the stub identity server
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub next_page: Option<String>,
}

impl StubResponse {
    pub fn ok(body: &str, next_page: Option<&str>) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            next_page: next_page.map(str::to_string),
        }
    }
}

/// Request line and lowercased headers seen by the stub server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serve each response once, in order, on a fresh connection.
pub fn spawn_identity_stub(
    responses: Vec<StubResponse>,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    let handle = std::thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

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
                if let Some((key, value)) = line.split_once(':') {
                    headers.push((key.trim().to_ascii_lowercase(), value.trim().to_string()));
                }
            }
            sink.lock().unwrap().push(CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
            });

            let reason = if response.status == 200 { "OK" } else { "Error" };
            let mut head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\nopc-request-id: stub-request\r\n",
                response.status,
                reason,
                response.body.len()
            );
            if let Some(next) = &response.next_page {
                head.push_str(&format!("opc-next-page: {}\r\n", next));
            }
            head.push_str("\r\n");
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(response.body.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });

    (base_url, captured, handle)
}
