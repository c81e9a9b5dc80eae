//! In-memory adapters for exercising use cases without I/O.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use spaceport_domain::request::{HttpMethod, RequestSpec};
use spaceport_domain::response::ResponseSpec;

use crate::ports::{FileSystem, FileSystemError, HttpClient, HttpClientError, Prompt};

type Reply = Result<ResponseSpec, HttpClientError>;

/// HTTP client answering from a script and recording every request.
///
/// Replies for the same route are served in the order they were added;
/// the last one is repeated. Unscripted routes answer 404.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: HttpMethod, url: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_get(self, url: &str, response: ResponseSpec) -> Self {
        self.on(HttpMethod::Get, url, Ok(response))
    }

    pub fn on_post(self, url: &str, response: ResponseSpec) -> Self {
        self.on(HttpMethod::Post, url, Ok(response))
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    fn reply(&self, request: &RequestSpec) -> Reply {
        let mut routes = self.routes.lock().unwrap();
        let Some(queue) = routes.get_mut(&(request.method, request.url.clone())) else {
            return Ok(ResponseSpec::json(404, r#"{"detail":"Not found."}"#));
        };
        if queue.len() > 1 {
            queue.pop_front().expect("queue is not empty")
        } else {
            queue.front().cloned().expect("route has a reply")
        }
    }
}

impl HttpClient for ScriptedHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply(request)
    }
}

/// File system backed by a map.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), contents.as_bytes().to_vec());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8(bytes.clone()).unwrap())
    }
}

impl FileSystem for MemoryFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        let bytes = self
            .files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))?;
        String::from_utf8(bytes).map_err(|_| FileSystemError::NotUtf8(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// Prompt answering from a fixed list, in order.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<String>>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> Option<String> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}
