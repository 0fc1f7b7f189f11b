use super::{check_response, ApiError, SupabaseAuth, TaskStore};
use crate::libs::config::SupabaseConfig;
use crate::libs::task::{NewTask, Task, TaskPatch};
use reqwest::{Client, Method, RequestBuilder};
use std::sync::Arc;

const REST_PATH: &str = "rest/v1";
const TASKS_TABLE: &str = "tasks";

/// PostgREST client for the `tasks` table.
///
/// Requests carry the project's anon key as `apikey` and the signed-in
/// user's access token as bearer, so row-level security on the table limits
/// every query to that user's rows. Without a session the anon key is sent
/// as bearer and the service decides what (if anything) is visible.
pub struct SupabaseTasks {
    client: Client,
    config: SupabaseConfig,
    auth: Arc<SupabaseAuth>,
}

impl SupabaseTasks {
    pub fn new(config: &SupabaseConfig, auth: Arc<SupabaseAuth>) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            auth,
        }
    }

    pub fn table_url(&self) -> String {
        format!("{}/{}/{}", self.config.base_url(), REST_PATH, TASKS_TABLE)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let token = self.auth.access_token().unwrap_or_else(|| self.config.anon_key.clone());
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }
}

/// PostgREST equality filter on the primary key.
fn id_filter(id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

impl TaskStore for SupabaseTasks {
    async fn fetch_all(&self) -> Result<Vec<Task>, ApiError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "due_date.asc")])
            .send()
            .await?;
        let response = check_response(response).await?;
        let tasks = response.json::<Vec<Task>>().await?;
        tracing::debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, ApiError> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[task])
            .send()
            .await?;
        let response = check_response(response).await?;
        let inserted = response.json::<Vec<Task>>().await?.into_iter().next().ok_or(ApiError::EmptyResponse)?;
        tracing::debug!(id = %inserted.id, "inserted task");
        Ok(inserted)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<(), ApiError> {
        let response = self
            .request(Method::PATCH)
            .query(&id_filter(id))
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;
        check_response(response).await?;
        tracing::debug!(id, "updated task");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE).query(&id_filter(id)).send().await?;
        check_response(response).await?;
        tracing::debug!(id, "deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::session_cache::SessionCache;

    #[test]
    fn test_table_url_ignores_trailing_slash() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
        };
        let cache = SessionCache::at(std::env::temp_dir().join("taskdeck-rest-test-session"));
        let auth = Arc::new(SupabaseAuth::with_cache(&config, cache));
        let store = SupabaseTasks::new(&config, auth);
        assert_eq!(store.table_url(), "https://abcd.supabase.co/rest/v1/tasks");
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter("42"), [("id", "eq.42".to_string())]);
    }

    mod wire {
        use super::*;
        use crate::api::{AuthSession, User};
        use chrono::{TimeZone, Utc};
        use serde_json::{json, Value};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};
        use tokio::sync::mpsc;

        const ROW: &str = r#"[{"id":"t1","user_id":"u1","title":"Buy milk","description":null,"completed":false,"due_date":"2024-06-01T00:00:00+00:00","created_at":"2024-05-01T09:00:00+00:00"}]"#;

        /// One HTTP request as received by the stub server.
        struct Captured {
            request_line: String,
            headers: Vec<(String, String)>,
            body: String,
        }

        impl Captured {
            fn header(&self, name: &str) -> Option<&str> {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value.as_str())
            }

            fn json(&self) -> Value {
                serde_json::from_str(&self.body).unwrap()
            }
        }

        async fn read_request(stream: &mut TcpStream) -> Captured {
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 4096];
            let head_end = loop {
                let read = stream.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before headers");
                buffer.extend_from_slice(&chunk[..read]);
                if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                    break pos;
                }
            };

            let head = String::from_utf8_lossy(&buffer[..head_end]).to_string();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|line| line.split_once(':'))
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .collect();
            let content_length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);

            let body_start = head_end + 4;
            while buffer.len() < body_start + content_length {
                let read = stream.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before body");
                buffer.extend_from_slice(&chunk[..read]);
            }
            let body = String::from_utf8_lossy(&buffer[body_start..body_start + content_length]).to_string();

            Captured {
                request_line,
                headers,
                body,
            }
        }

        /// Answers one request per connection and forwards what it received.
        async fn serve(listener: TcpListener, sender: mpsc::UnboundedSender<Captured>) {
            while let Ok((mut stream, _)) = listener.accept().await {
                let captured = read_request(&mut stream).await;
                let (status, body) = match captured.request_line.split(' ').next() {
                    Some("GET") => ("200 OK", "[]"),
                    Some("POST") => ("201 Created", ROW),
                    _ => ("204 No Content", ""),
                };
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                let _ = stream.shutdown().await;
                if sender.send(captured).is_err() {
                    return;
                }
            }
        }

        struct Stub {
            store: SupabaseTasks,
            requests: mpsc::UnboundedReceiver<Captured>,
            _temp_dir: tempfile::TempDir,
        }

        impl Stub {
            async fn next(&mut self) -> Captured {
                self.requests.recv().await.unwrap()
            }
        }

        /// Store pointed at a local stub, signed in with a session restored from disk.
        async fn stub() -> Stub {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let config = SupabaseConfig {
                url: format!("http://{}/", listener.local_addr().unwrap()),
                anon_key: "anon-key".to_string(),
            };
            let (sender, requests) = mpsc::unbounded_channel();
            tokio::spawn(serve(listener, sender));

            let temp_dir = tempfile::tempdir().unwrap();
            let cache = SessionCache::at(temp_dir.path().join(".session"));
            cache
                .save(&AuthSession {
                    access_token: "access-token".to_string(),
                    refresh_token: "refresh-token".to_string(),
                    expires_at: Some(Utc::now().timestamp() + 3600),
                    expires_in: Some(3600),
                    user: User {
                        id: "u1".to_string(),
                        email: None,
                    },
                })
                .unwrap();
            let auth = Arc::new(SupabaseAuth::with_cache(&config, cache));
            auth.restore().await.unwrap();

            Stub {
                store: SupabaseTasks::new(&config, auth),
                requests,
                _temp_dir: temp_dir,
            }
        }

        fn assert_auth_headers(request: &Captured) {
            assert_eq!(request.header("apikey"), Some("anon-key"));
            assert_eq!(request.header("authorization"), Some("Bearer access-token"));
        }

        #[tokio::test]
        async fn test_fetch_all_selects_ordered_by_due_date() {
            let mut stub = stub().await;

            let tasks = stub.store.fetch_all().await.unwrap();
            assert!(tasks.is_empty());

            let request = stub.next().await;
            assert_eq!(request.request_line, "GET /rest/v1/tasks?select=*&order=due_date.asc HTTP/1.1");
            assert_auth_headers(&request);
        }

        #[tokio::test]
        async fn test_insert_sends_single_row_array() {
            let mut stub = stub().await;
            let due_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

            let inserted = stub.store.insert(&NewTask::new("u1", "Buy milk", "", due_date)).await.unwrap();
            assert_eq!(inserted.id, "t1");
            assert_eq!(inserted.description, "");

            let request = stub.next().await;
            assert_eq!(request.request_line, "POST /rest/v1/tasks HTTP/1.1");
            assert_auth_headers(&request);
            assert_eq!(request.header("prefer"), Some("return=representation"));
            assert_eq!(
                request.json(),
                json!([{
                    "user_id": "u1",
                    "title": "Buy milk",
                    "description": "",
                    "completed": false,
                    "due_date": "2024-06-01T00:00:00Z"
                }])
            );
        }

        #[tokio::test]
        async fn test_update_patches_changed_fields_by_id() {
            let mut stub = stub().await;

            stub.store.update("t1", &TaskPatch::completion(true)).await.unwrap();
            let request = stub.next().await;
            assert_eq!(request.request_line, "PATCH /rest/v1/tasks?id=eq.t1 HTTP/1.1");
            assert_auth_headers(&request);
            assert_eq!(request.json(), json!({ "completed": true }));

            let due_date = Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap();
            stub.store.update("t1", &TaskPatch::details("Call Bob", "lease", due_date)).await.unwrap();
            let request = stub.next().await;
            assert_eq!(
                request.json(),
                json!({ "title": "Call Bob", "description": "lease", "due_date": "2024-07-02T00:00:00Z" })
            );
        }

        #[tokio::test]
        async fn test_delete_by_id() {
            let mut stub = stub().await;

            stub.store.delete("t1").await.unwrap();

            let request = stub.next().await;
            assert_eq!(request.request_line, "DELETE /rest/v1/tasks?id=eq.t1 HTTP/1.1");
            assert_auth_headers(&request);
            assert!(request.body.is_empty());
        }
    }
}
