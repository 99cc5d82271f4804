use std::time::Duration;

use async_trait::async_trait;
use board_core::{
    ApiCall, BoardApi, BoardError, BoardResult, Credentials, ErrorBody, GenreList, NewPost, Post,
    PostPage, Session,
};
use reqwest::{Client, Method};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{from_http_status, from_reqwest};

/// Таймаут установки соединения по умолчанию.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Таймаут запроса целиком по умолчанию.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct ListPostsQuery {
    skip: u32,
    limit: u32,
}

#[derive(Debug, Clone)]
/// HTTP-клиент REST API доски объявлений.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с таймаутами по умолчанию.
    pub fn new(base_url: impl Into<String>) -> BoardResult<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Создаёт клиент с заданными таймаутами.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> BoardResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| BoardError::network(format!("failed to build http client: {err}")))?;

        Ok(Self {
            base_url: normalize_base_url(base_url.into()),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(call: ApiCall, response: reqwest::Response) -> BoardError {
        let status = response.status();
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|raw| ErrorBody::parse(&raw).message());

        warn!(call = call.name(), %status, detail = ?detail, "backend returned an error");
        from_http_status(call, status, detail)
    }

    async fn finish<TRes>(call: ApiCall, response: reqwest::Response) -> BoardResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(Self::decode_error(call, response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(|err| from_reqwest(call, err))
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        call: ApiCall,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> BoardResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(call = call.name(), %method, %url, "sending request");

        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(call = call.name(), error = %err, "request failed");
                from_reqwest(call, err)
            })?;

        Self::finish(call, response).await
    }

    async fn get_json<TQuery, TRes>(
        &self,
        call: ApiCall,
        path: &str,
        query: Option<&TQuery>,
    ) -> BoardResult<TRes>
    where
        TQuery: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(call = call.name(), %url, "sending request");

        let mut request = self.client.request(Method::GET, url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|err| {
            warn!(call = call.name(), error = %err, "request failed");
            from_reqwest(call, err)
        })?;

        Self::finish(call, response).await
    }
}

#[async_trait]
impl BoardApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> BoardResult<Session> {
        self.send_json(ApiCall::Login, Method::POST, "/login", credentials)
            .await
    }

    async fn list_posts(&self, offset: u32, limit: u32) -> BoardResult<PostPage> {
        let query = ListPostsQuery {
            skip: offset,
            limit,
        };
        self.get_json(ApiCall::ListPosts, "/posts", Some(&query))
            .await
    }

    async fn list_genres(&self) -> BoardResult<GenreList> {
        self.get_json::<(), _>(ApiCall::ListGenres, "/genres", None)
            .await
    }

    async fn create_post(&self, post: &NewPost) -> BoardResult<Post> {
        self.send_json(ApiCall::CreatePost, Method::POST, "/posts", post)
            .await
    }
}

/// Добавляет `http://`, если схема не указана.
pub fn normalize_base_url(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}
