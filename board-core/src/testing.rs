use std::collections::VecDeque;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::BoardApi;
use crate::compose::NewPost;
use crate::error::{BoardError, BoardResult};
use crate::login::Credentials;
use crate::models::{Author, GenreList, Post, PostPage, Session};

pub(crate) fn sample_post(id: i64) -> Post {
    Post {
        id,
        title: format!("title {id}"),
        content: format!("content {id}"),
        author: Some(Author {
            nickname: "alice".to_string(),
        }),
        genre: None,
        created_at: None,
        updated_at: None,
        views: None,
    }
}

pub(crate) fn sample_posts(ids: Range<i64>) -> Vec<Post> {
    ids.map(sample_post).collect()
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    login_result: Arc<Mutex<Option<BoardResult<Session>>>>,
    login_calls: Arc<AtomicUsize>,
    pages: Arc<Mutex<VecDeque<BoardResult<Vec<Post>>>>>,
    list_requests: Arc<Mutex<Vec<(u32, u32)>>>,
    create_result: Arc<Mutex<Option<BoardResult<Post>>>>,
    created: Arc<Mutex<Vec<NewPost>>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_login(self, result: BoardResult<Session>) -> Self {
        *self.login_result.lock().expect("login_result mutex poisoned") = Some(result);
        self
    }

    pub(crate) fn with_pages(self, pages: Vec<BoardResult<Vec<Post>>>) -> Self {
        *self.pages.lock().expect("pages mutex poisoned") = pages.into();
        self
    }

    pub(crate) fn with_create(self, result: BoardResult<Post>) -> Self {
        *self.create_result.lock().expect("create_result mutex poisoned") = Some(result);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_requests(&self) -> Vec<(u32, u32)> {
        self.list_requests
            .lock()
            .expect("list_requests mutex poisoned")
            .clone()
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.created.lock().expect("created mutex poisoned").len()
    }

    pub(crate) fn last_created(&self) -> Option<NewPost> {
        self.created
            .lock()
            .expect("created mutex poisoned")
            .last()
            .cloned()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoardApi for FakeApi {
    async fn login(&self, _credentials: &Credentials) -> BoardResult<Session> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result
            .lock()
            .expect("login_result mutex poisoned")
            .clone()
            .unwrap_or_else(|| Err(BoardError::auth(None)))
    }

    async fn list_posts(&self, offset: u32, limit: u32) -> BoardResult<PostPage> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.list_requests
            .lock()
            .expect("list_requests mutex poisoned")
            .push((offset, limit));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .pages
            .lock()
            .expect("pages mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.map(|posts| PostPage { posts })
    }

    async fn list_genres(&self) -> BoardResult<GenreList> {
        Ok(GenreList { genres: Vec::new() })
    }

    async fn create_post(&self, post: &NewPost) -> BoardResult<Post> {
        self.created
            .lock()
            .expect("created mutex poisoned")
            .push(post.clone());
        self.create_result
            .lock()
            .expect("create_result mutex poisoned")
            .clone()
            .unwrap_or_else(|| Err(BoardError::network("no create result configured")))
    }
}
