//! Подгрузка ленты постов по запросу.
//!
//! [`Pagination`] это чистый автомат состояний `Idle → Loading → Idle | Exhausted`,
//! общий для браузера и CLI. [`PostFeed`] это асинхронная обёртка над ним для
//! вызывающих, которые работают через [`BoardApi`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::api::BoardApi;
use crate::error::BoardResult;
use crate::models::Post;

/// Размер страницы по умолчанию.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Состояние ленты.
pub enum FeedPhase {
    /// Запроса нет, посты ещё могут быть.
    Idle,
    /// Запрос страницы в полёте.
    Loading,
    /// Последняя страница была неполной; дальше грузить нечего.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Что показывать под списком постов.
pub enum BoardFooter {
    /// Кнопка «загрузить ещё».
    LoadMore,
    /// Индикатор загрузки.
    Loading,
    /// «Все посты загружены».
    AllLoaded,
    /// Постов нет совсем.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Параметры запроса страницы, выданные [`Pagination::begin`].
pub struct PageRequest {
    /// Сколько постов уже загружено (`skip`).
    pub offset: u32,
    /// Размер страницы (`limit`).
    pub limit: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Итог одного вызова `load_next`.
pub enum LoadOutcome {
    /// Запрос не отправлялся: лента уже грузится или исчерпана.
    Skipped,
    /// Страница добавлена в конец ленты.
    Loaded {
        /// Сколько постов пришло.
        added: usize,
        /// Лента исчерпана после этой страницы.
        exhausted: bool,
    },
    /// Ответ пришёл после `reset()` и отброшен.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
/// Курсор ленты и накопленные посты.
pub struct Pagination {
    page_size: u32,
    offset: u32,
    phase: FeedPhase,
    posts: Vec<Post>,
    generation: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Создаёт пустую ленту; `page_size == 0` заменяется на 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            offset: 0,
            phase: FeedPhase::Idle,
            posts: Vec::new(),
            generation: 0,
        }
    }

    /// Переводит `Idle → Loading` и возвращает параметры запроса.
    ///
    /// Из `Loading` и `Exhausted` возвращает `None`: второй запрос
    /// не отправляется, пока первый не завершился.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.phase != FeedPhase::Idle {
            return None;
        }
        self.phase = FeedPhase::Loading;
        Some(PageRequest {
            offset: self.offset,
            limit: self.page_size,
            generation: self.generation,
        })
    }

    /// Применяет результат запроса, выданного [`Pagination::begin`].
    ///
    /// Успех дописывает посты в конец в порядке сервера и сдвигает offset
    /// на размер страницы. Ошибка возвращает ленту в `Idle`, offset не
    /// меняется. Результат запроса до `reset()` отбрасывается.
    pub fn finish(
        &mut self,
        request: PageRequest,
        result: BoardResult<Vec<Post>>,
    ) -> BoardResult<LoadOutcome> {
        if request.generation != self.generation || self.phase != FeedPhase::Loading {
            return Ok(LoadOutcome::Stale);
        }

        let posts = match result {
            Ok(posts) => posts,
            Err(err) => {
                self.phase = FeedPhase::Idle;
                return Err(err);
            }
        };

        let added = posts.len();
        let exhausted = added < self.page_size as usize;
        self.posts.extend(posts);
        self.offset = self.offset.saturating_add(self.page_size);
        self.phase = if exhausted {
            FeedPhase::Exhausted
        } else {
            FeedPhase::Idle
        };

        Ok(LoadOutcome::Loaded { added, exhausted })
    }

    /// Возвращает ленту в `Idle` с нулевым offset и пустым списком.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.posts.clear();
        self.phase = FeedPhase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == FeedPhase::Exhausted
    }

    pub fn footer(&self) -> BoardFooter {
        match self.phase {
            FeedPhase::Idle => BoardFooter::LoadMore,
            FeedPhase::Loading => BoardFooter::Loading,
            FeedPhase::Exhausted if self.posts.is_empty() => BoardFooter::Empty,
            FeedPhase::Exhausted => BoardFooter::AllLoaded,
        }
    }
}

impl BoardFooter {
    /// Подпись под списком.
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadMore => "더 보기",
            Self::Loading => "로딩 중...",
            Self::AllLoaded => "모든 게시물을 불러왔습니다.",
            Self::Empty => "아직 게시물이 없습니다. 첫 번째 게시물을 작성해보세요!",
        }
    }
}

#[derive(Debug, Default)]
/// Лента постов для вызывающих из нескольких задач.
///
/// Переход `Idle → Loading` делается под мьютексом до первого `await`,
/// поэтому одновременные `load_next` отправляют не больше одного запроса.
pub struct PostFeed {
    state: Mutex<Pagination>,
}

impl PostFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: Mutex::new(Pagination::new(page_size)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pagination> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Загружает следующую страницу, если лента в `Idle`.
    pub async fn load_next<A>(&self, api: &A) -> BoardResult<LoadOutcome>
    where
        A: BoardApi + ?Sized,
    {
        let request = {
            let mut state = self.lock();
            state.begin()
        };
        let Some(request) = request else {
            return Ok(LoadOutcome::Skipped);
        };

        debug!(offset = request.offset, limit = request.limit, "loading posts page");
        let result = api
            .list_posts(request.offset, request.limit)
            .await
            .map(|page| page.posts);
        if let Err(err) = &result {
            warn!(offset = request.offset, error = %err, "failed to load posts page");
        }

        let outcome = self.lock().finish(request, result)?;
        if outcome == LoadOutcome::Stale {
            debug!(offset = request.offset, "dropping page loaded before reset");
        }
        Ok(outcome)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Вход на экран доски: `reset()`, затем `load_next()`.
    pub async fn open<A>(&self, api: &A) -> BoardResult<LoadOutcome>
    where
        A: BoardApi + ?Sized,
    {
        self.reset();
        self.load_next(api).await
    }

    /// Копия текущего состояния для отрисовки.
    pub fn snapshot(&self) -> Pagination {
        self.lock().clone()
    }

    pub fn phase(&self) -> FeedPhase {
        self.lock().phase()
    }

    pub fn footer(&self) -> BoardFooter {
        self.lock().footer()
    }
}
