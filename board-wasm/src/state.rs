use board_core::{
    BoardError, DEFAULT_PAGE_SIZE, Genre, LoadOutcome, Pagination, Route, Session,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::api;
use crate::storage::session_store;

#[derive(Debug, Clone, Copy)]
/// Состояние приложения, общее для всех экранов.
pub(crate) struct AppState {
    pub(crate) route: RwSignal<Route>,
    /// Зеркало сессии из `sessionStorage`.
    pub(crate) session: RwSignal<Option<Session>>,
    pub(crate) feed: RwSignal<Pagination>,
    /// Жанры, загруженные при последнем входе на экран публикации.
    pub(crate) genres: RwSignal<Vec<Genre>>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            route: RwSignal::new(Route::Login),
            session: RwSignal::new(session_store().get()),
            feed: RwSignal::new(Pagination::new(DEFAULT_PAGE_SIZE)),
            genres: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    /// Подробности в консоль, пользователю короткое сообщение.
    pub(crate) fn report(&self, err: &BoardError) {
        warn(&err.to_string());
        self.set_error(err.user_message());
    }

    /// Переход с записью в историю браузера.
    pub(crate) fn navigate(self, route: Route) {
        if let Err(err) = push_history(&route) {
            warn(&format!("history.pushState failed: {err:?}"));
        }
        self.show(route);
    }

    /// Показывает экран без записи в историю (старт, назад/вперёд).
    pub(crate) fn show(self, route: Route) {
        self.clear_error();
        self.route.set(route.clone());
        match route {
            Route::Board => {
                self.feed.update(Pagination::reset);
                self.load_next();
            }
            Route::Compose => self.load_genres(),
            Route::Login | Route::NotFound(_) => {}
        }
    }

    /// Следующая страница ленты; пока идёт загрузка, вызов ничего не делает.
    pub(crate) fn load_next(self) {
        let mut request = None;
        self.feed.update(|feed| request = feed.begin());
        let Some(request) = request else {
            return;
        };

        spawn_local(async move {
            let result = api::list_posts(request.offset, request.limit)
                .await
                .map(|page| page.posts);

            let mut outcome = Ok(LoadOutcome::Skipped);
            self.feed
                .update(|feed| outcome = feed.finish(request, result));
            if let Err(err) = outcome {
                self.report(&err);
            }
        });
    }

    fn load_genres(self) {
        self.genres.set(Vec::new());
        if self.session.with_untracked(Option::is_none) {
            return;
        }

        spawn_local(async move {
            match api::list_genres().await {
                Ok(list) => self.genres.set(list.genres),
                Err(err) => self.report(&err),
            }
        });
    }

    pub(crate) fn sign_out(self) {
        if let Err(err) = session_store().clear() {
            self.report(&BoardError::from(err));
            return;
        }
        self.session.set(None);
        self.navigate(Route::Login);
    }
}

pub(crate) fn current_route() -> Route {
    let path = window().location().pathname().unwrap_or_default();
    Route::from_path(&path)
}

fn push_history(route: &Route) -> Result<(), JsValue> {
    window()
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(route.path()))
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
