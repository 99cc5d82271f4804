use board_core::{
    ApiCall, BoardError, BoardResult, Credentials, ErrorBody, GenreList, NewPost, Post, PostPage,
    Session, error_from_status,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://localhost:8000",
};

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn transport_error(call: ApiCall, err: gloo_net::Error) -> BoardError {
    BoardError::network(format!("{} transport error: {err}", call.name()))
}

async fn finish<T: DeserializeOwned>(call: ApiCall, response: Response) -> BoardResult<T> {
    if !response.ok() {
        let status = response.status();
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|raw| ErrorBody::parse(&raw).message());
        return Err(error_from_status(call, status, detail));
    }

    response.json::<T>().await.map_err(|err| {
        BoardError::network(format!("{} returned an unreadable body: {err}", call.name()))
    })
}

pub(crate) async fn login(credentials: &Credentials) -> BoardResult<Session> {
    let call = ApiCall::Login;
    let response = Request::post(&endpoint("/login"))
        .json(credentials)
        .map_err(|err| transport_error(call, err))?
        .send()
        .await
        .map_err(|err| transport_error(call, err))?;

    finish(call, response).await
}

pub(crate) async fn list_posts(offset: u32, limit: u32) -> BoardResult<PostPage> {
    let call = ApiCall::ListPosts;
    let url = endpoint(&format!("/posts?skip={offset}&limit={limit}"));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| transport_error(call, err))?;

    finish(call, response).await
}

pub(crate) async fn list_genres() -> BoardResult<GenreList> {
    let call = ApiCall::ListGenres;
    let response = Request::get(&endpoint("/genres"))
        .send()
        .await
        .map_err(|err| transport_error(call, err))?;

    finish(call, response).await
}

pub(crate) async fn create_post(post: &NewPost) -> BoardResult<Post> {
    let call = ApiCall::CreatePost;
    let response = Request::post(&endpoint("/posts"))
        .json(post)
        .map_err(|err| transport_error(call, err))?
        .send()
        .await
        .map_err(|err| transport_error(call, err))?;

    finish(call, response).await
}
