use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub author: String,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    articles: BTreeMap<u64, Article>,
}

pub type Db = Arc<RwLock<Store>>;

/// XML view of an article: the id is an attribute.
#[derive(Serialize)]
#[serde(rename = "article")]
struct ArticleXml<'a> {
    #[serde(rename = "@id")]
    id: u64,
    title: &'a str,
    author: &'a str,
}

impl<'a> From<&'a Article> for ArticleXml<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            id: article.id,
            title: &article.title,
            author: &article.author,
        }
    }
}

#[derive(Serialize)]
#[serde(rename = "articles")]
struct ArticlesXml<'a> {
    article: Vec<ArticleXml<'a>>,
}

pub const GREETING: &str = "hello from the mock server";

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/{id}", get(get_article).delete(delete_article))
        .route("/xml/articles", get(list_articles_xml))
        .route("/xml/articles/{id}", get(get_article_xml))
        .route("/greeting", get(greeting))
        .route("/latin1", get(latin1))
        .route("/headers", get(echo_headers))
        .route("/echo", post(echo_body))
        .route("/broken", get(broken_xml))
        .route("/status/{code}", get(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_articles(State(db): State<Db>) -> Json<Vec<Article>> {
    let store = db.read().await;
    Json(store.articles.values().cloned().collect())
}

async fn create_article(
    State(db): State<Db>,
    Json(input): Json<CreateArticle>,
) -> (StatusCode, Json<Article>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let article = Article {
        id: store.next_id,
        title: input.title,
        author: input.author,
    };
    store.articles.insert(article.id, article.clone());
    tracing::debug!(id = article.id, "article created");
    (StatusCode::CREATED, Json(article))
}

async fn get_article(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Article>, StatusCode> {
    let store = db.read().await;
    store.articles.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_article(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    match store.articles.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_articles_xml(State(db): State<Db>) -> Response {
    let store = db.read().await;
    let list = ArticlesXml {
        article: store.articles.values().map(ArticleXml::from).collect(),
    };
    xml(&list)
}

async fn get_article_xml(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let store = db.read().await;
    match store.articles.get(&id) {
        Some(article) => xml(&ArticleXml::from(article)),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn greeting() -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=UTF-8")], GREETING).into_response()
}

/// "Crème brûlée" encoded as ISO-8859-1.
async fn latin1() -> Response {
    let body: &'static [u8] = b"Cr\xe8me br\xfbl\xe9e";
    ([(header::CONTENT_TYPE, "text/plain; charset=ISO-8859-1")], body).into_response()
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    Json(
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
    )
}

async fn echo_body(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

async fn broken_xml() -> Response {
    xml_response("<article id=\"1\"><title>unterminated</article>".to_string())
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        format!("status {}", status.as_u16()),
    )
        .into_response()
}

fn xml<T: Serialize>(value: &T) -> Response {
    match quick_xml::se::to_string(value) {
        Ok(document) => xml_response(document),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize XML");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn xml_response(document: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml; charset=UTF-8")], document).into_response()
}
