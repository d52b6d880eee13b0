//! An in-process stand-in for the Hack-or-Snooze backend, served with axum on
//! an ephemeral local port. It keeps just enough state to behave like the real
//! API and counts every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "error": {
                "status": status.as_u16(),
                "title": status.canonical_reason(),
                "message": message,
            }
        })),
    )
}

#[derive(Clone)]
struct Account {
    password: String,
    name: String,
    created_at: String,
    favorites: Vec<String>,
    stories: Vec<String>,
}

#[derive(Default)]
struct Db {
    stories: Vec<Value>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    hits: HashMap<&'static str, usize>,
}

impl Db {
    fn story(&self, story_id: &str) -> Option<Value> {
        self.stories
            .iter()
            .find(|s| s["storyId"] == story_id)
            .cloned()
    }

    fn user_json(&self, username: &str) -> Value {
        let account = &self.accounts[username];
        let resolve = |ids: &[String]| -> Vec<Value> {
            ids.iter().filter_map(|id| self.story(id)).collect()
        };
        json!({
            "username": username,
            "name": account.name,
            "createdAt": account.created_at,
            "updatedAt": account.created_at,
            "favorites": resolve(&account.favorites),
            "stories": resolve(&account.stories),
        })
    }

    fn owner_of(&self, token: &str) -> Result<String, (StatusCode, Json<Value>)> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid token"))
    }

    fn issue_token(&mut self, username: &str) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.tokens.insert(token.clone(), username.to_string());
        token
    }
}

/// Handle to a running fake backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    db: Arc<Mutex<Db>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a story as if `username` had posted it. Returns its id.
    pub fn seed_story(&self, story_id: &str, title: &str, url: &str, username: &str) -> String {
        let mut db = self.db.lock().unwrap();
        db.stories.push(json!({
            "storyId": story_id,
            "title": title,
            "author": "Seeded Author",
            "url": url,
            "username": username,
            "createdAt": "2021-03-04T05:06:07.890Z",
            "updatedAt": "2021-03-04T05:06:07.890Z",
        }));
        if let Some(account) = db.accounts.get_mut(username) {
            account.stories.push(story_id.to_string());
        }
        story_id.to_string()
    }

    /// Seeds a raw story record, valid or not.
    pub fn seed_raw_story(&self, record: Value) {
        self.db.lock().unwrap().stories.push(record);
    }

    /// Seeds an account and returns a valid token for it.
    pub fn seed_user(&self, username: &str, password: &str, name: &str) -> String {
        let mut db = self.db.lock().unwrap();
        db.accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                name: name.to_string(),
                created_at: "2021-01-01T00:00:00.000Z".to_string(),
                favorites: vec![],
                stories: vec![],
            },
        );
        db.issue_token(username)
    }

    /// Marks an existing story as one of `username`'s favorites.
    pub fn seed_favorite(&self, username: &str, story_id: &str) {
        let mut db = self.db.lock().unwrap();
        if let Some(account) = db.accounts.get_mut(username) {
            account.favorites.insert(0, story_id.to_string());
        }
    }

    pub fn favorites_of(&self, username: &str) -> Vec<String> {
        self.db.lock().unwrap().accounts[username].favorites.clone()
    }

    pub fn story_ids(&self) -> Vec<String> {
        self.db
            .lock()
            .unwrap()
            .stories
            .iter()
            .filter_map(|s| s["storyId"].as_str().map(str::to_string))
            .collect()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.db.lock().unwrap().hits.get(route).copied().unwrap_or(0)
    }

    fn hit(&self, route: &'static str) {
        *self.db.lock().unwrap().hits.entry(route).or_default() += 1;
    }

    /// Serves the backend on 127.0.0.1 and returns its base URL.
    pub async fn spawn(&self) -> Url {
        let router = Router::new()
            .route("/stories", get(list_stories).post(create_story))
            .route("/stories/{story_id}", get(get_story).delete(delete_story))
            .route("/signup", post(signup))
            .route("/login", post(login))
            .route("/users/{username}", get(get_user))
            .route(
                "/users/{username}/favorites/{story_id}",
                post(add_favorite).delete(remove_favorite),
            )
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct NewStory {
    title: Option<String>,
    author: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct CreateStory {
    token: String,
    story: NewStory,
}

#[derive(Deserialize)]
struct Credentials {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct UserBody {
    user: Credentials,
}

async fn list_stories(State(backend): State<FakeBackend>) -> Json<Value> {
    backend.hit("GET /stories");
    let stories = backend.db.lock().unwrap().stories.clone();
    Json(json!({ "stories": stories }))
}

async fn get_story(State(backend): State<FakeBackend>, Path(story_id): Path<String>) -> Reply {
    backend.hit("GET /stories/{id}");
    let db = backend.db.lock().unwrap();
    db.story(&story_id)
        .map(|story| Json(json!({ "story": story })))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, &format!("No story with id '{}'", story_id)))
}

async fn create_story(State(backend): State<FakeBackend>, Json(body): Json<CreateStory>) -> Reply {
    backend.hit("POST /stories");
    let mut db = backend.db.lock().unwrap();
    let username = db.owner_of(&body.token)?;
    let (Some(title), Some(author), Some(url)) = (body.story.title, body.story.author, body.story.url)
    else {
        return Err(reject(StatusCode::BAD_REQUEST, "Story needs title, author and url"));
    };
    let story_id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let story = json!({
        "storyId": story_id,
        "title": title,
        "author": author,
        "url": url,
        "username": username,
        "createdAt": now,
        "updatedAt": now,
    });
    db.stories.insert(0, story.clone());
    if let Some(account) = db.accounts.get_mut(&username) {
        account.stories.insert(0, story_id);
    }
    Ok(Json(json!({ "story": story })))
}

async fn delete_story(
    State(backend): State<FakeBackend>,
    Path(story_id): Path<String>,
    Json(body): Json<TokenBody>,
) -> Reply {
    backend.hit("DELETE /stories/{id}");
    let mut db = backend.db.lock().unwrap();
    let username = db.owner_of(&body.token)?;
    let story = db
        .story(&story_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "No such story"))?;
    if story["username"] != username.as_str() {
        return Err(reject(StatusCode::FORBIDDEN, "Not your story"));
    }
    db.stories.retain(|s| s["storyId"] != story_id.as_str());
    for account in db.accounts.values_mut() {
        account.stories.retain(|id| *id != story_id);
        account.favorites.retain(|id| *id != story_id);
    }
    Ok(Json(json!({ "message": "Deleted", "story": story })))
}

async fn signup(State(backend): State<FakeBackend>, Json(body): Json<UserBody>) -> Reply {
    backend.hit("POST /signup");
    let mut db = backend.db.lock().unwrap();
    let (Some(username), Some(password), Some(name)) =
        (body.user.username, body.user.password, body.user.name)
    else {
        return Err(reject(StatusCode::BAD_REQUEST, "Missing user fields"));
    };
    if db.accounts.contains_key(&username) {
        return Err(reject(
            StatusCode::CONFLICT,
            &format!("There is already a user with username '{}'", username),
        ));
    }
    db.accounts.insert(
        username.clone(),
        Account {
            password,
            name,
            created_at: chrono::Utc::now().to_rfc3339(),
            favorites: vec![],
            stories: vec![],
        },
    );
    let token = db.issue_token(&username);
    Ok(Json(json!({ "user": db.user_json(&username), "token": token })))
}

async fn login(State(backend): State<FakeBackend>, Json(body): Json<UserBody>) -> Reply {
    backend.hit("POST /login");
    let mut db = backend.db.lock().unwrap();
    let username = body.user.username.unwrap_or_default();
    let account = db
        .accounts
        .get(&username)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, &format!("No such user: {}", username)))?;
    if body.user.password.as_deref() != Some(account.password.as_str()) {
        return Err(reject(StatusCode::UNAUTHORIZED, "Invalid password"));
    }
    let token = db.issue_token(&username);
    Ok(Json(json!({ "user": db.user_json(&username), "token": token })))
}

async fn get_user(
    State(backend): State<FakeBackend>,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    backend.hit("GET /users/{username}");
    let db = backend.db.lock().unwrap();
    let token = params.get("token").cloned().unwrap_or_default();
    if db.owner_of(&token)? != username {
        return Err(reject(StatusCode::UNAUTHORIZED, "Token does not match user"));
    }
    Ok(Json(json!({ "user": db.user_json(&username) })))
}

async fn add_favorite(
    State(backend): State<FakeBackend>,
    Path((username, story_id)): Path<(String, String)>,
    Json(body): Json<TokenBody>,
) -> Reply {
    backend.hit("POST /users/{username}/favorites/{id}");
    let mut db = backend.db.lock().unwrap();
    if db.owner_of(&body.token)? != username {
        return Err(reject(StatusCode::UNAUTHORIZED, "Token does not match user"));
    }
    if db.story(&story_id).is_none() {
        return Err(reject(StatusCode::NOT_FOUND, "No such story"));
    }
    if let Some(account) = db.accounts.get_mut(&username) {
        account.favorites.insert(0, story_id);
    }
    Ok(Json(json!({ "message": "Favorite added!", "user": db.user_json(&username) })))
}

async fn remove_favorite(
    State(backend): State<FakeBackend>,
    Path((username, story_id)): Path<(String, String)>,
    Json(body): Json<TokenBody>,
) -> Reply {
    backend.hit("DELETE /users/{username}/favorites/{id}");
    let mut db = backend.db.lock().unwrap();
    if db.owner_of(&body.token)? != username {
        return Err(reject(StatusCode::UNAUTHORIZED, "Token does not match user"));
    }
    if let Some(account) = db.accounts.get_mut(&username) {
        account.favorites.retain(|id| *id != story_id);
    }
    Ok(Json(json!({ "message": "Favorite removed!", "user": db.user_json(&username) })))
}
