#![allow(dead_code)]

use board_game_reviews::{get_random_free_port, init_db, make_router, serve};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub pool: SqlitePool,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn patch_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }
}

/// Starts the router on a free local port over a freshly seeded
/// in-memory database.
pub async fn spawn_app() -> TestApp {
    let pool = init_db("sqlite::memory:")
        .await
        .expect("could not open in-memory database");
    seed(&pool).await;

    let (listener, addr) = get_random_free_port().expect("no free port");
    tokio::spawn(serve(make_router(pool.clone()), listener));

    TestApp {
        address: format!("http://{}", addr),
        client: reqwest::Client::new(),
        pool,
    }
}

pub async fn message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("error body is not JSON");
    body["msg"].as_str().unwrap_or_default().to_owned()
}

const CATEGORIES: &[(&str, &str)] = &[
    ("euro game", "Abstact games that involve little luck"),
    ("social deduction", "Players attempt to uncover each other's hidden role"),
    ("dexterity", "Games involving physical skill"),
    ("children's games", "Games suitable for children"),
];

const USERS: &[(&str, &str, &str)] = &[
    (
        "mallionaire",
        "haz",
        "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
    ),
    (
        "philippaclaire9",
        "philippa",
        "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
    ),
    (
        "bainesface",
        "sarah",
        "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
    ),
    (
        "dav3rid",
        "dave",
        "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png",
    ),
];

const IMG: &str = "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png";

// (title, designer, votes, category, owner, created_at)
const REVIEWS: &[(&str, &str, i64, &str, &str, &str)] = &[
    ("Agricola", "Uwe Rosenberg", 1, "euro game", "mallionaire", "2021-01-18 10:00:20"),
    ("Jenga", "Leslie Scott", 5, "dexterity", "philippaclaire9", "2021-01-18 10:01:41"),
    ("Ultimate Werewolf", "Akihisa Okui", 5, "social deduction", "bainesface", "2021-01-18 10:01:41"),
    ("Dolor reprehenderit", "Gamey McGameface", 7, "social deduction", "mallionaire", "2021-01-22 11:35:50"),
    ("Proident tempor et.", "Seymour Buttz", 5, "social deduction", "mallionaire", "2021-01-22 10:37:04"),
    ("Occaecat consequat officia", "Avery Wunzboogerz", 5, "social deduction", "mallionaire", "2021-02-05 11:27:26"),
    ("Mollit elit qui incididunt", "Don Keigh", 9, "social deduction", "mallionaire", "2021-01-25 11:16:54"),
    ("One Night Ultimate Werewolf", "Akihisa Okui", 5, "social deduction", "mallionaire", "2021-01-18 10:01:41"),
    ("A truly Quacking Game; Quacks of Quedlinburg", "Wolfgang Warsch", 10, "social deduction", "mallionaire", "2021-01-18 10:01:41"),
    ("Build you own tour de Yorkshire", "Asger Harding Granerud", 10, "social deduction", "mallionaire", "2021-01-18 10:01:41"),
    ("That's just what an evil person would say!", "Fiona Lohoar", 8, "social deduction", "mallionaire", "2021-01-18 10:01:41"),
    ("Scythe; you're gonna need a bigger table!", "Jamey Stegmaier", 100, "social deduction", "mallionaire", "2021-01-22 10:37:04"),
    ("Settlers of Catan: Don't Settle For Less", "Klaus Teuber", 16, "social deduction", "mallionaire", "1970-01-10 02:08:38"),
];

// (author, review_id, votes, created_at, body)
const COMMENTS: &[(&str, i64, i64, &str, &str)] = &[
    ("bainesface", 2, 16, "2017-11-22 12:43:33", "I loved this game too!"),
    ("mallionaire", 3, 13, "2021-01-18 10:09:05", "My dog loved this game too!"),
    ("philippaclaire9", 3, 10, "2021-01-18 10:09:48", "I didn't know dogs could play games"),
    ("bainesface", 2, 10, "2021-01-18 10:24:05", "EPIC board game!"),
    ("mallionaire", 2, 10, "2021-01-18 10:24:05", "Now this is a story all about how, board games turned my life upside down"),
    ("philippaclaire9", 3, 10, "2021-03-27 19:48:58", "Not sure about dogs, but my cat likes to get involved with board games"),
];

pub const REVIEW_COUNT: i64 = 13;
pub const CATEGORY_COUNT: i64 = 4;

pub async fn seed(pool: &SqlitePool) {
    for (slug, description) in CATEGORIES {
        sqlx::query("INSERT INTO categories (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await
            .expect("seed categories");
    }
    for (username, name, avatar_url) in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(name)
            .bind(avatar_url)
            .execute(pool)
            .await
            .expect("seed users");
    }
    for (title, designer, votes, category, owner, created_at) in REVIEWS {
        sqlx::query(
            r#"
            INSERT INTO reviews (title, review_body, designer, review_img_url, votes, category, owner, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(title)
        .bind(format!("{} review", title))
        .bind(designer)
        .bind(IMG)
        .bind(votes)
        .bind(category)
        .bind(owner)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("seed reviews");
    }
    for (author, review_id, votes, created_at, body) in COMMENTS {
        sqlx::query(
            r#"
            INSERT INTO comments (author, review_id, votes, created_at, body)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(author)
        .bind(review_id)
        .bind(votes)
        .bind(created_at)
        .bind(body)
        .execute(pool)
        .await
        .expect("seed comments");
    }
}
