#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use guessr_core::clock::{Clock, FixedClock};
use guessr_core::player::{RawPlayer, RawPlayerEntry, RawStatistics, RawTeam};
use guessr_core::sources::{ImageSource, PlayerSource, SourceError};
use guessr_game::DailyGame;
use guessr_provider::ProviderConfig;
use guessr_store::{CacheStore, NameStore};
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tower::ServiceExt;

use guessr_api::config::ServerConfig;
use guessr_api::router::build_app_router;
use guessr_api::state::AppState;

// ---------------------------------------------------------------------------
// Upstream doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StubPlayers {
    pub pool: Vec<RawPlayerEntry>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PlayerSource for StubPlayers {
    async fn fetch_pool(&self) -> Result<Vec<RawPlayerEntry>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pool.clone())
    }
}

#[derive(Default)]
pub struct StubImages {
    pub fail: bool,
}

#[async_trait]
impl ImageSource for StubImages {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, SourceError> {
        if self.fail {
            return Err(SourceError::Request("timed out".into()));
        }
        // Hard vertical edge, so each blur strength renders differently.
        let img = RgbImage::from_fn(96, 96, |x, _| {
            if x < 48 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

/// Wall-clock time shifted to start at a chosen instant, so sub-second
/// offsets behave as they do in production.
pub struct RunningClock {
    start: DateTime<Utc>,
    origin: std::time::Instant,
}

impl RunningClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            origin: std::time::Instant::now(),
        }
    }
}

impl Clock for RunningClock {
    fn now(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::from_std(self.origin.elapsed()).unwrap()
    }
}

pub fn entry(id: i64, name: &str, country: &str, club: &str) -> RawPlayerEntry {
    RawPlayerEntry {
        player: Some(RawPlayer {
            id: Some(id),
            name: Some(name.into()),
            nationality: Some(country.into()),
            photo: Some(format!("https://img.test/{id}.png")),
        }),
        statistics: vec![RawStatistics {
            team: Some(RawTeam {
                name: Some(club.into()),
            }),
        }],
    }
}

/// A single-player pool, so the daily pick is known in advance.
pub fn haaland_pool() -> Vec<RawPlayerEntry> {
    vec![entry(1100, "Erling Haaland", "Norway", "Manchester City")]
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and files under `dir`.
pub fn test_config(dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cache_file: dir.join("daily_player_cache.json"),
        player_names_file: dir.join("player_names.json"),
        daily_check_interval_secs: 86_400,
        provider: ProviderConfig {
            api_key: "test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            leagues: vec!["39".to_string()],
            season: "2022".to_string(),
            timeout: Duration::from_secs(1),
        },
    }
}

pub struct TestApp {
    pub app: Router,
    pub game: Arc<DailyGame>,
    pub clock: Arc<FixedClock>,
    pub players: Arc<StubPlayers>,
    pub dir: tempfile::TempDir,
}

impl TestApp {
    pub fn cache_file(&self) -> PathBuf {
        self.dir.path().join("daily_player_cache.json")
    }

    pub fn names_file(&self) -> PathBuf {
        self.dir.path().join("player_names.json")
    }
}

/// Build the full application router over stub upstreams, with the clock
/// fixed at 2024-11-09 12:00 UTC.
pub fn build_test_app(
    pool: Vec<RawPlayerEntry>,
    backup: Vec<RawPlayerEntry>,
    images: StubImages,
) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 11, 9, 12, 0, 0).unwrap(),
    ));
    let players = Arc::new(StubPlayers {
        pool,
        ..Default::default()
    });

    let game = Arc::new(
        DailyGame::new(
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::clone(&players) as Arc<dyn PlayerSource>,
            Arc::new(images),
            CacheStore::new(&config.cache_file),
            NameStore::new(&config.player_names_file),
        )
        .with_backup(backup),
    );

    let state = AppState {
        game: Arc::clone(&game),
    };

    TestApp {
        app: build_app_router(state, &config),
        game,
        clock,
        players,
        dir,
    }
}

/// A bare game over stub upstreams and files in `dir`, driven by `clock`.
pub fn build_game(
    clock: Arc<dyn Clock>,
    pool: Vec<RawPlayerEntry>,
    dir: &std::path::Path,
) -> DailyGame {
    DailyGame::new(
        clock,
        Arc::new(StubPlayers {
            pool,
            ..Default::default()
        }),
        Arc::new(StubImages::default()),
        CacheStore::new(dir.join("daily_player_cache.json")),
        NameStore::new(dir.join("player_names.json")),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
