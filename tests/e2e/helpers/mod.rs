use pulsecast::{
    controllers::broadcast::BroadcastController,
    domain::{
        audio::DiagnosticTone,
        content::{default_topics, ContentService, ShowProfile},
        episode::EpisodeStore,
        feed::{FeedChannel, FeedPublisher},
        pipeline::{BroadcastPipeline, BroadcastSettings},
        script::{Chunker, PhoneticRules, DEFAULT_DELIMITER},
        tts::{RetryPolicy, SynthesizerClient, VoiceAssignment},
    },
    infrastructure::{
        auth::TriggerToken,
        http::router,
        repositories::{EpisodeRepository, FeedRepository},
    },
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod assertions;
pub mod mocks;

use api_client::TestClient;
use fixtures::TestFixtures;
use mocks::{CopyEncoder, MockContentRepository, MockTtsRepository};

pub const TRIGGER_TOKEN: &str = "test-trigger-token";
pub const BASE_URL: &str = "https://example.org/pulse";

pub struct TestContext {
    pub client: TestClient,
    pub fixtures: TestFixtures,
    pub content: Arc<MockContentRepository>,
    pub tts: Arc<MockTtsRepository>,
    pub encoder: Arc<CopyEncoder>,
    pub data_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let data_dir = tempfile::tempdir().expect("Failed to create data dir");

            let content = Arc::new(MockContentRepository::default());
            let tts = Arc::new(MockTtsRepository::default());
            let encoder = Arc::new(CopyEncoder::default());

            // Instantiate repositories
            let episode_repo = Arc::new(EpisodeRepository::new(
                data_dir.path().join("episodes.json"),
            ));
            let feed_repo = Arc::new(FeedRepository::new(data_dir.path().join("feed.xml")));

            // Instantiate services, with fast retries so tests stay quick
            let content_service = Arc::new(ContentService::new(
                content.clone(),
                default_topics(),
                ShowProfile::default(),
            ));
            let synthesizer = Arc::new(SynthesizerClient::new(
                tts.clone(),
                VoiceAssignment::default(),
                RetryPolicy::new(4, Duration::from_millis(1)),
                Duration::ZERO,
            ));
            let episode_store = Arc::new(EpisodeStore::new(episode_repo.clone(), 3));
            let feed_publisher = Arc::new(FeedPublisher::new(
                feed_repo,
                FeedChannel::default(),
                BASE_URL.to_string(),
            ));

            let pipeline = Arc::new(BroadcastPipeline::new(
                content_service,
                Chunker::new(DEFAULT_DELIMITER, 1000, 5, PhoneticRules::default()),
                synthesizer,
                encoder.clone(),
                episode_store.clone(),
                feed_publisher,
                BroadcastSettings {
                    show_title: "AI Pulse".to_string(),
                    base_url: BASE_URL.to_string(),
                    audio_dir: data_dir.path().join("audio"),
                    work_dir: data_dir.path().join("work"),
                    run_timeout: None,
                    tone: DiagnosticTone::default(),
                    exclusion_window: 3,
                },
            ));

            // Instantiate controllers
            let broadcast_controller =
                Arc::new(BroadcastController::new(pipeline, episode_store, false));

            let app = router(
                TriggerToken(Some(TRIGGER_TOKEN.to_string())),
                episode_repo.clone(),
                broadcast_controller,
            );

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                fixtures: TestFixtures::new(data_dir.path(), episode_repo),
                content,
                tts,
                encoder,
                data_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // the temp data dir is removed on drop
        }
    }
}
