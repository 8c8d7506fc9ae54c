use crate::e2e::helpers;

use helpers::assertions::{assert_episode_shape, transition_targets};
use helpers::{TestContext, BASE_URL, TRIGGER_TOKEN};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_trigger_without_token(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/broadcasts", &json!({}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Authentication failed");
    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_trigger_with_wrong_token(ctx: &TestContext) {
    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", "not-the-token")
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = ctx
        .client
        .get_with_auth("/api/episodes", "not-the-token")
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_publish_full_episode(ctx: &TestContext) {
    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let body = response.json();

    assert_eq!(body["mode"], "full");
    assert_eq!(body["state"], "completed");
    assert_eq!(body["segmentCount"], 2);
    assert_eq!(body["historyLen"], 1);
    assert!(body["requestId"].as_str().is_some());
    assert_eq!(
        transition_targets(body),
        vec![
            "researching",
            "scripting",
            "synthesizing",
            "assembling",
            "encoding",
            "recording",
            "completed"
        ]
    );

    let episode = &body["episode"];
    assert_episode_shape(episode);
    assert_eq!(episode["title"], "AI Pulse: Chip deal");
    assert_eq!(
        episode["mainStories"],
        json!(["Chip deal", "Model X ships", "Robot startup"])
    );

    // Segments reach the speech service in script order, one call each
    assert_eq!(
        *ctx.tts.texts.lock(),
        vec!["Alex: hi".to_string(), "Marcus: bye".to_string()]
    );

    // The encoder sees the segments concatenated in order
    let mut expected = vec![0u8; 10];
    expected.extend(vec![1u8; 10]);
    assert_eq!(*ctx.encoder.encoded.lock(), vec![expected]);

    let audio_path = body["audioPath"].as_str().unwrap();
    assert!(std::path::Path::new(audio_path).exists());

    // History and feed agree with the report
    let history = ctx.fixtures.history().await.unwrap();
    assert_eq!(history.len(), 1);
    let stored = history.latest().unwrap();
    assert_eq!(stored.id, body["episodeId"].as_str().unwrap());
    assert!(stored.audio_url.starts_with(BASE_URL));

    let feed = ctx.fixtures.read_feed().unwrap();
    assert!(feed.contains(&stored.audio_url));
    assert!(feed.contains("AI Pulse: Chip deal"));
    assert!(feed.contains("<li>Chip deal</li>"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_publish_diagnostic_tone_without_remote_calls(ctx: &TestContext) {
    let response = ctx
        .client
        .post_with_auth("/api/broadcasts", &json!({ "diagnostic": true }), TRIGGER_TOKEN)
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let body = response.json();

    assert_eq!(body["mode"], "diagnostic");
    assert_eq!(body["state"], "completed");
    assert_eq!(transition_targets(body), vec!["recording", "completed"]);
    assert_eq!(body["episode"]["title"], "Diagnostic Signal");
    assert_eq!(body["episode"]["mainStories"], json!(["System Check"]));

    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.tts.attempts.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.encoder.tones.load(Ordering::SeqCst), 1);

    let feed = ctx.fixtures.read_feed().unwrap();
    assert!(feed.contains("Diagnostic Signal"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_without_publishing_when_research_fails(ctx: &TestContext) {
    ctx.content.fail_research.store(true, Ordering::SeqCst);

    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("ResearchError");

    assert!(ctx.fixtures.history().await.unwrap().is_empty());
    assert!(!ctx.fixtures.feed_path().exists());
    assert_eq!(ctx.tts.attempts.load(Ordering::SeqCst), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_retry_transient_speech_failures(ctx: &TestContext) {
    ctx.tts.failures_before_success.store(3, Ordering::SeqCst);

    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    // Three failures then success on the first segment, one call for the second
    assert_eq!(ctx.tts.attempts.load(Ordering::SeqCst), 5);
    assert_eq!(ctx.fixtures.history().await.unwrap().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_speech_retries_are_exhausted(ctx: &TestContext) {
    ctx.tts.failures_before_success.store(100, Ordering::SeqCst);

    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("SynthesisError");
    assert_eq!(ctx.tts.attempts.load(Ordering::SeqCst), 4);
    assert!(ctx.encoder.encoded.lock().is_empty());
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_trigger_while_run_in_progress(ctx: &TestContext) {
    ctx.content.hold.store(true, Ordering::SeqCst);

    let client = ctx.client.clone();
    let first = tokio::spawn(async move {
        client
            .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
            .await
    });

    // Wait until the first run is parked inside research
    for _ in 0..100 {
        if ctx.content.research_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 1);

    let second = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();
    second
        .assert_status(StatusCode::CONFLICT)
        .assert_error_message("already running");

    ctx.content.release.notify_one();
    let first = first.await.unwrap().unwrap();
    first.assert_status(StatusCode::CREATED);

    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.fixtures.history().await.unwrap().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_finish_run_after_client_disconnects(ctx: &TestContext) {
    ctx.content.hold.store(true, Ordering::SeqCst);

    let client = ctx.client.clone();
    let caller = tokio::spawn(async move {
        client
            .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
            .await
    });

    for _ in 0..100 {
        if ctx.content.research_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 1);

    // Drop the connection while the run is parked
    caller.abort();
    assert!(caller.await.unwrap_err().is_cancelled());
    ctx.content.release.notify_one();

    let mut published = 0;
    for _ in 0..200 {
        published = ctx.fixtures.history().await.map(|h| h.len()).unwrap_or(0);
        if published == 1 && ctx.fixtures.read_feed().is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(published, 1);
    assert!(ctx.fixtures.read_feed().unwrap().contains("<item>"));

    // The guard is released once the detached run finishes
    let mut status = StatusCode::CONFLICT;
    for _ in 0..100 {
        let next = ctx
            .client
            .post_with_auth("/api/broadcasts", &json!({ "diagnostic": true }), TRIGGER_TOKEN)
            .await
            .unwrap();
        status = next.status;
        if status != StatusCode::CONFLICT {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(status, StatusCode::CREATED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_trigger_body(ctx: &TestContext) {
    for body in [r#"{"diagnostic":"yes"}"#, "{not json", r#"{"diagnostc":true}"#] {
        let response = ctx
            .client
            .post_raw_with_auth("/api/broadcasts", "application/json", body, TRIGGER_TOKEN)
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("invalid broadcast request");
    }

    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.encoder.tones.load(Ordering::SeqCst), 0);
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
    assert!(ctx.fixtures.read_feed().is_err());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_read_trigger_body_regardless_of_content_type(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw_with_auth(
            "/api/broadcasts",
            "application/x-www-form-urlencoded",
            r#"{"diagnostic":true}"#,
            TRIGGER_TOKEN,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json()["mode"], "diagnostic");
    assert_eq!(ctx.content.research_calls.load(Ordering::SeqCst), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_episodes_newest_first(ctx: &TestContext) {
    let seeded = ctx.fixtures.seed_history(2).await.unwrap();

    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    let new_id = response.json()["episodeId"].as_str().unwrap().to_string();

    let response = ctx
        .client
        .get_with_auth("/api/episodes", TRIGGER_TOKEN)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let episodes = response.json().as_array().unwrap();
    assert_eq!(episodes.len(), 3);
    episodes.iter().for_each(assert_episode_shape);

    let ids: Vec<&str> = episodes.iter().map(|e| e["id"].as_str().unwrap()).collect();
    let seeded_ids: Vec<&str> = seeded.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids[0], new_id);
    assert_eq!(&ids[1..], seeded_ids.as_slice());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_evict_oldest_episodes_beyond_cap(ctx: &TestContext) {
    // The test server keeps at most three episodes
    let seeded = ctx.fixtures.seed_history(3).await.unwrap();
    let oldest = seeded.episodes().last().unwrap().id.clone();

    let response = ctx
        .client
        .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
        .await
        .unwrap();
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json()["historyLen"], 3);

    let history = ctx.fixtures.history().await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(!history.contains(&oldest));

    // Surviving episodes are carried over untouched
    assert_eq!(history.episodes()[1..], seeded.episodes()[..2]);

    let feed = ctx.fixtures.read_feed().unwrap();
    assert_eq!(feed.matches("<item>").count(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_earlier_episodes_across_runs(ctx: &TestContext) {
    for _ in 0..2 {
        let response = ctx
            .client
            .post_empty_with_auth("/api/broadcasts", TRIGGER_TOKEN)
            .await
            .unwrap();
        response.assert_status(StatusCode::CREATED);
        // Episode ids have millisecond resolution
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let history = ctx.fixtures.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.episodes()[0].date > history.episodes()[1].date);
}
