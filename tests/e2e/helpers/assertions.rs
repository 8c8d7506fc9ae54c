use serde_json::Value;

/// Fields every published episode carries, in their persisted casing
pub fn assert_episode_shape(episode: &Value) {
    assert!(episode.get("id").and_then(|v| v.as_str()).is_some(), "Missing id");
    assert!(episode.get("date").and_then(|v| v.as_str()).is_some(), "Missing date");
    assert!(episode.get("title").and_then(|v| v.as_str()).is_some(), "Missing title");
    assert!(
        episode.get("audioUrl").and_then(|v| v.as_str()).is_some(),
        "Missing audioUrl"
    );
    assert!(
        episode.get("mainStories").and_then(|v| v.as_array()).is_some(),
        "Missing mainStories"
    );
}

pub fn transition_targets(report: &Value) -> Vec<String> {
    report
        .get("transitions")
        .and_then(|v| v.as_array())
        .expect("Missing transitions")
        .iter()
        .filter_map(|t| t.get("to").and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect()
}
