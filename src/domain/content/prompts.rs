use crate::domain::script::DEFAULT_DELIMITER;
use chrono::NaiveDate;

/// Show identity the drafting prompt is written around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowProfile {
    pub show_name: String,
    pub host: String,
    pub co_host: String,
    pub sign_off: String,
    pub delimiter: String,
}

impl Default for ShowProfile {
    fn default() -> Self {
        Self {
            show_name: "AI Daily Pulse".to_string(),
            host: "Alex".to_string(),
            co_host: "Marcus".to_string(),
            sign_off: "This podcast is a production of Sundaram Labs. Subscribe for more daily AI insights."
                .to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// `covered` lists headlines from recent episodes the briefing must not repeat
pub fn research_prompt(topics: &[String], today: NaiveDate, covered: &[String]) -> String {
    let exclusions = if covered.is_empty() {
        String::new()
    } else {
        format!(
            "EXCLUSION RULES:\n\
             - Do NOT repeat the following stories which were already covered in recent episodes:\n  {}\n\n",
            covered.join(", ")
        )
    };
    let focus_areas = topics
        .iter()
        .enumerate()
        .map(|(i, topic)| format!("{}. {}", i + 1, topic))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Research top AI developments from the last 24-48 hours ({today}) based on these focus areas:\n\
         {focus_areas}\n\n\
         CRITICAL: If there are trending AI breakthroughs, major leaks, or significant M&A news NOT in this list, \
         auto-inject them into your search to ensure the most relevant broadcast.\n\n\
         {exclusions}\
         Format your response as a detailed intelligence briefing.\n\
         At the end of your response, add a section marked [METADATA] with:\n\
         - TOP_STORIES: [List the 3 most unique and significant news stories discovered today, separated by commas.]\n\
         - AUTO_INJECTED: [List any extra areas you searched for because they were trending]\n\
         - SUGGESTIONS: [List 3-5 emerging topics]",
        today = today.format("%Y-%m-%d"),
        focus_areas = focus_areas,
        exclusions = exclusions,
    )
}

pub fn script_prompt(profile: &ShowProfile, briefing: &str) -> String {
    format!(
        "Write a conversation for \"{show}\".\n\n\
         Hosts:\n\
         - {host} (Technical skeptic, Male, deep voice).\n\
         - {co_host} (Business optimist, Male, energetic).\n\n\
         Constraint: Write a full 15-minute conversational deep dive.\n\n\
         Style: Fast-paced, professional.\n\
         MANDATORY SIGN-OFF: The last line must be {co_host} saying: \"{sign_off}\"\n\n\
         Script Format:\n\
         {host}: [Dialogue]\n\
         {co_host}: [Dialogue]\n\
         {delimiter}\n\n\
         News Content:\n\
         {briefing}",
        show = profile.show_name,
        host = profile.host,
        co_host = profile.co_host,
        sign_off = profile.sign_off,
        delimiter = profile.delimiter,
        briefing = briefing,
    )
}
