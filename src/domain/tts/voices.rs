use serde::{Deserialize, Serialize};

/// A script speaker label bound to a prebuilt voice of the speech service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice: String,
}

impl SpeakerVoice {
    pub fn new(speaker: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            voice: voice.into(),
        }
    }
}

/// The show's two fixed roles. The script prefixes every line with one of
/// the speaker labels (`Alex: ...`), which the service maps to a voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAssignment {
    pub host: SpeakerVoice,
    pub co_host: SpeakerVoice,
}

impl VoiceAssignment {
    pub fn new(host: SpeakerVoice, co_host: SpeakerVoice) -> Self {
        Self { host, co_host }
    }

    pub fn speakers(&self) -> [&SpeakerVoice; 2] {
        [&self.host, &self.co_host]
    }
}

impl Default for VoiceAssignment {
    fn default() -> Self {
        Self {
            host: SpeakerVoice::new("Alex", "Kore"),
            co_host: SpeakerVoice::new("Marcus", "Puck"),
        }
    }
}
