use serde::Deserialize;

/// Part of the video an answer of the question-answering service refers to.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReferenceSegment {
    /// Start of the segment, in seconds.
    pub start_time: f64,
    /// End of the segment, in seconds.
    pub end_time: f64,
    /// Transcript of the segment.
    pub text: String,
}

impl ReferenceSegment {
    /// Label of the segment's start, as displayed on its seek button.
    pub fn label(&self) -> String {
        format_timestamp(self.start_time)
    }
}

/// Answer payload of the question-answering service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(default)]
    pub relevant_segments: Vec<ReferenceSegment>,
}

/// Parse the JSON answer payload of the question-answering service.
pub fn parse_chat_answer(json: &str) -> Result<ChatAnswer, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse the JSON answer payload of the question-answering service, only keeping the segments
/// it refers to.
pub fn parse_reference_segments(json: &str) -> Result<Vec<ReferenceSegment>, serde_json::Error> {
    parse_chat_answer(json).map(|answer| answer.relevant_segments)
}

/// Format a position in seconds as `m:ss`, minutes being unbounded.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0. {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
