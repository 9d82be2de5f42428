use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: String,
    pub doi: String,
    pub paper_url: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisMethod {
    pub reagents: Vec<String>,
    pub conditions: String,
    pub time: String,
    pub temp: String,
    #[serde(rename = "yield")]
    pub yield_: String,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub cas_number: String,
    pub synthesis_methods: Vec<SynthesisMethod>,
    pub total_methods: usize,
}

impl SynthesisResult {
    pub fn new(cas_number: impl Into<String>, synthesis_methods: Vec<SynthesisMethod>) -> Self {
        let total_methods = synthesis_methods.len();
        Self {
            cas_number: cas_number.into(),
            synthesis_methods,
            total_methods,
        }
    }
}

/// Chat prompt sent upstream, with the JSON schema the answer should follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub schema: serde_json::Value,
}
