use crate::domain::cas::CasNumber;
use crate::domain::model::Prompt;
use serde_json::json;

const SYSTEM_MESSAGE: &str = "You are an organic chemist who synthesizes compounds. \
Do not change the order of the naming conventions of the compounds.";

pub fn build_prompt(cas_number: &CasNumber) -> Prompt {
    Prompt {
        system: SYSTEM_MESSAGE.to_string(),
        user: user_message(cas_number),
        schema: response_schema(),
    }
}

fn user_message(cas_number: &CasNumber) -> String {
    format!(
        r#"Find the top 3 most cited peer-reviewed journal articles that describe experimental procedures for synthesizing exactly the compound with CAS number {cas}. Do NOT include derivatives, analogs, or substituted versions.

Answer with a single JSON object and nothing else, no prologue or epilogue. The object has one key, "synthesis_methods", holding one entry per article:
- reagents: list of all starting materials and solvents
- conditions: reaction conditions (atmosphere, pressure, catalyst) as reported
- time: reaction time
- temp: reaction temperature
- yield: reported yield percentage
- source: title, authors, journal (name, volume, pages), year, doi, paper_url, and summary (the complete experimental method as a single paragraph)

Search constraints:
- TARGET COMPOUND ONLY: the exact compound with CAS number {cas}, with no structural modifications
- SINGLE-STEP SYNTHESIS ONLY: exclude multi-step procedures, protection/deprotection sequences, cascading or multi-component reactions
- All starting materials must be commercially available (no pre-synthesized intermediates)
- Only procedures from peer-reviewed journals (no patents, reviews, or book chapters)
- Rank articles by total citation count
- Each procedure must produce the target compound as the sole product, not as an intermediate or side product
- Each citation must come from a different research group or institution
- Include exact temperatures and reaction times
- Leave a field as an empty string when the article does not report it"#,
        cas = cas_number
    )
}

fn response_schema() -> serde_json::Value {
    let text = json!({ "type": "string" });
    json!({
        "type": "object",
        "properties": {
            "synthesis_methods": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "reagents": { "type": "array", "items": text },
                        "conditions": text,
                        "time": text,
                        "temp": text,
                        "yield": text,
                        "source": {
                            "type": "object",
                            "properties": {
                                "title": text,
                                "authors": text,
                                "journal": text,
                                "year": text,
                                "doi": text,
                                "paper_url": text,
                                "summary": text
                            },
                            "required": ["title", "journal", "year", "doi"]
                        }
                    },
                    "required": ["reagents", "conditions", "yield", "source"]
                }
            }
        },
        "required": ["synthesis_methods"]
    })
}
