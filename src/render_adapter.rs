use serde_json::{json, Value};
use crate::worksheet_engine::layout::SentenceDisplay;
use crate::worksheet_engine::models::Vocabulary;
use crate::worksheet_engine::normalizer::TagCount;
use crate::worksheet_engine::session::SentenceView;

/// Build the header tag list ("2 N", "1 V") with its style classes.
fn header_tags(tags: &[TagCount]) -> Value {
    Value::Array(
        tags.iter()
            .map(|t| {
                json!({
                    "abbr": t.pos_type.abbr(),
                    "name": t.pos_type.header_name(),
                    "class": t.pos_type.header_class(),
                    "count": t.count
                })
            })
            .collect(),
    )
}

/// Sentence line as a tagged object; ranges become `[start, end]` pairs.
fn display(d: &SentenceDisplay) -> Value {
    match d {
        SentenceDisplay::Original(text) => json!({ "mode": "original", "text": text }),
        SentenceDisplay::Corrected { text, spans, trailing } => json!({
            "mode": "corrected",
            "text": text,
            "spans": spans.iter().map(|s| json!({
                "range": [s.range.start, s.range.end],
                "wrong": s.wrong,
                "right": s.right,
                "kind": s.kind.as_str(),
                "latest": s.latest
            })).collect::<Vec<_>>(),
            "trailing": trailing.as_ref().map(|t| json!({ "text": t.text, "latest": t.latest }))
        }),
        SentenceDisplay::Fixed { text, highlight, labels } => json!({
            "mode": "fixed",
            "text": text,
            "highlight": highlight.as_ref().map(|r| [r.start, r.end]),
            "labels": labels.iter().map(|l| json!({
                "range": [l.range.start, l.range.end],
                "code": l.pos_type.code()
            })).collect::<Vec<_>>()
        }),
    }
}

fn vocabulary(v: &Vocabulary) -> Value {
    json!({
        "word": v.word,
        "type": v.word_type,
        "definition": v.definition,
        "simple": v.simple_definition,
        "examples": v.examples,
        "synonyms": v.synonyms,
        "antonyms": v.antonyms,
        "nonExamples": v.non_examples,
        "modelSentence": v.model_sentence,
        "starter": v.sentence_starter,
        "why": v.rationale
    })
}

/// Map a [`SentenceView`] to the JSON object the web client draws a card from.
///
/// Lists are already in display order (newest first). Sections that are not
/// revealed yet are `null`.
pub fn to_client_json(view: &SentenceView<'_>) -> Value {
    let corrections: Vec<Value> = view
        .corrections
        .iter()
        .map(|c| {
            json!({
                "number": c.number,
                "total": c.total,
                "wrong": String::from(c.correction.target.clone()),
                "right": c.correction.replacement,
                "kind": c.correction.kind.as_str(),
                "explanation": c.correction.explanation
            })
        })
        .collect();

    let pos: Vec<Value> = view
        .pos_tags
        .iter()
        .map(|p| {
            json!({
                "word": p.word,
                "prompt": p.prompt,
                "badge": p.pos_type.badge(),
                "class": p.pos_type.class()
            })
        })
        .collect();

    json!({
        "key": view.key.to_string(),
        "step": view.step,
        "phase": view.phase.number(),
        "button": {
            "text": view.button.to_string(),
            "disabled": !view.trigger_enabled(),
            "complete": view.phase.is_terminal()
        },
        "header": {
            "errors": view.header.error_count,
            "tags": header_tags(&view.header.tags)
        },
        "sentence": display(&view.display),
        "corrections": if corrections.is_empty() { Value::Null } else { Value::Array(corrections) },
        "pos": if pos.is_empty() { Value::Null } else { Value::Array(pos) },
        "manipulation": view.manipulation.as_ref().map(|m| json!({
            "task": m.task,
            "examples": m.examples
        })),
        "vocabulary": view.vocabulary.map(vocabulary)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{Catalog, Session};

    const DAY: &str = r#"[{"day": 1, "sentences": [{
        "orig": "me and him goes home", "fixed": "He and I go home.",
        "corr": [
            {"w": "me", "r": "He", "t": "grammar", "e": "Subject pronoun."},
            {"w": "(missing)", "r": ".", "t": "punctuation", "e": "Add a period."}
        ],
        "pos": [{"w": "go", "t": "V"}, {"w": "home", "t": "N"}],
        "manip": {"word": "home", "task": "Change the place.", "examples": ["He and I go to school."]},
        "vocab": {"w": "journey", "type": "noun", "def": "a trip", "simple": "trip",
                  "examples": ["a long journey"], "similar": ["trip"], "antonyms": [], "nonex": ["stay"],
                  "example": "Our journey was long.", "starter": "My journey...", "why": "Common word."}
    }]}]"#;

    fn session() -> Session {
        Session::with_defaults(Catalog::from_json_str(DAY).unwrap()).unwrap()
    }

    #[test]
    fn fresh_card_shows_original_and_no_sections() {
        let s = session();
        let v = to_client_json(&s.view(1, 0).unwrap());
        assert_eq!(v["phase"], 0);
        assert_eq!(v["button"]["text"], "Check Sentence");
        assert_eq!(v["sentence"]["mode"], "original");
        assert_eq!(v["header"]["errors"], 2);
        assert_eq!(v["header"]["tags"][0]["abbr"], "N");
        assert!(v["corrections"].is_null());
        assert!(v["vocabulary"].is_null());
    }

    #[test]
    fn corrections_render_newest_first_with_missing_marker() {
        let mut s = session();
        s.advance(1, 0).unwrap();
        s.advance(1, 0).unwrap();
        let v = to_client_json(&s.view(1, 0).unwrap());
        assert_eq!(v["corrections"][0]["number"], 2);
        assert_eq!(v["corrections"][0]["wrong"], "(missing)");
        assert_eq!(v["corrections"][1]["right"], "He");
        assert_eq!(v["sentence"]["trailing"]["text"], ".");
        assert_eq!(v["sentence"]["trailing"]["latest"], true);
    }

    #[test]
    fn completed_card_disables_button_and_shows_vocabulary() {
        let mut s = session();
        for _ in 0..8 {
            s.advance(1, 0).unwrap();
        }
        let v = to_client_json(&s.view(1, 0).unwrap());
        assert_eq!(v["phase"], 7);
        assert_eq!(v["button"]["disabled"], true);
        assert_eq!(v["vocabulary"]["word"], "journey");
        assert_eq!(v["manipulation"]["examples"][0], "He and I go to school.");
        assert!(v["sentence"]["highlight"].is_null());
    }
}
