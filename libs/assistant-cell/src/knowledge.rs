use serde_json::{Map, Value};

const HOURS_WORDS: &[&str] = &["hours", "open", "close", "timing"];
const DOCTOR_WORDS: &[&str] = &["doctor", "doctors", "staff"];
const WALK_IN_WORDS: &[&str] = &["walk-in", "walk in", "without appointment"];
const SERVICE_WORDS: &[&str] = &["service", "services", "treatment"];

pub fn mentions_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Answers clinic-information questions from the knowledge document.
///
/// Returns `None` when the text is not a general question.
pub fn answer_general(text: &str, knowledge: &Map<String, Value>) -> Option<String> {
    let text = text.to_lowercase();

    if mentions_any(&text, HOURS_WORDS) {
        let hours = knowledge
            .get("clinic_hours")
            .and_then(Value::as_str)
            .unwrap_or("Not available");
        return Some(format!("Our clinic hours are {}", hours));
    }

    if mentions_any(&text, DOCTOR_WORDS) {
        let mut response = String::from("Our doctors are: ");
        if let Some(doctors) = knowledge.get("doctors").and_then(Value::as_object) {
            for (name, info) in doctors {
                let specialization = info
                    .get("specialization")
                    .and_then(Value::as_str)
                    .unwrap_or("doctor");
                response.push_str(&format!("{}, who is a {}. ", name, specialization));
            }
        }
        return Some(response.trim_end().to_string());
    }

    let faq = knowledge.get("faq");

    if mentions_any(&text, WALK_IN_WORDS) {
        let answer = faq
            .and_then(|faq| faq.get("walk_in"))
            .and_then(Value::as_str)
            .unwrap_or("Information not available");
        return Some(answer.to_string());
    }

    if mentions_any(&text, SERVICE_WORDS) {
        let services: Vec<&str> = faq
            .and_then(|faq| faq.get("services"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        return Some(format!("We offer the following services: {}", services.join(", ")));
    }

    None
}
