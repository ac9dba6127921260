use serde_json::{Map, Value};
use tracing::{info, warn};

use appointment_cell::models::BookingRequest;
use doctor_cell::models::AvailabilityResponse;
use shared_models::weekday_name;

use crate::client::ClinicApi;
use crate::extraction::{extract_day, extract_time};
use crate::formatting::{describe_availability, spoken_time};
use crate::knowledge::{answer_general, mentions_any};
use crate::speech::{SpeechIo, Utterance};

const GREETING: &str = "Hello! I'm your clinic assistant. How can I help you today?";
const FAREWELL: &str = "Thank you for calling! Have a great day!";
const HELP: &str = "I can help you with clinic information, check doctor availability, or book appointments. What would you like to know?";

const EXIT_WORDS: &[&str] = &["bye", "goodbye", "exit", "quit"];
const BOOKING_WORDS: &[&str] = &["available", "free", "slot", "appointment", "book"];

/// One caller's conversation with the clinic.
pub struct Assistant<A, S> {
    api: A,
    speech: S,
    knowledge: Map<String, Value>,
    slot_preview: usize,
}

impl<A: ClinicApi, S: SpeechIo> Assistant<A, S> {
    /// Fetches the knowledge document up front; a failure leaves it empty.
    pub async fn connect(api: A, speech: S, slot_preview: usize) -> Self {
        let knowledge = match api.knowledge().await {
            Ok(knowledge) => knowledge,
            Err(e) => {
                warn!("Could not load knowledge base: {}", e);
                Map::new()
            }
        };

        Self { api, speech, knowledge, slot_preview }
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Talks until the caller says goodbye or hangs up.
    pub async fn run(&mut self) {
        self.speech.speak(GREETING).await;

        loop {
            let heard = match self.speech.listen().await {
                Utterance::Hangup => break,
                utterance => match utterance.text() {
                    Some(text) => text.to_string(),
                    None => continue,
                },
            };

            if has_word(&heard, EXIT_WORDS) {
                self.speech.speak(FAREWELL).await;
                break;
            }

            let response = self.respond(&heard).await;
            self.speech.speak(&response).await;
        }
    }

    /// The reply to one caller utterance. May ask follow-up questions.
    pub async fn respond(&mut self, text: &str) -> String {
        if let Some(answer) = answer_general(text, &self.knowledge) {
            return answer;
        }

        if mentions_any(&text.to_lowercase(), BOOKING_WORDS) {
            return self.handle_availability(text).await;
        }

        HELP.to_string()
    }

    async fn handle_availability(&mut self, text: &str) -> String {
        let weekday = match extract_day(text) {
            Some(weekday) => weekday,
            None => {
                self.speech
                    .speak("Which day are you looking for? Please specify Monday through Saturday.")
                    .await;
                let reply = self.speech.listen().await;
                match reply.text().and_then(extract_day) {
                    Some(weekday) => weekday,
                    None => return "I couldn't understand the day. Please try again.".to_string(),
                }
            }
        };
        let day = weekday_name(weekday);

        let availability = match self.api.available_slots(day).await {
            Ok(availability) => availability,
            Err(e) => {
                warn!("Error getting slots for {}: {}", day, e);
                return format!("Sorry, I couldn't get availability information for {}.", day);
            }
        };

        if availability.available_slots.is_empty() {
            return format!("Sorry, {} has no available slots on {}.", availability.doctor, day);
        }

        let summary = describe_availability(
            &availability.doctor,
            day,
            &availability.available_slots,
            self.slot_preview,
        );
        self.speech.speak(&summary).await;

        self.handle_booking(day, &availability).await
    }

    async fn handle_booking(&mut self, day: &str, availability: &AvailabilityResponse) -> String {
        self.speech
            .speak("Would you like to book one of these slots? If yes, please tell me which time you prefer.")
            .await;

        let reply = self.speech.listen().await;
        let reply = match reply.text() {
            Some(text) if !has_word(text, &["no"]) => text.to_string(),
            _ => return "Okay, let me know if you need anything else.".to_string(),
        };

        let slot = match extract_time(&reply) {
            Some(slot) if availability.available_slots.contains(&slot) => slot,
            _ => {
                self.speech
                    .speak("I couldn't find that time slot. Please choose from the available times I mentioned.")
                    .await;
                return "Please try again with a valid time slot.".to_string();
            }
        };

        self.speech.speak("Great! What's your name for the appointment?").await;
        let name = match self.speech.listen().await.text() {
            Some(name) => name.to_string(),
            None => return "I didn't catch your name. Please try booking again.".to_string(),
        };

        let request = BookingRequest::new(&name, &availability.doctor, day, &slot.to_string());
        let booked = match self.api.book(&request).await {
            Ok(booked) => booked,
            Err(e) => {
                warn!("Error booking appointment: {}", e);
                false
            }
        };

        if !booked {
            return "Sorry, there was an error booking your appointment. Please try again.".to_string();
        }

        info!("Booked {} with {} on {} at {}", name, availability.doctor, day, slot);
        format!(
            "Perfect! I've booked your appointment with {} on {} at {}. Your name is recorded as {}.",
            availability.doctor,
            day,
            spoken_time(&slot),
            name
        )
    }
}

/// Whole-word, case-insensitive match.
fn has_word(text: &str, words: &[&str]) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| words.contains(&token))
}
