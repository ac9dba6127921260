// libs/assistant-cell/tests/conversation_test.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

use appointment_cell::models::BookingRequest;
use assistant_cell::{Assistant, ClientError, ClinicApi, SpeechIo, Utterance};
use doctor_cell::models::AvailabilityResponse;
use doctor_cell::services::slot_grid;

struct ScriptedSpeech {
    script: VecDeque<Utterance>,
    spoken: Vec<String>,
}

impl ScriptedSpeech {
    fn new(lines: &[&str]) -> Self {
        Self {
            script: lines.iter().map(|line| Utterance::Text(line.to_string())).collect(),
            spoken: Vec::new(),
        }
    }
}

#[async_trait]
impl SpeechIo for ScriptedSpeech {
    async fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }

    async fn listen(&mut self) -> Utterance {
        self.script.pop_front().unwrap_or(Utterance::Hangup)
    }
}

#[derive(Clone, Default)]
struct FakeApi {
    slots: Vec<String>,
    fail_slots: bool,
    reject_booking: bool,
    bookings: Arc<Mutex<Vec<BookingRequest>>>,
    asked_days: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    fn with_slots(slots: &[&str]) -> Self {
        Self {
            slots: slots.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ClinicApi for FakeApi {
    async fn knowledge(&self) -> Result<Map<String, Value>, ClientError> {
        match json!({"clinic_hours": "9 AM to 6 PM"}) {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    async fn available_slots(&self, day: &str) -> Result<AvailabilityResponse, ClientError> {
        self.asked_days.lock().unwrap().push(day.to_string());
        if self.fail_slots {
            return Err(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                body: format!("No schedule found for {}", day),
            });
        }

        Ok(AvailabilityResponse {
            doctor: "Dr. Smith".to_string(),
            available_slots: self.slots.iter().map(|s| s.parse().unwrap()).collect(),
            date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
        })
    }

    async fn book(&self, booking: &BookingRequest) -> Result<bool, ClientError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(!self.reject_booking)
    }
}

#[tokio::test]
async fn test_general_question_uses_knowledge() {
    let mut assistant = Assistant::connect(FakeApi::default(), ScriptedSpeech::new(&[]), 10).await;

    let reply = assistant.respond("what are your opening hours").await;

    assert_eq!(reply, "Our clinic hours are 9 AM to 6 PM");
}

#[tokio::test]
async fn test_unrelated_text_gets_help() {
    let mut assistant = Assistant::connect(FakeApi::default(), ScriptedSpeech::new(&[]), 10).await;

    let reply = assistant.respond("hello there").await;

    assert!(reply.starts_with("I can help you with clinic information"));
}

#[tokio::test]
async fn test_full_booking_flow() {
    let api = FakeApi::with_slots(&["09:00", "09:30", "15:00"]);
    let speech = ScriptedSpeech::new(&["3 pm please", "Alice Walker"]);
    let mut assistant = Assistant::connect(api.clone(), speech, 10).await;

    let reply = assistant.respond("Is there a free slot on Monday?").await;

    assert_eq!(
        reply,
        "Perfect! I've booked your appointment with Dr. Smith on Monday at 3:00 PM. Your name is recorded as Alice Walker."
    );
    assert_eq!(
        assistant.speech().spoken[0],
        "Dr. Smith is available on Monday at the following times: 9:00 AM, 9:30 AM, 3:00 PM"
    );

    let bookings = api.bookings.lock().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].name.as_deref(), Some("Alice Walker"));
    assert_eq!(bookings[0].doctor.as_deref(), Some("Dr. Smith"));
    assert_eq!(bookings[0].day.as_deref(), Some("Monday"));
    assert_eq!(bookings[0].slot.as_deref(), Some("15:00"));
}

#[tokio::test]
async fn test_day_is_asked_for_when_missing() {
    let api = FakeApi::with_slots(&["10:00"]);
    let speech = ScriptedSpeech::new(&["thursday", "no thanks"]);
    let mut assistant = Assistant::connect(api.clone(), speech, 10).await;

    let reply = assistant.respond("I want an appointment").await;

    assert_eq!(reply, "Okay, let me know if you need anything else.");
    assert_eq!(api.asked_days.lock().unwrap().as_slice(), ["Thursday"]);
    assert!(api.bookings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_gives_up_when_day_is_still_unclear() {
    let speech = ScriptedSpeech::new(&["whenever"]);
    let mut assistant = Assistant::connect(FakeApi::default(), speech, 10).await;

    let reply = assistant.respond("book me in").await;

    assert_eq!(reply, "I couldn't understand the day. Please try again.");
}

#[tokio::test]
async fn test_long_slot_lists_are_truncated() {
    let grid: Vec<String> = slot_grid().iter().map(ToString::to_string).collect();
    let grid_refs: Vec<&str> = grid.iter().map(String::as_str).collect();
    let speech = ScriptedSpeech::new(&["no"]);
    let mut assistant = Assistant::connect(FakeApi::with_slots(&grid_refs), speech, 10).await;

    assistant.respond("any slot on friday").await;

    assert!(assistant.speech().spoken[0].ends_with("and 6 more slots."));
}

#[tokio::test]
async fn test_unoffered_time_is_refused() {
    let api = FakeApi::with_slots(&["09:00"]);
    let speech = ScriptedSpeech::new(&["how about 1:30 pm"]);
    let mut assistant = Assistant::connect(api.clone(), speech, 10).await;

    let reply = assistant.respond("book tuesday").await;

    assert_eq!(reply, "Please try again with a valid time slot.");
    assert!(api.bookings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fully_booked_and_unavailable_days() {
    let mut assistant = Assistant::connect(FakeApi::with_slots(&[]), ScriptedSpeech::new(&[]), 10).await;
    assert_eq!(
        assistant.respond("anything free on saturday").await,
        "Sorry, Dr. Smith has no available slots on Saturday."
    );

    let failing = FakeApi { fail_slots: true, ..FakeApi::default() };
    let mut assistant = Assistant::connect(failing, ScriptedSpeech::new(&[]), 10).await;
    assert_eq!(
        assistant.respond("anything free on sunday").await,
        "Sorry, I couldn't get availability information for Sunday."
    );
}

#[tokio::test]
async fn test_rejected_booking_is_reported() {
    let api = FakeApi { reject_booking: true, ..FakeApi::with_slots(&["09:00"]) };
    let speech = ScriptedSpeech::new(&["9:00 am", "Bob"]);
    let mut assistant = Assistant::connect(api, speech, 10).await;

    let reply = assistant.respond("book wednesday").await;

    assert_eq!(reply, "Sorry, there was an error booking your appointment. Please try again.");
}

#[tokio::test]
async fn test_run_greets_answers_and_says_goodbye() {
    let speech = ScriptedSpeech::new(&["", "when do you open", "ok bye"]);
    let mut assistant = Assistant::connect(FakeApi::default(), speech, 10).await;

    assistant.run().await;

    assert_eq!(
        assistant.speech().spoken,
        vec![
            "Hello! I'm your clinic assistant. How can I help you today?".to_string(),
            "Our clinic hours are 9 AM to 6 PM".to_string(),
            "Thank you for calling! Have a great day!".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_run_stops_on_hangup() {
    let mut assistant = Assistant::connect(FakeApi::default(), ScriptedSpeech::new(&[]), 10).await;

    assistant.run().await;

    assert_eq!(assistant.speech().spoken.len(), 1);
}
