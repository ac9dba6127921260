pub mod client;
pub mod conversation;
pub mod extraction;
pub mod formatting;
pub mod knowledge;
pub mod speech;

pub use client::{ClientError, ClinicApi, HttpClinicClient};
pub use conversation::Assistant;
pub use extraction::{extract_day, extract_time};
pub use speech::{ConsoleSpeech, SpeechIo, Utterance};
