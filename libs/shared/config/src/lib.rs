use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the booking recorder treats a slot it is asked to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingPolicy {
    /// Record whatever the caller sends; availability is the caller's concern.
    #[default]
    Permissive,
    /// Reject slots that are off the daily grid or already booked on that date.
    Checked,
}

impl FromStr for BookingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(BookingPolicy::Permissive),
            "checked" => Ok(BookingPolicy::Checked),
            other => Err(format!("unknown booking policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub schedules_file: String,
    pub appointments_file: String,
    pub knowledge_file: String,
    pub server_host: String,
    pub server_port: u16,
    pub booking_policy: BookingPolicy,
    pub clinic_api_url: String,
    pub assistant_slot_preview: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            schedules_file: "schedules.json".to_string(),
            appointments_file: "appointments.json".to_string(),
            knowledge_file: "knowledge_base.json".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            booking_policy: BookingPolicy::Permissive,
            clinic_api_url: "http://localhost:5000".to_string(),
            assistant_slot_preview: 10,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            data_dir: env::var("CLINIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using current directory");
                    defaults.data_dir.clone()
                }),
            schedules_file: env::var("SCHEDULES_FILE")
                .unwrap_or_else(|_| {
                    warn!("SCHEDULES_FILE not set, using default");
                    defaults.schedules_file.clone()
                }),
            appointments_file: env::var("APPOINTMENTS_FILE")
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENTS_FILE not set, using default");
                    defaults.appointments_file.clone()
                }),
            knowledge_file: env::var("KNOWLEDGE_FILE")
                .unwrap_or_else(|_| {
                    warn!("KNOWLEDGE_FILE not set, using default");
                    defaults.knowledge_file.clone()
                }),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using default");
                    defaults.server_host.clone()
                }),
            server_port: parse_or_default("SERVER_PORT", defaults.server_port),
            booking_policy: parse_or_default("BOOKING_POLICY", defaults.booking_policy),
            clinic_api_url: env::var("CLINIC_API_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_URL not set, using default");
                    defaults.clinic_api_url.clone()
                }),
            assistant_slot_preview: parse_or_default(
                "ASSISTANT_SLOT_PREVIEW",
                defaults.assistant_slot_preview,
            ),
        };

        if !config.is_configured() {
            warn!("Data directory {} does not exist - documents will be treated as empty",
                  config.data_dir.display());
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.data_dir.is_dir()
    }

    pub fn schedules_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedules_file)
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.data_dir.join(&self.appointments_file)
    }

    pub fn knowledge_path(&self) -> PathBuf {
        self.data_dir.join(&self.knowledge_file)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using {:?}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using {:?}", key, default);
            default
        }
    }
}
