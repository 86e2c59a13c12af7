
/// The most recent pressure value pushed by the ESP32, kept exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureReading {
    pub value: String,
}

impl Default for PressureReading {
    fn default() -> PressureReading {
        PressureReading { value: "0.0".to_owned() }
    }
}

/// An operator's on/off request for one compressor. Both fields are opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorCommand {
    pub compressor: String,
    pub state: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl StatusReply {
    pub fn success() -> StatusReply {
        StatusReply {
            status: "success".to_owned(),
            message: None,
        }
    }

    pub fn error() -> StatusReply {
        StatusReply {
            status: "error".to_owned(),
            message: None,
        }
    }

    pub fn rejected<S: Into<String>>(message: S) -> StatusReply {
        StatusReply {
            status: "error".to_owned(),
            message: Some(message.into()),
        }
    }
}
