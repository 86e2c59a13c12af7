// Copyright 2016 Claus Matzinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::dto::CompressorCommand;
use crate::error::RelayError;
use hyper::header::{Connection, ContentType};
use hyper::Client;
use std::time::Duration;
use url::form_urlencoded;

/// Path on the ESP32 that accepts compressor commands.
pub const COMPRESSOR_PATH: &str = "compressor";

///
/// The ESP32 answered; its status code is reported but never judged.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelayOutcome {
    pub status: u16,
}

impl RelayOutcome {
    pub fn accepted(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

pub trait CompressorRelay: Send + Sync {
    ///
    /// Forwards a command to the microcontroller.
    /// Any completed HTTP exchange is `Ok`, whatever the status code.
    ///
    fn send(&self, command: &CompressorCommand) -> Result<RelayOutcome, RelayError>;
}

pub struct HttpRelay {
    endpoint: String,
    client: Client,
}

impl HttpRelay {
    ///
    /// Create a relay towards the ESP32 at `base_address`.
    /// * timeout: read/write timeout; `None` blocks until the device answers.
    ///   Connecting is never bounded.
    ///
    pub fn new(base_address: &str, timeout: Option<Duration>) -> HttpRelay {
        let mut client = Client::new();
        client.set_read_timeout(timeout);
        client.set_write_timeout(timeout);
        HttpRelay {
            endpoint: format!("{}/{}", base_address.trim_end_matches('/'), COMPRESSOR_PATH),
            client: client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

pub fn encode_command(command: &CompressorCommand) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("compressor", &command.compressor)
        .append_pair("state", &command.state)
        .finish()
}

impl CompressorRelay for HttpRelay {
    fn send(&self, command: &CompressorCommand) -> Result<RelayOutcome, RelayError> {
        let body = encode_command(command);
        debug!("POST {} <- {}", self.endpoint, body);
        let response = self.client
            .post(self.endpoint.as_str())
            .header(ContentType::form_url_encoded())
            .header(Connection::close())
            .body(body.as_str())
            .send()?;
        Ok(RelayOutcome { status: response.status.to_u16() })
    }
}
