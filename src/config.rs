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

use crate::error::ConfigError;
use std::fs::File;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub http: Http,
    pub esp32: Esp32,
    pub relay: Relay,
    pub panel: Panel,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Http {
    pub listen_address: String,
    pub max_body_length: usize,
}

impl Default for Http {
    fn default() -> Http {
        Http {
            listen_address: "0.0.0.0:5000".to_owned(),
            max_body_length: 4096,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Esp32 {
    pub address: String,
}

impl Default for Esp32 {
    fn default() -> Esp32 {
        Esp32 { address: "http://10.42.0.240".to_owned() }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Relay {
    /// No timeout when absent: a stalled ESP32 blocks the worker thread.
    pub timeout_secs: Option<u64>,
}

impl Relay {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Panel {
    pub title: String,
    pub compressors: Vec<String>,
}

impl Default for Panel {
    fn default() -> Panel {
        Panel {
            title: "Painel dos Compressores".to_owned(),
            compressors: vec!["1".to_owned(), "2".to_owned()],
        }
    }
}

impl Settings {
    pub fn listen_address(&self) -> Result<SocketAddr, ConfigError> {
        self.http
            .listen_address
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddress(self.http.listen_address.clone()))
    }

    ///
    /// Checks the addresses so a bad file fails at startup rather than on
    /// the first request. The relay speaks plain HTTP only.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_address()?;
        let invalid = || ConfigError::InvalidEsp32Address(self.esp32.address.clone());
        let url = Url::parse(&self.esp32.address).map_err(|_| invalid())?;
        match url.scheme() {
            "http" => Ok(()),
            _ => Err(invalid()),
        }
    }
}

pub fn read_config<T: Read + Sized>(mut f: T) -> Result<Settings, ConfigError> {
    let mut buffer = String::new();
    f.read_to_string(&mut buffer).map_err(ConfigError::Io)?;
    let settings: Settings = toml::from_str(&buffer).map_err(ConfigError::Parse)?;
    settings.validate()?;
    Ok(settings)
}

///
/// Reads the settings at `path`, falling back to the defaults if there is no such file.
///
pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    match File::open(path.as_ref()) {
        Ok(f) => read_config(f),
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("No configuration at {:?}, using defaults", path.as_ref());
            Ok(Settings::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = read_config("".as_bytes()).unwrap();
        assert_eq!(settings.http.listen_address, "0.0.0.0:5000");
        assert_eq!(settings.http.max_body_length, 4096);
        assert_eq!(settings.esp32.address, "http://10.42.0.240");
        assert_eq!(settings.relay.timeout(), None);
        assert_eq!(settings.panel.compressors, vec!["1", "2"]);
    }

    #[test]
    fn sections_override_defaults() {
        let raw = r#"
            [http]
            listen_address = "127.0.0.1:8080"

            [esp32]
            address = "http://192.168.4.1"

            [relay]
            timeout_secs = 3

            [panel]
            compressors = ["A", "B", "C"]
        "#;
        let settings = read_config(raw.as_bytes()).unwrap();
        assert_eq!(
            settings.listen_address().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(settings.http.max_body_length, 4096);
        assert_eq!(settings.esp32.address, "http://192.168.4.1");
        assert_eq!(settings.relay.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(settings.panel.compressors.len(), 3);
        assert_eq!(settings.panel.title, "Painel dos Compressores");
    }

    #[test]
    fn rejects_bad_listen_address() {
        let raw = "[http]\nlisten_address = \"nowhere\"\n";
        match read_config(raw.as_bytes()) {
            Err(ConfigError::InvalidListenAddress(a)) => assert_eq!(a, "nowhere"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_non_http_esp32_address() {
        let raw = "[esp32]\naddress = \"ftp://10.42.0.240\"\n";
        match read_config(raw.as_bytes()) {
            Err(ConfigError::InvalidEsp32Address(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_https_esp32_address() {
        let raw = "[esp32]\naddress = \"https://127.0.0.1:9\"\n";
        match read_config(raw.as_bytes()) {
            Err(ConfigError::InvalidEsp32Address(a)) => assert_eq!(a, "https://127.0.0.1:9"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_toml() {
        match read_config("[http".as_bytes()) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load("/nonexistent/compressor-panel.toml").unwrap();
        assert_eq!(settings.esp32.address, "http://10.42.0.240");
    }
}
