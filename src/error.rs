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

use std::error::Error;
use std::fmt::{self, Debug};
use std::io;

#[derive(Debug)]
pub struct StringError {
    pub description: String,
}

impl StringError {
    pub fn new<S: Into<String>>(description: S) -> StringError {
        StringError { description: description.into() }
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(&self.description, f)
    }
}

impl Error for StringError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    InvalidListenAddress(String),
    InvalidEsp32Address(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::Io(ref e) => write!(f, "could not read configuration: {}", e),
            ConfigError::Parse(ref e) => write!(f, "could not parse configuration: {}", e),
            ConfigError::InvalidListenAddress(ref a) => {
                write!(f, "invalid listen address '{}'", a)
            }
            ConfigError::InvalidEsp32Address(ref a) => write!(f, "invalid ESP32 address '{}'", a),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::Io(ref e) => Some(e),
            ConfigError::Parse(ref e) => Some(e),
            _ => None,
        }
    }
}

///
/// The exchange with the microcontroller never completed.
///
#[derive(Debug)]
pub enum RelayError {
    Transport(hyper::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RelayError::Transport(ref e) => write!(f, "ESP32 unreachable: {}", e),
        }
    }
}

impl Error for RelayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            RelayError::Transport(ref e) => Some(e),
        }
    }
}

impl From<hyper::Error> for RelayError {
    fn from(e: hyper::Error) -> RelayError {
        RelayError::Transport(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum FormError {
    MissingField(&'static str),
    Malformed(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FormError::MissingField(name) => write!(f, "missing form field '{}'", name),
            FormError::Malformed(ref detail) => write!(f, "malformed form body: {}", detail),
        }
    }
}

impl Error for FormError {}
