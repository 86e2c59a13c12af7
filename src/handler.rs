use crate::dto::{CompressorCommand, PressureReading, StatusReply};
use crate::error::FormError;
use crate::page::PanelLayout;
use crate::relay::CompressorRelay;
use crate::state::{current_pressure, store_pressure};
use askama::Template;
use iron::headers::ContentType;
use iron::method::Method;
use iron::modifiers::Header;
use iron::prelude::*;
use iron::status;
use iron::Handler;
use urlencoded::{QueryMap, UrlDecodingError, UrlEncodedBody};

pub trait RouteProvider {
    fn method(&self) -> Method;

    /// Path without the leading slash, as matched by the router.
    fn get_route(&self) -> &str;
}

fn json_reply(code: status::Status, reply: &StatusReply) -> IronResult<Response> {
    let body = serde_json::to_string(reply)
        .map_err(|e| IronError::new(e, status::InternalServerError))?;
    Ok(Response::with((code, Header(ContentType::json()), body)))
}

fn reject(e: FormError) -> IronResult<Response> {
    warn!("Rejected request: {}", e);
    json_reply(status::BadRequest, &StatusReply::rejected(e.to_string()))
}

fn read_form(req: &mut Request) -> Result<QueryMap, FormError> {
    match req.get::<UrlEncodedBody>() {
        Ok(form) => Ok(form),
        Err(UrlDecodingError::EmptyQuery) => Ok(QueryMap::new()),
        Err(e) => Err(FormError::Malformed(e.to_string())),
    }
}

/// First value of `name`. Present-but-empty is a value.
fn field(form: &QueryMap, name: &'static str) -> Result<String, FormError> {
    form.get(name)
        .and_then(|values| values.first())
        .cloned()
        .ok_or(FormError::MissingField(name))
}

pub struct StatusHandler {
    layout: PanelLayout,
}

impl StatusHandler {
    pub fn new(layout: PanelLayout) -> StatusHandler {
        StatusHandler { layout: layout }
    }
}

impl RouteProvider for StatusHandler {
    fn method(&self) -> Method {
        Method::Get
    }

    fn get_route(&self) -> &str {
        ""
    }
}

impl Handler for StatusHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let reading = current_pressure(req)?;
        let html = self.layout
            .page(&reading.value)
            .render()
            .map_err(|e| IronError::new(e, status::InternalServerError))?;
        Ok(Response::with((status::Ok, Header(ContentType::html()), html)))
    }
}

pub struct ControlHandler {
    relay: Box<dyn CompressorRelay>,
}

impl ControlHandler {
    pub fn new<R: CompressorRelay + 'static>(relay: R) -> ControlHandler {
        ControlHandler { relay: Box::new(relay) }
    }

    fn command(req: &mut Request) -> Result<CompressorCommand, FormError> {
        let form = read_form(req)?;
        Ok(CompressorCommand {
            compressor: field(&form, "compressor")?,
            state: field(&form, "state")?,
        })
    }
}

impl RouteProvider for ControlHandler {
    fn method(&self) -> Method {
        Method::Post
    }

    fn get_route(&self) -> &str {
        "control"
    }
}

impl Handler for ControlHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let command = match ControlHandler::command(req) {
            Ok(command) => command,
            Err(e) => return reject(e),
        };
        info!("Compressor {} -> {}", command.compressor, command.state);
        match self.relay.send(&command) {
            Ok(outcome) => {
                if !outcome.accepted() {
                    warn!(
                        "ESP32 answered {} for compressor {}",
                        outcome.status, command.compressor
                    );
                }
                json_reply(status::Ok, &StatusReply::success())
            }
            Err(e) => {
                error!("Could not relay {:?}: {}", command, e);
                json_reply(status::InternalServerError, &StatusReply::error())
            }
        }
    }
}

pub struct PressureHandler;

impl RouteProvider for PressureHandler {
    fn method(&self) -> Method {
        Method::Post
    }

    fn get_route(&self) -> &str {
        "pressao"
    }
}

impl Handler for PressureHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let value = match read_form(req).and_then(|form| field(&form, "pressao")) {
            Ok(value) => value,
            Err(e) => return reject(e),
        };
        debug!("Pressure update: {}", value);
        store_pressure(req, PressureReading { value: value })?;
        json_reply(status::Ok, &StatusReply::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> QueryMap {
        let mut map = QueryMap::new();
        for &(k, v) in pairs {
            map.entry(k.to_owned()).or_insert_with(Vec::new).push(v.to_owned());
        }
        map
    }

    #[test]
    fn empty_value_is_still_a_value() {
        assert_eq!(field(&form(&[("pressao", "")]), "pressao"), Ok(String::new()));
    }

    #[test]
    fn first_of_repeated_fields_wins() {
        let f = form(&[("state", "on"), ("state", "off")]);
        assert_eq!(field(&f, "state"), Ok("on".to_owned()));
    }

    #[test]
    fn absent_field_is_named_in_the_error() {
        assert_eq!(field(&form(&[]), "compressor"),
                   Err(FormError::MissingField("compressor")));
    }
}
