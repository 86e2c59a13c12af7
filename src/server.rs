use crate::dto::PressureReading;
use crate::handler::{ControlHandler, PressureHandler, RouteProvider, StatusHandler};
use crate::middleware::RequestLogger;
use crate::page::PanelLayout;
use crate::relay::CompressorRelay;
use crate::state::LatestPressure;
use bodyparser::MaxBodyLength;
use iron::method::Method;
use iron::prelude::*;
use iron::status;
use iron::error::HttpResult;
use iron::{Handler, Listening};
use persistent::{Read, State};
use std::collections::HashMap;
use std::net::SocketAddr;

pub struct Router {
    // Routes here are simply matched with the url path, then the method.
    routes: HashMap<String, Vec<(Method, Box<dyn Handler>)>>,
}

impl Router {
    pub fn new() -> Self {
        Router { routes: HashMap::new() }
    }

    pub fn add_route<H>(&mut self, route: String, method: Method, handler: H)
        where H: Handler
    {
        self.routes.entry(route).or_insert_with(Vec::new).push((method, Box::new(handler)));
    }

    pub fn register<H>(&mut self, handler: H)
        where H: Handler + RouteProvider
    {
        let route = handler.get_route().to_owned();
        let method = handler.method();
        self.add_route(route, method, handler);
    }
}

impl Handler for Router {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        match self.routes.get(&req.url.path().join("/")) {
            Some(handlers) => {
                match handlers.iter().find(|&&(ref method, _)| *method == req.method) {
                    Some(&(_, ref handler)) => handler.handle(req),
                    None => Ok(Response::with(status::MethodNotAllowed)),
                }
            }
            None => Ok(Response::with(status::NotFound)),
        }
    }
}

///
/// Wires the three panel routes together with the shared pressure state,
/// the body length cap and request logging.
///
pub fn panel_chain<R>(layout: PanelLayout, relay: R, max_body_length: usize) -> Chain
    where R: CompressorRelay + 'static
{
    let mut router = Router::new();
    router.register(StatusHandler::new(layout));
    router.register(ControlHandler::new(relay));
    router.register(PressureHandler);

    let mut chain = Chain::new(router);
    chain.link_before(RequestLogger);
    chain.link(State::<LatestPressure>::both(PressureReading::default()));
    chain.link_before(Read::<MaxBodyLength>::one(max_body_length));
    chain.link_after(RequestLogger);
    chain
}

pub trait WebServer {
    fn listen(self) -> HttpResult<Listening>;
}

pub struct PanelServer {
    listen_address: SocketAddr,
    chain: Chain,
}

impl PanelServer {
    pub fn new(listen_address: SocketAddr, chain: Chain) -> PanelServer {
        PanelServer {
            listen_address: listen_address,
            chain: chain,
        }
    }
}

impl WebServer for PanelServer {
    fn listen(self) -> HttpResult<Listening> {
        info!("Listening on {}", self.listen_address);
        Iron::new(self.chain).http(self.listen_address)
    }
}
