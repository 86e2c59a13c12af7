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

use iron::middleware::{AfterMiddleware, BeforeMiddleware};
use iron::prelude::*;
use iron::typemap;
use std::time::{Duration, Instant};

///
/// Logs one line per request: method, path, status and how long it took.
/// Link it before and after the handler.
///
pub struct RequestLogger;

struct StartTime;

impl typemap::Key for StartTime {
    type Value = Instant;
}

fn elapsed(req: &Request) -> Duration {
    req.extensions
        .get::<StartTime>()
        .map(|start| start.elapsed())
        .unwrap_or_default()
}

fn path(req: &Request) -> String {
    format!("/{}", req.url.path().join("/"))
}

impl BeforeMiddleware for RequestLogger {
    fn before(&self, req: &mut Request) -> IronResult<()> {
        req.extensions.insert::<StartTime>(Instant::now());
        Ok(())
    }
}

impl AfterMiddleware for RequestLogger {
    fn after(&self, req: &mut Request, res: Response) -> IronResult<Response> {
        match res.status {
            Some(status) => info!(
                "{} {} -> {} ({:?})",
                req.method,
                path(req),
                status,
                elapsed(req)
            ),
            None => info!("{} {} -> no status ({:?})", req.method, path(req), elapsed(req)),
        }
        Ok(res)
    }

    fn catch(&self, req: &mut Request, err: IronError) -> IronResult<Response> {
        warn!("{} {} failed: {} ({:?})", req.method, path(req), err, elapsed(req));
        Err(err)
    }
}
