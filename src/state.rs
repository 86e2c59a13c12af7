use crate::dto::PressureReading;
use crate::error::StringError;
use iron::prelude::*;
use iron::status;
use iron::typemap;
use persistent::State;

///
/// Process-wide slot for the latest reading, shared by every request through
/// `persistent::State` (an `Arc<RwLock<PressureReading>>`).
///
pub struct LatestPressure;

impl typemap::Key for LatestPressure {
    type Value = PressureReading;
}

fn unavailable<E: ::std::fmt::Debug>(e: E) -> IronError {
    IronError::new(StringError::new(format!("pressure state unavailable: {:?}", e)),
                   status::InternalServerError)
}

pub fn current_pressure(req: &mut Request) -> IronResult<PressureReading> {
    let lock = req.get::<State<LatestPressure>>().map_err(unavailable)?;
    let reading = lock.read().map_err(unavailable)?;
    Ok(reading.clone())
}

pub fn store_pressure(req: &mut Request, reading: PressureReading) -> IronResult<()> {
    let lock = req.get::<State<LatestPressure>>().map_err(unavailable)?;
    let mut current = lock.write().map_err(unavailable)?;
    *current = reading;
    Ok(())
}
