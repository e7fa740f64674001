// engine module — local board data source

pub mod fixture;
mod interface;

pub use fixture::FixtureEngine;
pub use interface::{Engine, EngineHandle, Event, Request};
