// keeplink-core: device-state synchronization and command engine.
//
// One `Coordinator` owns one switch: it runs the ordered fetch/merge
// cycle that turns the device's management pages into a `Snapshot`, and
// it issues the form-encoded commands that mutate device state. Display
// and control consumers hold a coordinator and read its snapshot; they
// never touch HTTP or HTML themselves.

pub mod command;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod merge;
pub mod model;

pub use config::SwitchConfig;
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use model::{DeviceIdentity, LinkConfig, PoeStatus, PortState, Snapshot, TrafficStats};
