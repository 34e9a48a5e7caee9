pub mod autopilot;
pub mod barge;
pub mod environment;
pub mod pid;
pub mod pilot;
pub mod propulsion;
pub mod rocket;
