#[macro_use]
extern crate log;

extern crate env_logger;

pub mod cmd;
pub mod config;
pub mod db;
pub mod rest;
