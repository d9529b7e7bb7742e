// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod collab;
pub mod error;
pub mod events;
pub mod format;
pub mod info;
pub mod manager;
pub mod manager_msg;
pub mod monitor;
pub mod tracker;

#[cfg(test)]
mod manager_tests;
