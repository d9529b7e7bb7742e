// Author: Dustin Pilgrim
// License: MIT

pub mod capture;
pub mod console;
pub mod notify;
pub mod ticker;
pub mod wayland;
