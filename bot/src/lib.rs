pub mod bot;
pub mod command;
pub mod communicator;
pub mod connector;
pub mod macros;
pub mod module;
