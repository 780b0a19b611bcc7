mod command;
mod interaction;
mod response;
mod rest;

pub use command::*;
pub use interaction::*;
pub use response::*;
pub use rest::*;
