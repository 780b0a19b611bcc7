mod dispatcher;
mod handler;
mod registry;
mod route;
mod signature;

pub use dispatcher::{GatewayReply, InteractionDispatcher};
pub use handler::{
    BoxedHandler, CommandHandler, ConnectionInfo, ParamMap, Response, SyntheticRequest,
};
pub use registry::{CommandEntry, CommandRegistry};
pub use route::{compile, CompiledRoute, ROUTE_BASE};
pub use signature::verify_signature;
