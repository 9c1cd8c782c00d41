use gridlink_core::{AssetPicker, DispatchQueue, DrainSummary, GroundQuery, Renderer, Session};

pub mod config;
pub mod errors;
pub mod protocol;
pub mod renderer;
pub mod server;

pub use config::Config;
pub use errors::{DecodeError, StartupError, TransportError};
pub use protocol::{submit, LineBuffer, UpdateMessage};
pub use renderer::TracingRenderer;
pub use server::{ProtocolServer, ServerHandle};

/// One consumer tick for a renderer without animation: run everything
/// queued, then settle the walker motion started during the tick.
pub fn run_tick<R, G, P>(queue: &DispatchQueue, session: &mut Session<R, G, P>) -> DrainSummary
where
    R: Renderer,
    G: GroundQuery,
    P: AssetPicker,
{
    let summary = queue.drain_and_run(session);
    session.walker_arrived();
    summary
}
