use std::sync::Arc;
use std::time::Duration;

use gridlink_core::{DispatchQueue, FlatGround, PlacementPlanner, RandomAssetPicker, Session};
use gridlink_service::{run_tick, Config, ProtocolServer, TracingRenderer};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cfg = Config::from_env()?;
    let addr = cfg.addr()?;
    let planner = PlacementPlanner::new(cfg.cell_size, cfg.assets.clone(), RandomAssetPicker::from_entropy())?;
    let mut session = Session::new(planner, cfg.hover_offset, TracingRenderer::default(), FlatGround::default());

    let queue = Arc::new(DispatchQueue::new());
    let server = match ProtocolServer::bind(addr, Arc::clone(&queue)).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "startup failed");
            return Err(e.into());
        }
    };
    info!(core_version = %gridlink_core::version(), addr = %addr, tick_ms = cfg.tick_ms, "starting gridlink-service");
    let handle = server.spawn();

    let mut ticker = tokio::time::interval(Duration::from_millis(cfg.tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let summary = run_tick(&queue, &mut session);
                if summary.executed > 0 {
                    tracing::debug!(executed = summary.executed, rejected = summary.rejected, "tick");
                }
            }
            _ = &mut ctrl_c => {
                info!("shutdown requested");
                break;
            }
        }
    }

    handle.shutdown().await;
    // Whatever arrived before the listener closed still gets applied.
    run_tick(&queue, &mut session);
    info!(
        buildings = session.renderer().buildings,
        footprints = session.renderer().footprints,
        "gridlink-service stopped"
    );
    Ok(())
}
