use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use touch_gestures::infrastructure::{config, logging};
use touch_gestures::{attach, create_signal_bus, Scenario, TouchSurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides the log level, so load problems are reported after setup
    let config_status = config::init();
    let cfg = config::app();
    logging::setup(&cfg.logging);
    if let Err(e) = config_status {
        tracing::warn!("{}, using embedded config", e);
    }

    let path = std::env::args()
        .nth(1)
        .context("usage: touch-gestures <scenario.yaml>")?;
    let scenario =
        Scenario::load(&path).with_context(|| format!("failed to load scenario {}", path))?;

    let bus = create_signal_bus(cfg.signal_bus.capacity);
    let mut signals = bus.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match signals.recv().await {
                Ok(dispatched) => println!("{} {}", dispatched.signal.name(), dispatched.target),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Signal printer lagged, {} signals not shown", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let surface = TouchSurface::new("scenario", cfg.surface.channel_capacity);
    let handle = attach(&surface, bus.clone())?;

    scenario.replay(&surface).await;

    handle.detach().await;
    drop(bus);
    printer.await?;

    Ok(())
}
