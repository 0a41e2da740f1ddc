use anyhow::bail;
use clap::Parser;
use pixelpong::cli::{canvas_layout, Cli};
use pixelpong::{
    init_logging, launch, CanvasRenderer, EventDispatcher, HttpGridService, PollEvent,
    PollingController, PollingOptions, UniquenessValidator, BUILD_DATE, VERSION,
};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    tracing::info!("PixelPong {} (built {})", VERSION, BUILD_DATE);

    let config = cli.load_config()?;
    let grid = cli.grid_config()?;

    let service = Arc::new(HttpGridService::new(
        config.connection.base_url.clone(),
        config.connection.request_timeout(),
    )?);
    tokio::select! {
        launched = launch(service.as_ref(), grid) => launched?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted during launch, nothing to stop");
            bail!("interrupted during launch");
        }
    }

    let controller = PollingController::new(
        service,
        PollingOptions {
            interval: config.polling.interval(),
            validator: UniquenessValidator::new(config.polling.sampling_policy()),
            renderer: CanvasRenderer::new(canvas_layout(&config), config.render.grid_overlay),
            events: EventDispatcher::default(),
        },
    );
    let mut events = controller.subscribe();
    controller.start(grid);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupted, stopping");
                controller.stop();
            }
            event = events.recv() => match event {
                Ok(PollEvent::StatusUpdated(status)) => {
                    tracing::info!("Progress: {}", status);
                }
                Ok(PollEvent::Validated(result)) => {
                    let output = &config.render.output_path;
                    match controller
                        .canvas()
                        .map(|canvas| canvas.save_png(output).map(|()| canvas.caption()))
                    {
                        Some(Ok(caption)) => {
                            println!("{}", caption);
                        }
                        Some(Err(err)) => tracing::error!("{}", err),
                        None => tracing::warn!("Nothing was rendered"),
                    }
                    println!("{}", result);
                    for color in &result.duplicate_colors {
                        println!("  duplicate: {}", color);
                    }
                    return Ok(());
                }
                Ok(PollEvent::Failed(err)) => return Err(err.into()),
                Ok(PollEvent::Stopped) => bail!("stopped before the grid was finished"),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    tracing::debug!("Missed {} poll events", missed);
                }
                Err(RecvError::Closed) => bail!("event channel closed"),
            }
        }
    }
}
