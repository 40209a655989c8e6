use crate::api::{ApiCommand, ApiServer};
use crate::config::Config;
use crate::demo;
use crate::meeting::{LifecycleSimulator, MeetingStore, SimulatorConfig};
use crate::pipeline::MeetingPipeline;
use crate::summarizer::build_summarizer;
use crate::transcription::build_transcriber;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting Recap service");

    let config = Config::load()?;

    let store = if config.demo.seed_on_start {
        let meetings = demo::demo_meetings();
        info!("Seeding store with {} demo meetings", meetings.len());
        MeetingStore::with_meetings(meetings)
    } else {
        MeetingStore::new()
    };

    let transcriber: Arc<dyn crate::transcription::Transcriber> =
        build_transcriber(&config.transcription)?.into();
    let summarizer: Arc<dyn crate::summarizer::Summarizer> =
        build_summarizer(&config.summarizer)?.into();
    info!(
        "Using {} for transcription, {} for summarization",
        transcriber.name(),
        summarizer.name()
    );

    let pipeline = MeetingPipeline::new(store.clone(), transcriber, summarizer);
    let pipeline_cancel = pipeline.cancellation_token();

    let (tx, mut rx) = mpsc::channel::<ApiCommand>(10);

    let api_server = ApiServer::new(tx, store.clone(), config.api.port);
    tokio::spawn(async move {
        if let Err(e) = api_server.start().await {
            error!("API server failed: {}", e);
        }
    });

    let simulator_handle = if config.simulator.enabled {
        let simulator = LifecycleSimulator::new(
            store.clone(),
            SimulatorConfig {
                tick_interval: Duration::from_secs(config.simulator.tick_interval_seconds),
                advance_threshold: config.simulator.advance_threshold,
                spawn_chance: config.simulator.spawn_chance,
            },
        );
        Some(simulator.spawn())
    } else {
        info!("Lifecycle simulator disabled by config");
        None
    };

    info!("Recap is ready!");
    info!(
        "Try it: curl -X POST http://127.0.0.1:{}/meetings -H 'content-type: application/json' \
         -d '{{\"transcript\": \"John: lets ship it\"}}'",
        config.api.port
    );

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(ApiCommand::IngestTranscript { title, transcript }) => {
                    let pipeline = pipeline.clone();
                    tokio::spawn(async move {
                        match pipeline.ingest_transcript(title, transcript).await {
                            Ok(meeting) => info!("Meeting {} processed", meeting.id),
                            Err(e) => warn!("Failed to process meeting: {}", e),
                        }
                    });
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    // Stop the simulator timer and any in-flight simulated latency before
    // the store goes away.
    if let Some(handle) = simulator_handle {
        handle.shutdown().await;
    }
    pipeline_cancel.cancel();

    info!("Recap stopped");
    Ok(())
}
