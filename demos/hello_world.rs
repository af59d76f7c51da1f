use std::sync::{Arc, Mutex};

use morse_player::{
    AudioOutput, MorseCodec, PlaybackScheduler, PlayerConfig, ProgressDisplay, ToneLibrary,
    TonePlayer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };
    let text = "hello world";

    let library = ToneLibrary::new(config.clone())?;
    let volume = config.volume;
    let output = tokio::task::spawn_blocking(move || AudioOutput::open(volume)).await??;
    let mut scheduler =
        PlaybackScheduler::new(TonePlayer::new(output, library.synthesized()), &config)?;

    let display = Arc::new(Mutex::new(ProgressDisplay::new(&MorseCodec::new(), text)?));
    let progress = display.clone();
    scheduler.play(text, move || {
        let mut display = progress.lock().unwrap();
        display.advance();
        println!("{} | {}", display.played(), display.pending());
    })?;

    // swap to the first sample set if its files are around; keep the sine otherwise
    if let Ok(tones) = library.load_set(1).await {
        scheduler.with_provider(|player| player.set_tones(tones));
    }

    if let Some(report) = scheduler.wait().await {
        println!(
            "played {} units ({} silent), finished: {}",
            report.units_played, report.tone_failures, report.completed
        );
    }
    Ok(())
}
