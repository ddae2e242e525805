//! Demo binary: plays clips from a directory through the director.
//!
//! Usage: audio-director-demo [ASSET_DIR] [MUSIC_CLIP] [SOUND_CLIPS...]

use std::thread;
use std::time::Duration;

use anyhow::Context;

use audio_director::{
    AudioCommand, AudioDirector, AudioResult, AudioSettings, Channel, PlayParams, RodioBackend,
};

/// Console logging, filter taken from RUST_LOG with an info default
fn initialize_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}

fn main() -> AudioResult<()> {
    initialize_tracing();

    println!("===========================================");
    println!("  audio-director demo");
    println!("===========================================\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let asset_dir = args
        .first()
        .cloned()
        .unwrap_or_else(|| "assets".to_string());
    let music = args.get(1).cloned().unwrap_or_else(|| "theme.mp3".to_string());
    let sounds: Vec<String> = args.iter().skip(2).cloned().collect();

    let settings = AudioSettings::load().context("loading audio settings")?;
    tracing::info!(
        "Settings: music {} / voice {} / sound {} (pool of {})",
        if settings.music_on { "on" } else { "off" },
        if settings.voice_on { "on" } else { "off" },
        if settings.sound_on { "on" } else { "off" },
        settings.max_sound_units
    );

    let backend = RodioBackend::new(&asset_dir);
    let mut director = AudioDirector::new(backend, settings);
    let (notices, _subscription) = director.subscribe();

    tracing::info!("Playing {} from {}", music, asset_dir);
    director.post(AudioCommand::PlayMusic {
        params: PlayParams::clip(music).with_on_finish(|| {
            tracing::info!("Music finished");
        }),
    });

    if !sounds.is_empty() {
        tracing::info!("Queueing {} sound clips as a sequence", sounds.len());
        director.post(AudioCommand::PlaySequence {
            channel: Channel::Sound,
            clips: sounds,
        });
    }

    // Tick at roughly frame rate until everything drains
    let mut idle_ticks = 0u32;
    loop {
        director.tick();

        while let Ok(notice) = notices.try_recv() {
            tracing::info!("{}", notice.description());
        }

        let quiet = director.music_clip().is_none()
            && director.voice_clip().is_none()
            && director.active_sounds() == 0
            && !director.is_sequence_active();

        if quiet {
            idle_ticks += 1;
            // A short grace period so late notices still get printed
            if idle_ticks > 30 {
                break;
            }
        } else {
            idle_ticks = 0;
        }

        thread::sleep(Duration::from_millis(16));
    }

    tracing::info!("Done");
    Ok(())
}
