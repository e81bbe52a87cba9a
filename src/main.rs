use color_eyre::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
#[tokio::main]
async fn main() -> Result<()> {
    use joyinput::config::{default_config_path, JoyInputConfig};
    use joyinput::joy::JoyInput;
    use joyinput::polling::gilrs_poller::GilrsPoller;
    use joyinput::profile::{self, NativePlatform, PlatformProfile};
    use tokio_util::sync::CancellationToken;

    setup()?;

    let config_path = default_config_path();
    let config = JoyInputConfig::load_or_create(&config_path).await?;
    info!("Using config {}: {:?}", config_path.display(), config);

    profile::validate_all()?;

    info!("Starting poller for the {} profile", NativePlatform::PLATFORM);
    let poller = GilrsPoller::create(NativePlatform::profile(), config.max_players)?.initialize();
    let mut joy = JoyInput::<NativePlatform, _>::new(poller)?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
        signal_token.cancel();
    });

    poll_loop::run(&mut joy, &config, shutdown).await;

    info!("Stopped after {} cycles", joy.service().tracker().cycle());
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn main() -> Result<()> {
    setup()?;
    error!("No controller profile exists for this target platform");
    Ok(())
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod poll_loop {
    use joyinput::config::JoyInputConfig;
    use joyinput::joy::{JoyInput, PlayerReport};
    use joyinput::polling::gilrs_poller::{GilrsPoller, Polling};
    use joyinput::profile::PlatformProfile;
    use joyinput::PlayerIndex;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::time::MissedTickBehavior;
    use tokio_util::sync::CancellationToken;
    use tracing::{debug, info};

    /// Polls once per configured interval and logs player reports until
    /// `shutdown` is cancelled.
    pub async fn run<P: PlatformProfile>(
        joy: &mut JoyInput<P, GilrsPoller<Polling>>,
        config: &JoyInputConfig,
        shutdown: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Last logged report per player
        let mut reported: HashMap<PlayerIndex, PlayerReport> = HashMap::new();

        info!(
            "Polling every {}ms for up to {} players",
            config.poll_interval_ms,
            joy.service().max_players()
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Polling loop received shutdown signal");
                    break;
                }
                _ = interval.tick() => {
                    let cycle = joy.service_mut().poll_cycle();
                    let players = joy.service().players();
                    reported.retain(|player, _| players.contains(player));

                    for player in players {
                        let report = PlayerReport::capture(joy, player);

                        let changed = reported
                            .get(&player)
                            .map_or(report.is_active(), |last| report.has_significant_changes(last));

                        if changed || !config.report_changes_only {
                            info!("Cycle {} player {}: {:?}", cycle, player, report);
                            reported.insert(player, report);
                        }
                    }

                    if cycle % 1000 == 0 {
                        let snapshot = joy.service().tracker().current();
                        debug!(
                            "Cycle {} captured at {}: {} axes, {} held codes",
                            cycle,
                            snapshot.captured_at,
                            snapshot.axis_count(),
                            snapshot.held_count()
                        );
                    }
                }
            }
        }
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
