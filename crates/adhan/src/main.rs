use adhan::automation::{Automation, SELF_TEST_SETTLE};
use adhan::config::{Cli, Config};
use adhan::time;
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use home_assistant::HomeAssistant;
use mpd_player::MpdPlayer;
use prayer_times::StaticTable;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logger::tracing::setup();

    let config = Config::try_from(cli).wrap_err("Invalid arguments")?;
    info!("starting with {config:?}");

    let prayer_times =
        StaticTable::from_file(&config.schedule, config.time_zone.clone())
            .wrap_err("Could not load the prayer times")?;
    let switch = HomeAssistant::connect(config.home_assistant.clone())
        .wrap_err("Could not set up the speaker switch")?;
    let player = MpdPlayer::connect(config.mpd, config.adhan_file.clone())
        .wrap_err("Could not set up the adhan player")?;

    let mut automation =
        Automation::new(player, switch, prayer_times, config.speaker_pause)
            .wrap_err("Could not set up the automation")?;
    automation
        .validate_all_actions(SELF_TEST_SETTLE)
        .wrap_err("Failed to validate all actions")?;

    loop {
        let now = time::now(&config.time_zone);
        let sleep = automation
            .run(&now)
            .wrap_err("Running the automation failed")?;
        time::sleep(sleep, &config.time_zone);
    }
}
