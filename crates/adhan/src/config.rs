use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jiff::tz::TimeZone;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Entity id of the speaker switch in home assistant, for
    /// example: `switch.speaker`
    #[arg(long)]
    pub switch_id: String,

    /// Url of the local home assistant instance, format as:
    /// http://192.168.1.10:8123
    #[arg(long)]
    pub home_assistant_url: String,

    /// Long lived access token for home assistant
    #[arg(long)]
    pub home_assistant_token: String,

    /// Address of the music player daemon that plays the adhan
    #[arg(long, default_value_t = SocketAddr::from(([127, 0, 0, 1], 6600)))]
    pub mpd: SocketAddr,

    /// Path to the adhan relative to the music directory of mpd
    #[arg(long, default_value = "adhan.mp3")]
    pub adhan_file: String,

    /// Seconds between switching on the speaker and playing the adhan
    #[arg(long, default_value_t = 10)]
    pub speaker_pause: u64,

    /// Ron file with the prayer times
    #[arg(long, default_value = "schedule.ron")]
    pub schedule: PathBuf,

    /// Time zone the prayer times are in, for example: Europe/Berlin
    #[arg(long, default_value = "Europe/Berlin")]
    pub time_zone: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The switch id can not be empty")]
    EmptySwitchId,
    #[error("The home assistant url can not be empty")]
    EmptyUrl,
    #[error("The home assistant token can not be empty")]
    EmptyToken,
    #[error("The adhan file can not be empty")]
    EmptyAdhanFile,
    #[error("The speaker pause must be at least one second")]
    ZeroPause,
    #[error("Unknown time zone: {name}")]
    TimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },
}

/// Validated [`Cli`]
#[derive(Debug, Clone)]
pub struct Config {
    pub home_assistant: home_assistant::Config,
    pub mpd: SocketAddr,
    pub adhan_file: String,
    pub speaker_pause: Duration,
    pub schedule: PathBuf,
    pub time_zone: TimeZone,
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self, Error> {
        if cli.switch_id.trim().is_empty() {
            return Err(Error::EmptySwitchId);
        }
        if cli.home_assistant_url.trim_end_matches('/').is_empty() {
            return Err(Error::EmptyUrl);
        }
        if cli.home_assistant_token.is_empty() {
            return Err(Error::EmptyToken);
        }
        if cli.adhan_file.is_empty() {
            return Err(Error::EmptyAdhanFile);
        }
        if cli.speaker_pause == 0 {
            return Err(Error::ZeroPause);
        }

        let time_zone =
            TimeZone::get(&cli.time_zone).map_err(|source| Error::TimeZone {
                name: cli.time_zone.clone(),
                source,
            })?;

        Ok(Self {
            home_assistant: home_assistant::Config {
                url: cli.home_assistant_url,
                token: cli.home_assistant_token,
                switch_id: cli.switch_id,
            },
            mpd: cli.mpd,
            adhan_file: cli.adhan_file,
            speaker_pause: Duration::from_secs(cli.speaker_pause),
            schedule: cli.schedule,
            time_zone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `overrides` replaces the value of a required option or adds an option
    fn parse(overrides: &[(&str, &str)]) -> Result<Config, Error> {
        let mut options = vec![
            ("--switch-id", "switch.speaker"),
            ("--home-assistant-url", "http://192.168.1.10:8123"),
            ("--home-assistant-token", "secret"),
        ];
        for (option, value) in overrides {
            match options.iter_mut().find(|(o, _)| o == option) {
                Some(existing) => existing.1 = *value,
                None => options.push((*option, *value)),
            }
        }

        let args = options.into_iter().flat_map(|(o, v)| [o, v]);
        let cli = Cli::try_parse_from(["adhan"].into_iter().chain(args))
            .unwrap();
        Config::try_from(cli)
    }

    #[test]
    fn defaults() {
        let config = parse(&[("--time-zone", "UTC")]).unwrap();
        assert_eq!(config.speaker_pause, Duration::from_secs(10));
        assert_eq!(config.mpd, SocketAddr::from(([127, 0, 0, 1], 6600)));
        assert_eq!(config.adhan_file, "adhan.mp3");
        assert_eq!(config.schedule, PathBuf::from("schedule.ron"));
        assert_eq!(config.home_assistant.switch_id, "switch.speaker");
    }

    #[test]
    fn switch_id_is_required() {
        let res = Cli::try_parse_from(["adhan", "--home-assistant-url", "x"]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_empty_values() {
        assert!(matches!(
            parse(&[("--switch-id", " ")]),
            Err(Error::EmptySwitchId)
        ));
        assert!(matches!(
            parse(&[("--home-assistant-url", "/")]),
            Err(Error::EmptyUrl)
        ));
        assert!(matches!(
            parse(&[("--home-assistant-token", "")]),
            Err(Error::EmptyToken)
        ));
        assert!(matches!(
            parse(&[("--adhan-file", "")]),
            Err(Error::EmptyAdhanFile)
        ));
    }

    #[test]
    fn rejects_zero_pause() {
        assert!(matches!(
            parse(&[("--speaker-pause", "0")]),
            Err(Error::ZeroPause)
        ));
    }

    #[test]
    fn rejects_unknown_time_zone() {
        assert!(matches!(
            parse(&[("--time-zone", "Nowhere/Atlantis")]),
            Err(Error::TimeZone { .. })
        ));
    }
}
