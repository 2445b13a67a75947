//! The real speaker switch and player behind the [`automation`] traits.
//!
//! [`automation`]: crate::automation

use home_assistant::HomeAssistant;
use mpd_player::MpdPlayer;

use crate::automation::{Player, Switch};

impl Switch for HomeAssistant {
    type Error = home_assistant::Error;

    fn turn_on(&mut self) -> Result<String, Self::Error> {
        HomeAssistant::turn_on(self)
    }

    fn turn_off(&mut self) -> Result<String, Self::Error> {
        HomeAssistant::turn_off(self)
    }
}

impl Player for MpdPlayer {
    type Error = mpd_player::Error;

    fn play(&mut self) -> Result<(), Self::Error> {
        MpdPlayer::play(self)
    }

    fn is_playing(&mut self) -> bool {
        MpdPlayer::is_playing(self)
    }
}
