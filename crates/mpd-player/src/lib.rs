//! Plays a single clip through a music player daemon (mpd).

use std::fmt;
use std::net::SocketAddr;

use mpd::error::Error as MpdError;
use mpd::{Client, Song, State};
use tracing::{debug, instrument, warn};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No clip to play configured")]
    MissingClip,
    #[error("Could not connect to mpd at {addr}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: MpdError,
    },
    #[error("Could not {step} {clip}")]
    Command {
        step: &'static str,
        clip: String,
        #[source]
        source: MpdError,
    },
}

pub struct MpdPlayer {
    addr: SocketAddr,
    /// path relative to the mpd music directory
    clip: String,
    client: Client,
}

impl fmt::Debug for MpdPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpdPlayer")
            .field("addr", &self.addr)
            .field("clip", &self.clip)
            .finish()
    }
}

impl MpdPlayer {
    #[instrument(err)]
    pub fn connect(addr: SocketAddr, clip: String) -> Result<Self, Error> {
        if clip.is_empty() {
            return Err(Error::MissingClip);
        }

        let connect_err = |source| Error::Connect { addr, source };
        let mut client = Client::connect(addr).map_err(connect_err)?;
        client.status().map_err(connect_err)?;
        Ok(Self { addr, clip, client })
    }

    /// Replaces whatever is queued with the clip and starts it from the
    /// beginning. Returns as soon as playback started.
    #[instrument(skip(self), fields(clip = %self.clip))]
    pub fn play(&mut self) -> Result<(), Error> {
        let song = Song {
            file: self.clip.clone(),
            ..Song::default()
        };
        self.command("clear the queue before queueing", |c| c.clear())?;
        self.command("queue", |c| c.push(&song).map(|_id| ()))?;
        self.command("start playing", |c| c.play())?;
        debug!("started playback");
        Ok(())
    }

    /// An unreachable mpd counts as not playing
    pub fn is_playing(&mut self) -> bool {
        match self.with_reconnect(|c| c.status()) {
            Ok(status) => status.state == State::Play,
            Err(e) => {
                warn!("Could not get mpd status, assuming not playing: {e}");
                false
            }
        }
    }

    fn command(
        &mut self,
        step: &'static str,
        op: impl Fn(&mut Client) -> mpd::error::Result<()>,
    ) -> Result<(), Error> {
        self.with_reconnect(op).map_err(|source| Error::Command {
            step,
            clip: self.clip.clone(),
            source,
        })
    }

    /// The connection drops when mpd restarts or after its idle timeout,
    /// that shows up as an io or parse error. Then we try once more on a
    /// fresh connection.
    fn with_reconnect<T>(
        &mut self,
        op: impl Fn(&mut Client) -> mpd::error::Result<T>,
    ) -> mpd::error::Result<T> {
        match op(&mut self.client) {
            Err(MpdError::Io(_)) => (),
            Err(MpdError::Parse(_)) => (),
            other => return other,
        }

        debug!("IOError or ParseError, reconnecting...");
        self.client = Client::connect(self.addr)?;
        op(&mut self.client)
    }
}
