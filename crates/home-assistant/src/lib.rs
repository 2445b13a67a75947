//! Turns a Home Assistant `switch` entity on and off through the Home
//! Assistant REST api.
//!
//! Every call is a single blocking request, a failed one is reported and not
//! retried.

use std::fmt;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{info, instrument};


#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No home assistant url configured")]
    MissingUrl,
    #[error("No home assistant access token configured")]
    MissingToken,
    #[error("No switch entity id configured")]
    MissingSwitchId,
    #[error("Could not set up http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request {method} {url} failed")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Home assistant answered {method} {url} with {status}, body: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Could not {action} {switch_id}")]
    Switch {
        action: Action,
        switch_id: String,
        #[source]
        source: Box<Error>,
    },
    #[error("Could not verify url, token and switch id by querying the switch")]
    Verify(#[source] Box<Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnOn,
    TurnOff,
}

impl Action {
    fn path(self) -> &'static str {
        match self {
            Action::TurnOn => "/api/services/switch/turn_on",
            Action::TurnOff => "/api/services/switch/turn_off",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::TurnOn => f.write_str("switch on"),
            Action::TurnOff => f.write_str("switch off"),
        }
    }
}

const STATES: &str = "/api/states/";

#[derive(Clone)]
pub struct Config {
    /// For example `http://192.168.1.10:8123`
    pub url: String,
    /// A long lived access token, create one on the users profile page
    pub token: String,
    /// The entity, for example `switch.speaker`
    pub switch_id: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("switch_id", &self.switch_id)
            .finish_non_exhaustive()
    }
}

pub struct HomeAssistant {
    client: Client,
    url: String,
    token: String,
    switch_id: String,
}

impl fmt::Debug for HomeAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeAssistant")
            .field("url", &self.url)
            .field("switch_id", &self.switch_id)
            .finish_non_exhaustive()
    }
}

impl HomeAssistant {
    /// Queries the switch once so a wrong url, token or switch id is
    /// noticed here and not on the first prayer.
    #[instrument(err)]
    pub fn connect(config: Config) -> Result<Self, Error> {
        let url = config.url.trim_end_matches('/');
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }
        if config.token.is_empty() {
            return Err(Error::MissingToken);
        }
        if config.switch_id.is_empty() {
            return Err(Error::MissingSwitchId);
        }

        let this = Self {
            client: Client::builder().build().map_err(Error::Client)?,
            url: url.to_owned(),
            token: config.token,
            switch_id: config.switch_id,
        };
        this.status().map_err(|e| Error::Verify(Box::new(e)))?;
        Ok(this)
    }

    pub fn switch_id(&self) -> &str {
        &self.switch_id
    }

    /// Returns the body home assistant acknowledged with
    pub fn turn_on(&self) -> Result<String, Error> {
        self.switch(Action::TurnOn)
    }

    /// Returns the body home assistant acknowledged with
    pub fn turn_off(&self) -> Result<String, Error> {
        self.switch(Action::TurnOff)
    }

    /// The state of the switch as json
    pub fn status(&self) -> Result<String, Error> {
        let url = format!("{}{STATES}{}", self.url, self.switch_id);
        let request = self.client.get(&url);
        self.send("GET", url, request)
    }

    fn switch(&self, action: Action) -> Result<String, Error> {
        let url = format!("{}{}", self.url, action.path());
        let request = self
            .client
            .post(&url)
            .json(&json!({ "entity_id": self.switch_id }));
        let body = self.send("POST", url, request).map_err(|source| {
            Error::Switch {
                action,
                switch_id: self.switch_id.clone(),
                source: Box::new(source),
            }
        })?;
        info!("Speaker {action} succeeded");
        Ok(body)
    }

    fn send(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<String, Error> {
        let response = match request.bearer_auth(&self.token).send() {
            Ok(response) => response,
            Err(source) => {
                return Err(Error::Request {
                    method,
                    url,
                    source,
                })
            }
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(source) => {
                return Err(Error::Request {
                    method,
                    url,
                    source,
                })
            }
        };

        if status != StatusCode::OK {
            return Err(Error::Status {
                method,
                url,
                status,
                body,
            });
        }
        Ok(body)
    }
}
