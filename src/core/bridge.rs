//! # Playground Bridge
//!
//! The one-directional channel an embedded playground uses to report live
//! parameter changes back to the hosting step context. The host never reaches
//! into the playground's internals and the playground never touches
//! navigation state — this boundary is what keeps the navigator and quiz
//! engine testable without any rendering environment.
//!
//! Events flow over a plain `std::sync::mpsc` channel and are drained by the
//! event loop into `Action::ParameterChanged`, the same pattern the rest of
//! the app uses for anything that happens outside the reducer.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use log::warn;

/// A live parameter value. Playground parameters are numbers, text, or flags;
/// nothing richer crosses the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n:.2}"),
            ParamValue::Text(s) => write!(f, "{s}"),
            ParamValue::Flag(true) => write!(f, "on"),
            ParamValue::Flag(false) => write!(f, "off"),
        }
    }
}

/// One reported change: a parameter name and its new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterChange {
    pub name: String,
    pub value: ParamValue,
}

/// The playground's half of the channel. Cheap to clone; each embedded
/// playground gets its own handle.
#[derive(Clone)]
pub struct PlaygroundBridge {
    tx: Sender<ParameterChange>,
}

impl PlaygroundBridge {
    /// Create a bridge and the host-side receiver it reports into.
    pub fn channel() -> (Self, Receiver<ParameterChange>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Report a parameter change to the host. A closed receiver means the
    /// host went away mid-session; the playground just logs and carries on.
    pub fn on_parameter_change(&self, name: &str, value: ParamValue) {
        let change = ParameterChange {
            name: name.to_string(),
            value,
        };
        if self.tx.send(change).is_err() {
            warn!("parameter change for '{name}' dropped: host receiver closed");
        }
    }
}
