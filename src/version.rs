//! Protocol version values exchanged with the external protocol subsystem.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Release channel a provider tags each registered protocol with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseChannel {
    Classic,
    Alpha,
    Beta,
    /// Releases that predate the netty rewrite and reuse the id space.
    ReleaseLegacy,
    Release,
    /// Snapshots, auto-detect placeholders and similar entries.
    Special,
}

impl ReleaseChannel {
    /// Era used as the leading ordering key. Protocol ids are only comparable
    /// within one era; snapshots and other special entries share the netty
    /// era with regular releases.
    pub fn era(self) -> u8 {
        match self {
            ReleaseChannel::Classic => 0,
            ReleaseChannel::Alpha => 1,
            ReleaseChannel::Beta => 2,
            ReleaseChannel::ReleaseLegacy => 3,
            ReleaseChannel::Release | ReleaseChannel::Special => 4,
        }
    }
}

fn is_release_channel(channel: &ReleaseChannel) -> bool {
    *channel == ReleaseChannel::Release
}

fn release_channel() -> ReleaseChannel {
    ReleaseChannel::Release
}

/// A protocol version as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawVersion {
    pub name: String,
    pub id: i32,
    pub channel: ReleaseChannel,
}

impl RawVersion {
    pub fn new(name: impl Into<String>, id: i32, channel: ReleaseChannel) -> Self {
        Self {
            name: name.into(),
            id,
            channel,
        }
    }

    pub fn release(name: impl Into<String>, id: i32) -> Self {
        Self::new(name, id, ReleaseChannel::Release)
    }

    pub fn is_release(&self) -> bool {
        self.channel == ReleaseChannel::Release
    }
}

/// One protocol version as seen by client code.
///
/// Handles are plain values: they are rebuilt from provider data on every
/// query and compare equal whenever their protocol ids match, regardless of
/// display name. The release channel is kept for ordering only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VersionHandle {
    name: String,
    id: i32,
    #[serde(default = "release_channel", skip_serializing_if = "is_release_channel")]
    channel: ReleaseChannel,
}

impl VersionHandle {
    pub fn new(name: impl Into<String>, id: i32) -> Self {
        Self::with_channel(name, id, ReleaseChannel::Release)
    }

    pub fn with_channel(name: impl Into<String>, id: i32, channel: ReleaseChannel) -> Self {
        Self {
            name: name.into(),
            id,
            channel,
        }
    }

    pub fn channel(&self) -> ReleaseChannel {
        self.channel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl PartialEq for VersionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VersionHandle {}

impl Hash for VersionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for VersionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl From<RawVersion> for VersionHandle {
    fn from(raw: RawVersion) -> Self {
        Self {
            name: raw.name,
            id: raw.id,
            channel: raw.channel,
        }
    }
}

impl From<&RawVersion> for VersionHandle {
    fn from(raw: &RawVersion) -> Self {
        Self::with_channel(raw.name.clone(), raw.id, raw.channel)
    }
}
