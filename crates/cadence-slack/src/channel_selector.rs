use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Conversation entry returned by `users.conversations`.
pub struct SlackChannel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Identifies the channel to report on by name, id, or both.
pub struct ChannelSelector {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl ChannelSelector {
    /// Builds a selector from optional raw values, ignoring blank entries.
    pub fn new(name: Option<&str>, id: Option<&str>) -> Self {
        let normalize = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            name: normalize(name),
            id: normalize(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none()
    }

    pub fn matches(&self, channel: &SlackChannel) -> bool {
        self.name.as_deref() == Some(channel.name.as_str())
            || self.id.as_deref() == Some(channel.id.as_str())
    }

    /// First channel in listing order accepted by this selector.
    pub fn find<'a>(&self, channels: &'a [SlackChannel]) -> Option<&'a SlackChannel> {
        channels.iter().find(|channel| self.matches(channel))
    }

    pub fn describe(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), Some(id)) => format!("name={name} id={id}"),
            (Some(name), None) => format!("name={name}"),
            (None, Some(id)) => format!("id={id}"),
            (None, None) => "(none)".to_string(),
        }
    }
}
