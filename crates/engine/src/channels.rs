//! Recipient channel resolver.
//!
//! Maps a recipient's declared preferences to the set of channels that fire
//! for them. A recipient without a preference entry has opted out of
//! everything — no delivery, no error.

use herald_common::types::{Channel, ChannelPreference};

/// The channels selected for one recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    pub wants_live: bool,
    pub wants_email: bool,
    /// Delivery address, present only when the preference entry carries one.
    pub email: Option<String>,
}

/// Resolve the channels for `username` from the event's preference list.
///
/// The first entry with a matching username wins; no entry means both flags
/// stay false.
pub fn resolve(preferences: &[ChannelPreference], username: &str) -> ChannelSelection {
    let Some(entry) = preferences.iter().find(|p| p.username == username) else {
        return ChannelSelection::default();
    };

    ChannelSelection {
        wants_live: entry.channels.contains(&Channel::Live),
        wants_email: entry.channels.contains(&Channel::Email),
        email: entry.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(username: &str, channels: Vec<Channel>, email: Option<&str>) -> Vec<ChannelPreference> {
        vec![ChannelPreference {
            username: username.to_string(),
            channels,
            email: email.map(String::from),
        }]
    }

    #[test]
    fn test_missing_username_is_a_valid_opt_out() {
        let selection = resolve(&prefs("Arrow", vec![Channel::Live], None), "Noah");
        assert_eq!(selection, ChannelSelection::default());
    }

    #[test]
    fn test_empty_preferences() {
        let selection = resolve(&[], "Noah");
        assert!(!selection.wants_live);
        assert!(!selection.wants_email);
    }

    #[test]
    fn test_both_channels() {
        let selection = resolve(
            &prefs("Noah", vec![Channel::Live, Channel::Email], Some("noah@uni.edu")),
            "Noah",
        );
        assert!(selection.wants_live);
        assert!(selection.wants_email);
        assert_eq!(selection.email.as_deref(), Some("noah@uni.edu"));
    }

    #[test]
    fn test_email_only() {
        let selection = resolve(&prefs("Noah", vec![Channel::Email], Some("noah@uni.edu")), "Noah");
        assert!(!selection.wants_live);
        assert!(selection.wants_email);
    }

    #[test]
    fn test_empty_channel_set() {
        let selection = resolve(&prefs("Noah", vec![], Some("noah@uni.edu")), "Noah");
        assert!(!selection.wants_live);
        assert!(!selection.wants_email);
    }
}
