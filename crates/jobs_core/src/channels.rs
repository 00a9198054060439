//! Wi-Fi channel table.
//!
//! The 2.4 GHz channels the LR1110 radio can scan. Job documents name them
//! `CHANNEL_1` to `CHANNEL_14`.

use std::fmt;

/// A 2.4 GHz Wi-Fi channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WifiChannel(u8);

impl WifiChannel {
    /// Every channel, in ascending order.
    pub const ALL: [WifiChannel; 14] = [
        WifiChannel(1),
        WifiChannel(2),
        WifiChannel(3),
        WifiChannel(4),
        WifiChannel(5),
        WifiChannel(6),
        WifiChannel(7),
        WifiChannel(8),
        WifiChannel(9),
        WifiChannel(10),
        WifiChannel(11),
        WifiChannel(12),
        WifiChannel(13),
        WifiChannel(14),
    ];

    /// Returns the channel with the given number, if it exists.
    pub fn new(number: u8) -> Option<Self> {
        (1..=14).contains(&number).then_some(WifiChannel(number))
    }

    /// Name as written in job documents.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Center frequency in MHz.
    pub fn frequency_mhz(&self) -> u16 {
        // Channel 14 sits apart from the regular 5 MHz grid.
        if self.0 == 14 {
            2484
        } else {
            2407 + 5 * u16::from(self.0)
        }
    }

    /// Names of every channel, in ascending order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(WifiChannel::name).collect()
    }
}

impl fmt::Display for WifiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHANNEL_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let names = WifiChannel::names();
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "CHANNEL_1");
        assert_eq!(names[13], "CHANNEL_14");
    }

    #[test]
    fn test_frequencies() {
        assert_eq!(WifiChannel::new(1).unwrap().frequency_mhz(), 2412);
        assert_eq!(WifiChannel::new(6).unwrap().frequency_mhz(), 2437);
        assert_eq!(WifiChannel::new(13).unwrap().frequency_mhz(), 2472);
        assert_eq!(WifiChannel::new(14).unwrap().frequency_mhz(), 2484);
    }
}
