/// SSID stems used for generated networks; the roster index is appended.
const SSID_STEMS: [&str; 8] = [
    "HomeNet", "CoffeeBar", "Office", "Guest", "Lab", "Library", "Printer", "",
];

/// 2.4 GHz channels a generated network may sit on.
pub const CHANNELS_2GHZ: [i32; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
/// 5 GHz channels a generated network may sit on.
pub const CHANNELS_5GHZ: [i32; 9] = [36, 40, 44, 48, 52, 100, 149, 157, 165];

/// SSID for a roster slot. Every eighth network is hidden.
pub fn ssid_for(index: usize) -> String {
    let stem = SSID_STEMS[index % SSID_STEMS.len()];
    if stem.is_empty() {
        String::new()
    } else {
        format!("{}-{}", stem, index)
    }
}

/// Locally administered MAC derived from seed and slot.
pub fn bssid_for(seed: u64, index: usize) -> String {
    let value = seed.wrapping_mul(0x9E37_79B9).wrapping_add(index as u64);
    format!(
        "02:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        (value >> 32) & 0xFF,
        (value >> 24) & 0xFF,
        (value >> 16) & 0xFF,
        (value >> 8) & 0xFF,
        value & 0xFF
    )
}

pub fn frequency_for(channel: i32) -> u32 {
    if channel >= 36 {
        (5000 + channel * 5) as u32
    } else {
        (2407 + channel * 5) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifigraph::scan::WiFiBand;

    #[test]
    fn template_frequencies_round_trip_to_channels() {
        for channel in CHANNELS_2GHZ.iter().chain(CHANNELS_5GHZ.iter()) {
            assert_eq!(
                WiFiBand::channel_for_frequency(frequency_for(*channel)),
                Some(*channel)
            );
        }
    }

    #[test]
    fn bssids_differ_per_slot() {
        assert_ne!(bssid_for(7, 0), bssid_for(7, 1));
        assert!(ssid_for(7).is_empty());
        assert_eq!(ssid_for(1), "CoffeeBar-1");
    }
}
