// Channel to instrument name mapping

/// MIDI channel conventionally reserved for percussion.
pub const PERCUSSION_CHANNEL: u8 = 9;

// General MIDI program names for the default program of each channel,
// soundfont naming convention. Display and notification text only;
// instrument lookup is always by channel number.
const CHANNEL_INSTRUMENT_NAMES: [&str; 16] = [
    "acoustic_grand_piano",
    "bright_acoustic_piano",
    "electric_grand_piano",
    "honkytonk_piano",
    "electric_piano_1",
    "electric_piano_2",
    "harpsichord",
    "clavinet",
    "celesta",
    "glockenspiel",
    "music_box",
    "vibraphone",
    "marimba",
    "xylophone",
    "tubular_bells",
    "dulcimer",
];

/// Name of the instrument implied by a channel. Pure and total.
pub fn instrument_name(channel: u8) -> &'static str {
    if channel == PERCUSSION_CHANNEL {
        return "percussion";
    }
    CHANNEL_INSTRUMENT_NAMES[channel as usize % CHANNEL_INSTRUMENT_NAMES.len()]
}
