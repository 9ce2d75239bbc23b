//! Display buffers and face state.

use platform::scene::LAYER_TEXT_CAPACITY;
use platform::dictionary::MAX_TEXT_LEN;
use ui::BoundedText;

/// `HH:MM` plus slack.
pub const TIME_CAPACITY: usize = 8;
/// `MM/DD` plus slack.
pub const DATE_CAPACITY: usize = 8;
/// `-2147483648°C` does not fit; ordinary temperatures do.
pub const TEMPERATURE_CAPACITY: usize = 8;
/// Copied text fields, as long as the longest wire text.
pub const FIELD_CAPACITY: usize = MAX_TEXT_LEN;
/// Composite lines, as long as a host text layer holds.
pub const LINE_CAPACITY: usize = LAYER_TEXT_CAPACITY;

/// Everything the face displays, plus the sign flag and tick counter.
#[derive(Debug, Clone, Default)]
pub struct FaceState {
    /// `HH:MM`
    pub time: BoundedText<TIME_CAPACITY>,
    /// `MM/DD`
    pub date: BoundedText<DATE_CAPACITY>,
    /// `{t}°C`
    pub temperature: BoundedText<TEMPERATURE_CAPACITY>,
    /// Raw conditions text
    pub conditions: BoundedText<FIELD_CAPACITY>,
    /// `{temperature}, {conditions}`
    pub weather: BoundedText<LINE_CAPACITY>,
    /// Raw price text
    pub price: BoundedText<FIELD_CAPACITY>,
    /// Raw change text
    pub change: BoundedText<FIELD_CAPACITY>,
    /// Composed quote line
    pub quote: BoundedText<LINE_CAPACITY>,
    /// Latest change was negative; kept until a message says otherwise
    pub negative: bool,
    /// Minute ticks handled since start
    pub ticks_fired: u32,
}

impl FaceState {
    /// Empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one fired tick. Returns `true` when the count reaches a multiple
    /// of `interval`; an interval of `0` never fires.
    pub fn record_tick(&mut self, interval: u32) -> bool {
        self.ticks_fired = self.ticks_fired.wrapping_add(1);
        self.ticks_fired.checked_rem(interval) == Some(0)
    }
}
