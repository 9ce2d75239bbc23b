//! Weather line formatting.

use crate::text::BoundedText;

/// Write `"{celsius}°C"`.
pub fn format_temperature<const N: usize>(out: &mut BoundedText<N>, celsius: i32) -> bool {
    out.format(format_args!("{celsius}°C"))
}

/// Write the combined weather line `"{temperature}, {conditions}"`.
pub fn compose_weather<const N: usize>(
    out: &mut BoundedText<N>,
    temperature: &str,
    conditions: &str,
) -> bool {
    out.format(format_args!("{temperature}, {conditions}"))
}
