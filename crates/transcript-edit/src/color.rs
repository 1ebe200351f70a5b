//! Deterministic speaker color assignment.
//!
//! Colors are a pure function of the speaker's position in the first-seen
//! assignment order carried by the view model — no hidden cache, so the
//! same view always renders the same colors.

/// Ten distinguishable defaults; assignment wraps past the end.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F06292", "#AED581", "#7986CB",
    "#4DB6AC", "#FFF176",
];

/// The color for `speaker`, or `None` when the speaker is not in the
/// assignment order or the palette is empty.
pub fn color_for<'a>(
    speaker: &str,
    palette: &'a [&'a str],
    assignment_order: &[String],
) -> Option<&'a str> {
    if palette.is_empty() {
        return None;
    }

    let position = assignment_order.iter().position(|name| name == speaker)?;
    Some(palette[position % palette.len()])
}
