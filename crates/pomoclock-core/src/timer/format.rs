/// Render a second count as `MM:SS`, zero-padding both fields.
///
/// Minutes are not folded into hours, so 3600 renders as `60:00`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
