//! Outbound notification seam toward the host bridge.

/// Callback surface the host exposes into the view.
///
/// The view makes exactly one outbound call: reporting field selection. It is
/// fire-and-forget; no return value is consumed.
pub trait Notifier {
    /// Cell (x, y) was newly selected; `(-1, -1)` means the selection
    /// cleared.
    fn on_field_selected(&mut self, x: i32, y: i32);
}

/// Notifier that drops all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn on_field_selected(&mut self, _x: i32, _y: i32) {}
}
