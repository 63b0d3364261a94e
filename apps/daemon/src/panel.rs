use clipdeck_paste::PanelControl;

/// Stand-in for the presentation panel: there is nothing to hide, so the
/// request is only logged.
pub struct LogPanel;

impl PanelControl for LogPanel {
    fn hide(&self) {
        tracing::debug!("panel hide requested");
    }
}
