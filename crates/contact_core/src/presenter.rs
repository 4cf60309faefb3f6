use crate::OutcomeKind;

/// Narrow rendering contract the controller's effects are delivered to.
pub trait Presenter {
    fn show_field_error(&mut self, field: &str, message: &str);
    fn clear_field_error(&mut self, field: &str);
    fn show_busy(&mut self, busy: bool);
    fn show_outcome_message(&mut self, kind: OutcomeKind, html: &str);
    /// Renders the form back to its empty state.
    fn clear_form(&mut self);
}
