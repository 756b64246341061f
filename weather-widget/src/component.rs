//! Component trait for the widget's UI pieces

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// Props carry everything read-only, focus included. Cursor position or a
/// list highlight may live in `&mut self`; anything the reducer owns changes
/// only through the returned actions.
pub trait Component<A> {
    type Props<'a>;

    /// Returns `None`, `Some(action)` or a `Vec` of actions.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
