//! Keeps wheel events away from the gallery scrollable.
//!
//! The wheel drives snap navigation through the app-level event listener, so
//! the scrollable itself must never see it. Layout, drawing, clicks and
//! widget operations (`scroll_to`) all go straight to the wrapped content.

use iced::advanced::layout::{self, Layout};
use iced::advanced::widget::{self, Tree, Widget};
use iced::advanced::{mouse, renderer, Clipboard, Shell};
use iced::{Element, Event, Length, Rectangle, Renderer, Size, Theme};

pub struct WheelGuard<'a, Message> {
    content: Element<'a, Message>,
}

pub fn wheel_guard<'a, Message>(
    content: impl Into<Element<'a, Message>>,
) -> WheelGuard<'a, Message> {
    WheelGuard {
        content: content.into(),
    }
}

fn swallows(event: &Event) -> bool {
    matches!(event, Event::Mouse(mouse::Event::WheelScrolled { .. }))
}

impl<Message> Widget<Message, Theme, Renderer> for WheelGuard<'_, Message> {
    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let inner = &mut tree.children[0];
        self.content.as_widget_mut().layout(inner, renderer, limits)
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let inner = &tree.children[0];
        self.content
            .as_widget()
            .draw(inner, renderer, theme, style, layout, cursor, viewport);
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        if swallows(event) {
            return;
        }
        let inner = &mut tree.children[0];
        self.content
            .as_widget_mut()
            .update(inner, event, layout, cursor, renderer, clipboard, shell, viewport);
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        let inner = &tree.children[0];
        self.content
            .as_widget()
            .mouse_interaction(inner, layout, cursor, viewport, renderer)
    }

    fn operate(
        &mut self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        let inner = &mut tree.children[0];
        self.content
            .as_widget_mut()
            .operate(inner, layout, renderer, operation);
    }
}

impl<'a, Message: 'a> From<WheelGuard<'a, Message>> for Element<'a, Message> {
    fn from(guard: WheelGuard<'a, Message>) -> Self {
        Element::new(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_wheel_is_swallowed() {
        let wheel = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Pixels { x: 0.0, y: 40.0 },
        });
        let click = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: iced::Point::ORIGIN,
        });
        assert!(swallows(&wheel));
        assert!(!swallows(&click));
        assert!(!swallows(&moved));
    }
}
