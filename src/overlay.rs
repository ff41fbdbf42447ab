//! Full-window navigation menu and the Escape key priority.

use crate::gallery::Gallery;
use crate::media::MediaHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavOverlay {
    open: bool,
}

impl NavOverlay {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// What an Escape press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    ClosedMenu,
    CollapsedDetails(usize),
}

impl<M: MediaHandle> Gallery<M> {
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn open_menu(&mut self) {
        if self.menu.open {
            return;
        }
        self.menu.open = true;
        self.gate.menu_open = true;
        self.pause_all();
        log::debug!("Menu opened");
    }

    /// Closing does not restore the pre-menu set; it re-checks what is on screen.
    pub fn close_menu(&mut self) {
        if !self.menu.open {
            return;
        }
        self.menu.open = false;
        self.gate.menu_open = false;
        self.resume_visible();
        self.evaluate_visibility();
        log::debug!("Menu closed");
    }

    pub fn toggle_menu(&mut self) {
        if self.menu.open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Closes the menu if it is open, otherwise collapses every expanded panel.
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.menu.open {
            self.close_menu();
            EscapeOutcome::ClosedMenu
        } else {
            EscapeOutcome::CollapsedDetails(self.collapse_all_details())
        }
    }
}
