//! Projection of the grid state onto the element tree.
//!
//! Each section (header, body, footer) is rebuilt wholesale when marked
//! dirty; there is no diffing. Paging then only toggles `hidden` on body
//! rows and refreshes the footer controls.

pub mod autosize;
mod body;
mod footer;
pub mod format;
mod header;

pub use autosize::{fit_widths, text_width, Measure, MIN_COLUMN_WIDTH};
pub use format::{interpolate, FormatFn, Formatters, TransformFn};

use crate::engine::{Dirty, GridCore};

impl GridCore {
    /// Rebuild the dirty sections. Returns which sections were rendered.
    pub fn render_dirty(&mut self) -> Dirty {
        let dirty = self.take_dirty();
        if dirty.header {
            self.render_header();
        }
        if dirty.body {
            self.render_body();
        }
        if dirty.footer {
            self.render_footer();
        }
        dirty
    }

    /// Full render: every section, then paging and root flags.
    pub fn render_table(&mut self) {
        self.invalidate_all();
        self.render_dirty();
        self.sync_view();
    }

    /// Paging and root flags, after any section render.
    pub fn sync_view(&mut self) {
        self.fix_page();
        self.paginate();
        self.sync_root_flags();
    }
}
