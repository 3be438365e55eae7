//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod toasts;

use crate::app::App;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let main_area = layout::create_layout(area);

    forms::draw_profile_form(frame, main_area, app);

    layout::draw_status_bar(frame, app);

    // Toasts overlay everything else
    toasts::draw_toasts(frame, main_area, app.toasts.visible(), Instant::now());
}
