use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ActionBar, ResultView, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Split the frame into title / url / params / action bar / result areas.
pub fn layout_areas(area: Rect, tui: &TuiState) -> [Rect; 5] {
    use Constraint::{Length, Min};

    let url_height = tui.url_field.calculate_height(area.width);
    let params_height = tui.params_field.calculate_height(area.width);
    Layout::vertical([
        Length(1),
        Length(url_height),
        Length(params_height),
        Length(1),
        Min(0),
    ])
    .areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, url_area, params_area, action_area, result_area] =
        layout_areas(frame.area(), tui);

    TitleBar {
        client_name: app.service.client_name().to_string(),
        status_message: app.status_message.clone(),
        in_flight: app.in_flight,
        completed_at: app
            .last_completed
            .map(|t| t.format("%H:%M:%S").to_string()),
        spinner_frame: tui.spinner_frame,
    }
    .render(frame, title_area);

    tui.url_field.focused = tui.focus == Focus::Url;
    tui.params_field.focused = tui.focus == Focus::Params;
    tui.url_field.render(frame, url_area);
    tui.params_field.render(frame, params_area);

    ActionBar {
        in_flight: app.in_flight,
    }
    .render(frame, action_area);

    ResultView {
        text: &app.result,
        state: &mut tui.result_view,
    }
    .render(frame, result_area);
}
