use super::{Dashboard, LoadStatus, Message};
use crate::style;
use crate::widget::chart::StockChart;

use iced::{
    Element, Length,
    widget::{center, container, text},
};

pub fn view(dashboard: &Dashboard) -> Element<'_, Message> {
    if matches!(dashboard.status, LoadStatus::Loading) && dashboard.records.is_empty() {
        return center(text("Loading data...").size(16)).into();
    }

    let selection = dashboard.selection;
    let chart = StockChart::new(&dashboard.scene)
        .empty_note(format!(
            "No data for {} in {}",
            selection.company(),
            selection.month()
        ))
        .version(dashboard.version);

    center(container(chart).padding(8).style(style::chart_frame))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
