pub mod panel;

use super::DashboardError;
use crate::style;

use data::chart::{ChartStyle, Scene};
use data::{Month, Selection};
use exchange::adapter::{AdapterError, Fetched, file};
use exchange::{Company, RawRecord};

use iced::{
    Alignment, Element, Length, Task,
    widget::{button, column, container, pick_list, radio, row, space, text},
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    CompanySelected(Company),
    MonthSelected(Month),
    Reload,
    DataLoaded(Result<Fetched, AdapterError>),
}

#[derive(Debug, Clone)]
pub enum LoadStatus {
    Loading,
    Loaded { skipped: usize },
    Failed(DashboardError),
}

pub struct Dashboard {
    selection: Selection,
    records: Vec<RawRecord>,
    scene: Scene,
    style: ChartStyle,
    status: LoadStatus,
    data_file: PathBuf,
    version: u64,
}

impl Dashboard {
    pub fn new(
        selection: Selection,
        style: ChartStyle,
        data_file: PathBuf,
    ) -> (Self, Task<Message>) {
        let dashboard = Self {
            selection,
            records: Vec::new(),
            scene: Scene::build(&[], &selection, &style),
            style,
            status: LoadStatus::Loading,
            data_file,
            version: 0,
        };
        let task = dashboard.load();

        (dashboard, task)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn data_file(&self) -> &PathBuf {
        &self.data_file
    }

    fn load(&self) -> Task<Message> {
        log::info!("Loading price data from {}", self.data_file.display());
        Task::perform(file::fetch(self.data_file.clone()), Message::DataLoaded)
    }

    /// Rebuilds the whole scene and bumps the revision so the chart redraws from scratch.
    fn refresh(&mut self) {
        self.scene = Scene::build(&self.records, &self.selection, &self.style);
        self.version = self.version.wrapping_add(1);

        log::debug!(
            "Chart rev {} for {}: {} points",
            self.version,
            self.selection,
            self.scene.points.len()
        );
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CompanySelected(company) => {
                if self.selection.select_company(company) {
                    log::info!("Company changed to {company}");
                    self.refresh();
                }
            }
            Message::MonthSelected(month) => {
                if self.selection.select_month(month) {
                    log::info!("Month changed to {month}");
                    self.refresh();
                }
            }
            Message::Reload => {
                self.status = LoadStatus::Loading;
                return self.load();
            }
            Message::DataLoaded(Ok(fetched)) => {
                self.records = fetched.records;
                self.status = LoadStatus::Loaded {
                    skipped: fetched.skipped,
                };
                self.refresh();
            }
            Message::DataLoaded(Err(err)) => {
                log::error!("Failed to load price data: {err}");
                // the previous records stay on screen
                self.status = LoadStatus::Failed(err.into());
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        column![self.controls(), self.status_bar(), panel::view(self)]
            .spacing(8)
            .padding(12)
            .into()
    }

    fn controls(&self) -> Element<'_, Message> {
        let companies = Company::ALL.iter().fold(row![].spacing(12), |row, company| {
            row.push(
                radio(
                    company.as_str(),
                    *company,
                    Some(self.selection.company()),
                    Message::CompanySelected,
                )
                .size(14)
                .text_size(14),
            )
        });

        let months = pick_list(
            &Month::ALL[..],
            Some(self.selection.month()),
            Message::MonthSelected,
        )
        .text_size(14);

        let reload = button(text("Reload").size(14)).on_press_maybe(
            (!matches!(self.status, LoadStatus::Loading)).then_some(Message::Reload),
        );

        container(
            row![companies, space::horizontal(), months, reload]
                .spacing(12)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(8)
        .style(style::controls)
        .into()
    }

    fn status_bar(&self) -> Element<'_, Message> {
        match &self.status {
            LoadStatus::Failed(err) => container(text(err.to_string()).size(13))
                .width(Length::Fill)
                .padding(6)
                .style(style::error_banner)
                .into(),
            LoadStatus::Loading => text("Loading data...").size(13).into(),
            LoadStatus::Loaded { skipped } => {
                let mut summary = format!(
                    "{} records from {}",
                    self.records.len(),
                    self.data_file.display()
                );
                if *skipped > 0 {
                    summary.push_str(&format!(", {skipped} malformed rows skipped"));
                }
                text(summary).size(13).into()
            }
        }
    }
}
