#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod logger;
mod screen;
mod style;
mod widget;

use screen::dashboard::{self, Dashboard};

use data::config::state::WindowSpec;
use data::{Selection, State};

use iced::{Element, Size, Subscription, Task, window};
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "stock_data.csv";

fn main() -> iced::Result {
    match logger::setup(cfg!(debug_assertions)) {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(err) => eprintln!("Failed to initialize logger: {err}"),
    }

    let saved = data::load_saved_state();
    let args = Args::parse(std::env::args().skip(1));

    let window_size = saved.main_window.unwrap_or_default().into_size();

    iced::application(
        move || Tickerline::new(saved.clone(), args.clone()),
        Tickerline::update,
        Tickerline::view,
    )
    .title(Tickerline::title)
    .theme(Tickerline::theme)
    .subscription(Tickerline::subscription)
    .window(window::Settings {
        size: window_size,
        min_size: Some(Size::new(640.0, 480.0)),
        exit_on_close_request: false,
        ..Default::default()
    })
    .run()
}

/// `tickerline [CSV] [--company NAME] [--month NAME]`
#[derive(Debug, Clone, Default)]
struct Args {
    data_file: Option<PathBuf>,
    company: Option<String>,
    month: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--company" => parsed.company = args.next(),
                "--month" => parsed.month = args.next(),
                _ if parsed.data_file.is_none() && !arg.starts_with("--") => {
                    parsed.data_file = Some(PathBuf::from(arg));
                }
                _ => log::warn!("Ignoring unexpected argument {arg:?}"),
            }
        }

        parsed
    }

    fn selection(&self) -> Selection {
        let mut selection = Selection::default();

        if let Some(company) = &self.company
            && let Err(err) = selection.set_company(company)
        {
            log::warn!("Keeping company {}: {err}", selection.company());
        }
        if let Some(month) = &self.month
            && let Err(err) = selection.set_month(month)
        {
            log::warn!("Keeping month {}: {err}", selection.month());
        }

        selection
    }
}

#[derive(Debug, Clone)]
enum Message {
    Dashboard(dashboard::Message),
    WindowResized(Size),
    WindowCloseRequested(window::Id),
}

struct Tickerline {
    dashboard: Dashboard,
    theme: data::Theme,
    chart_style: data::chart::ChartStyle,
    main_window: Option<WindowSpec>,
}

impl Tickerline {
    fn new(saved: State, args: Args) -> (Self, Task<Message>) {
        let data_file = args
            .data_file
            .clone()
            .or(saved.data_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let (dashboard, load) = Dashboard::new(args.selection(), saved.chart, data_file);

        (
            Self {
                dashboard,
                theme: saved.selected_theme,
                chart_style: saved.chart,
                main_window: saved.main_window,
            },
            load.map(Message::Dashboard),
        )
    }

    fn title(&self) -> String {
        format!("Tickerline - {}", self.dashboard.selection())
    }

    fn theme(&self) -> iced::Theme {
        self.theme.0.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch(vec![
            window::resize_events().map(|(_, size)| Message::WindowResized(size)),
            window::close_requests().map(Message::WindowCloseRequested),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Dashboard(message) => self.dashboard.update(message).map(Message::Dashboard),
            Message::WindowResized(size) => {
                self.main_window = Some(WindowSpec::from_size(size));
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                self.save_state();
                window::close(id)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.dashboard.view().map(Message::Dashboard)
    }

    fn save_state(&self) {
        let state = State::from_parts(
            self.theme.clone(),
            self.chart_style,
            self.main_window,
            Some(self.dashboard.data_file().clone()),
        );

        match data::save_state(&state) {
            Ok(()) => log::info!("Saved state to {}", data::SAVED_STATE_PATH),
            Err(err) => log::error!("Failed to save state: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::Month;
    use exchange::Company;

    fn args(list: &[&str]) -> Args {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn positional_path_and_flags() {
        let parsed = args(&["prices.csv", "--company", "Microsoft", "--month", "December"]);

        assert_eq!(parsed.data_file, Some(PathBuf::from("prices.csv")));

        let selection = parsed.selection();
        assert_eq!(selection.company(), Company::Microsoft);
        assert_eq!(selection.month(), Month::December);
    }

    #[test]
    fn no_arguments_keep_defaults() {
        let parsed = args(&[]);

        assert!(parsed.data_file.is_none());
        assert_eq!(parsed.selection(), Selection::default());
    }

    #[test]
    fn unknown_company_keeps_apple() {
        let parsed = args(&["--company", "Tesla", "--month", "March"]);
        let selection = parsed.selection();

        assert!(parsed.data_file.is_none());
        assert_eq!(selection.company(), Company::Apple);
        assert_eq!(selection.month(), Month::March);
    }

    #[test]
    fn only_the_first_positional_is_the_path() {
        let parsed = args(&["a.csv", "b.csv", "--verbose"]);
        assert_eq!(parsed.data_file, Some(PathBuf::from("a.csv")));
    }
}
