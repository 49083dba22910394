use iced::theme::palette::{Extended, Pair};
use iced::widget::{canvas, container};
use iced::{Border, Color, Theme};

pub fn axis_line_from_palette(palette: &Extended) -> canvas::Stroke<'static> {
    canvas::Stroke::default()
        .with_color(palette.background.base.text.scale_alpha(0.6))
        .with_width(1.0)
}

/// Background and border of the hover tooltip.
pub fn tooltip_colors(palette: &Extended) -> (Color, Color) {
    (
        palette.background.weak.color,
        palette.background.strong.color,
    )
}

fn styled(pair: Pair) -> container::Style {
    container::Style {
        background: Some(pair.color.into()),
        text_color: pair.text.into(),
        border: Border {
            width: 1.0,
            color: pair.color,
            radius: 2.0.into(),
        },
        ..Default::default()
    }
}

pub fn controls(theme: &Theme) -> container::Style {
    styled(theme.extended_palette().background.weak)
}

pub fn error_banner(theme: &Theme) -> container::Style {
    styled(theme.extended_palette().danger.weak)
}

pub fn chart_frame(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.base.color.into()),
        border: Border {
            width: 1.0,
            color: palette.background.strong.color.scale_alpha(0.5),
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}
