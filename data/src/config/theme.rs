/// <https://github.com/iced-rs/iced/blob/master/core/src/theme/palette.rs> &
/// <https://github.com/squidowl/halloy/blob/main/data/src/appearance/theme.rs>
/// All credits and thanks to the authors of [`Halloy`] and [`iced_core`]
use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use palette::{FromColor, Hsva, rgb::Rgba};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Theme(pub iced_core::Theme);

#[derive(Serialize, Deserialize)]
struct SerTheme {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    palette: Option<Palette>,
}

impl Default for Theme {
    fn default() -> Self {
        Self(iced_core::Theme::Custom(default_theme().into()))
    }
}

impl From<Theme> for iced_core::Theme {
    fn from(val: Theme) -> Self {
        val.0
    }
}

pub fn default_theme() -> Custom {
    Custom::new(
        "Tickerline".to_string(),
        Palette {
            background: Color::from_rgb8(24, 22, 22),
            text: Color::from_rgb8(197, 201, 197),
            primary: Color::from_rgb8(200, 200, 200),
            success: Color::from_rgb8(81, 205, 160),
            danger: Color::from_rgb8(192, 80, 77),
            warning: Color::from_rgb8(238, 216, 139),
        },
    )
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let iced_core::Theme::Custom(custom) = &self.0 {
            let is_default_theme = custom.to_string() == "Tickerline";
            let ser_theme = SerTheme {
                name: if is_default_theme {
                    "tickerline"
                } else {
                    "custom"
                }
                .to_string(),
                palette: if is_default_theme {
                    None
                } else {
                    Some(self.0.palette())
                },
            };
            ser_theme.serialize(serializer)
        } else {
            let theme_str = match self.0 {
                iced_core::Theme::Dark => "dark",
                iced_core::Theme::Light => "light",
                iced_core::Theme::Dracula => "dracula",
                iced_core::Theme::Nord => "nord",
                iced_core::Theme::SolarizedLight => "solarized_light",
                iced_core::Theme::SolarizedDark => "solarized_dark",
                iced_core::Theme::GruvboxLight => "gruvbox_light",
                iced_core::Theme::GruvboxDark => "gruvbox_dark",
                iced_core::Theme::TokyoNight => "tokyo_night",
                iced_core::Theme::Nightfly => "nightfly",
                _ => "tickerline",
            };
            theme_str.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value =
            serde_json::Value::deserialize(deserializer).map_err(serde::de::Error::custom)?;

        if let Some(s) = value.as_str() {
            let theme = match s {
                "dark" => iced_core::Theme::Dark,
                "light" => iced_core::Theme::Light,
                "dracula" => iced_core::Theme::Dracula,
                "nord" => iced_core::Theme::Nord,
                "solarized_light" => iced_core::Theme::SolarizedLight,
                "solarized_dark" => iced_core::Theme::SolarizedDark,
                "gruvbox_light" => iced_core::Theme::GruvboxLight,
                "gruvbox_dark" => iced_core::Theme::GruvboxDark,
                "tokyo_night" => iced_core::Theme::TokyoNight,
                "nightfly" => iced_core::Theme::Nightfly,
                "tickerline" => Theme::default().0,
                _ => {
                    return Err(serde::de::Error::custom(format!("Invalid theme: {s}")));
                }
            };
            return Ok(Theme(theme));
        }

        let serialized = SerTheme::deserialize(value).map_err(serde::de::Error::custom)?;

        let theme = match serialized.name.as_str() {
            "tickerline" => Theme::default().0,
            "custom" => {
                if let Some(palette) = serialized.palette {
                    iced_core::Theme::Custom(Custom::new("Custom".to_string(), palette).into())
                } else {
                    return Err(serde::de::Error::custom(
                        "Custom theme missing palette data",
                    ));
                }
            }
            _ => return Err(serde::de::Error::custom("Invalid theme")),
        };

        Ok(Theme(theme))
    }
}

pub fn hex_to_color(hex: &str) -> Option<Color> {
    if hex.len() == 7 || hex.len() == 9 {
        let hash = hex.get(0..1);
        let r = hex.get(1..3).map(|s| u8::from_str_radix(s, 16));
        let g = hex.get(3..5).map(|s| u8::from_str_radix(s, 16));
        let b = hex.get(5..7).map(|s| u8::from_str_radix(s, 16));
        let a = hex.get(7..9).map(|s| u8::from_str_radix(s, 16));

        return match (hash, r, g, b, a) {
            (Some("#"), Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => {
                Some(Color::from_rgb8(r, g, b))
            }
            (Some("#"), Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), Some(Ok(a))) => {
                Some(Color::from_rgba8(r, g, b, f32::from(a) / 255.0))
            }
            _ => None,
        };
    }

    None
}

pub fn color_to_hex(color: Color) -> String {
    use std::fmt::Write;

    let mut hex = String::with_capacity(9);

    let [r, g, b, a] = color.into_rgba8();

    let _ = write!(&mut hex, "#{r:02x}{g:02x}{b:02x}");

    if a < u8::MAX {
        let _ = write!(&mut hex, "{a:02x}");
    }

    hex
}

/// Serde adapter storing colors as `#rrggbb[aa]` strings.
pub mod hex_color {
    use iced_core::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::color_to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let hex = String::deserialize(deserializer)?;
        super::hex_to_color(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {hex}")))
    }
}

/// Raises value (and a little saturation) in HSV space.
pub fn brighten(color: Color, amount: f32) -> Color {
    let mut hsva = to_hsva(color);
    hsva.value = (hsva.value + amount).min(1.0);
    hsva.saturation = (hsva.saturation + amount * 0.2).min(1.0);
    from_hsva(hsva)
}

pub fn from_hsva(color: Hsva) -> Color {
    let rgba = palette::Srgba::from_color(color);
    Color {
        r: rgba.color.red,
        g: rgba.color.green,
        b: rgba.color.blue,
        a: rgba.alpha,
    }
}

pub fn to_hsva(color: Color) -> Hsva {
    Hsva::from_color(Rgba::new(color.r, color.g, color.b, color.a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let green = hex_to_color("#b2df8a").unwrap();
        assert_eq!(green.into_rgba8(), [0xb2, 0xdf, 0x8a, 0xff]);
        assert_eq!(color_to_hex(green), "#b2df8a");

        let translucent = hex_to_color("#e41a1c80").unwrap();
        assert_eq!(color_to_hex(translucent), "#e41a1c80");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(hex_to_color("b2df8a"), None);
        assert_eq!(hex_to_color("#b2df8"), None);
        assert_eq!(hex_to_color("#zzdf8a"), None);
        assert_eq!(hex_to_color("#b2df8é"), None);
    }

    #[test]
    fn brighten_raises_value() {
        let red = hex_to_color("#801010").unwrap();
        let bright = brighten(red, 0.3);
        assert!(to_hsva(bright).value > to_hsva(red).value);
        assert_eq!(bright.a, 1.0);
    }

    #[test]
    fn theme_names_round_trip() {
        let json = serde_json::to_string(&Theme::default()).unwrap();
        let theme: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(theme.0.to_string(), "Tickerline");

        let nord: Theme = serde_json::from_str("\"nord\"").unwrap();
        assert_eq!(serde_json::to_string(&nord).unwrap(), "\"nord\"");

        assert!(serde_json::from_str::<Theme>("\"neon\"").is_err());
    }
}
