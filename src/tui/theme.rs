use crate::config::{ColorValue, CustomThemeConfig};
use crate::tui::terminal_compat::ColorMode;
use ratatui::style::{Color, Modifier, Style};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum ThemeName {
    OceanDark,
    Nord,
    Dracula,
    Gruvbox,
    TokyoNight,
}

impl ThemeName {
    /// The theme after this one, wrapping around
    pub fn next(self) -> Self {
        let all: Vec<ThemeName> = ThemeName::iter().collect();
        let index = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Color,
    pub foreground: Color,
    pub folder_fg: Color,
    pub bookmark_fg: Color,
    pub url_fg: Color,
    pub indicator_fg: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub title_bar_fg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub placeholder_fg: Color,
    pub error_fg: Color,
    pub modal_bg: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::OceanDark => Self::ocean_dark(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Dracula => Self::dracula(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::TokyoNight => Self::tokyo_night(),
        }
    }

    fn ocean_dark() -> Self {
        Self {
            name: ThemeName::OceanDark,
            background: Color::Rgb(27, 43, 52),
            foreground: Color::Rgb(192, 197, 206),
            folder_fg: Color::Rgb(102, 153, 204),
            bookmark_fg: Color::Rgb(192, 197, 206),
            url_fg: Color::Rgb(101, 115, 126),
            indicator_fg: Color::Rgb(95, 179, 179),
            border: Color::Rgb(52, 61, 70),
            selection_bg: Color::Rgb(52, 61, 70),
            selection_fg: Color::Rgb(236, 239, 244),
            status_bar_bg: Color::Rgb(52, 61, 70),
            status_bar_fg: Color::Rgb(192, 197, 206),
            title_bar_fg: Color::Rgb(102, 153, 204),
            search_match_bg: Color::Rgb(250, 200, 99),
            search_match_fg: Color::Rgb(27, 43, 52),
            placeholder_fg: Color::Rgb(101, 115, 126),
            error_fg: Color::Rgb(236, 95, 103),
            modal_bg: Color::Rgb(34, 52, 62),
        }
    }

    fn nord() -> Self {
        Self {
            name: ThemeName::Nord,
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            folder_fg: Color::Rgb(136, 192, 208),
            bookmark_fg: Color::Rgb(229, 233, 240),
            url_fg: Color::Rgb(97, 110, 136),
            indicator_fg: Color::Rgb(143, 188, 187),
            border: Color::Rgb(76, 86, 106),
            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(236, 239, 244),
            status_bar_bg: Color::Rgb(59, 66, 82),
            status_bar_fg: Color::Rgb(216, 222, 233),
            title_bar_fg: Color::Rgb(136, 192, 208),
            search_match_bg: Color::Rgb(235, 203, 139),
            search_match_fg: Color::Rgb(46, 52, 64),
            placeholder_fg: Color::Rgb(97, 110, 136),
            error_fg: Color::Rgb(191, 97, 106),
            modal_bg: Color::Rgb(59, 66, 82),
        }
    }

    fn dracula() -> Self {
        Self {
            name: ThemeName::Dracula,
            background: Color::Rgb(40, 42, 54),
            foreground: Color::Rgb(248, 248, 242),
            folder_fg: Color::Rgb(189, 147, 249),
            bookmark_fg: Color::Rgb(248, 248, 242),
            url_fg: Color::Rgb(98, 114, 164),
            indicator_fg: Color::Rgb(139, 233, 253),
            border: Color::Rgb(68, 71, 90),
            selection_bg: Color::Rgb(68, 71, 90),
            selection_fg: Color::Rgb(248, 248, 242),
            status_bar_bg: Color::Rgb(68, 71, 90),
            status_bar_fg: Color::Rgb(248, 248, 242),
            title_bar_fg: Color::Rgb(255, 121, 198),
            search_match_bg: Color::Rgb(241, 250, 140),
            search_match_fg: Color::Rgb(40, 42, 54),
            placeholder_fg: Color::Rgb(98, 114, 164),
            error_fg: Color::Rgb(255, 85, 85),
            modal_bg: Color::Rgb(52, 55, 70),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: ThemeName::Gruvbox,
            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            folder_fg: Color::Rgb(250, 189, 47),
            bookmark_fg: Color::Rgb(235, 219, 178),
            url_fg: Color::Rgb(146, 131, 116),
            indicator_fg: Color::Rgb(142, 192, 124),
            border: Color::Rgb(80, 73, 69),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(251, 241, 199),
            status_bar_bg: Color::Rgb(60, 56, 54),
            status_bar_fg: Color::Rgb(235, 219, 178),
            title_bar_fg: Color::Rgb(254, 128, 25),
            search_match_bg: Color::Rgb(215, 153, 33),
            search_match_fg: Color::Rgb(40, 40, 40),
            placeholder_fg: Color::Rgb(146, 131, 116),
            error_fg: Color::Rgb(251, 73, 52),
            modal_bg: Color::Rgb(50, 48, 47),
        }
    }

    fn tokyo_night() -> Self {
        Self {
            name: ThemeName::TokyoNight,
            background: Color::Rgb(26, 27, 38),
            foreground: Color::Rgb(192, 202, 245),
            folder_fg: Color::Rgb(122, 162, 247),
            bookmark_fg: Color::Rgb(192, 202, 245),
            url_fg: Color::Rgb(86, 95, 137),
            indicator_fg: Color::Rgb(125, 207, 255),
            border: Color::Rgb(65, 72, 104),
            selection_bg: Color::Rgb(40, 52, 87),
            selection_fg: Color::Rgb(192, 202, 245),
            status_bar_bg: Color::Rgb(36, 40, 59),
            status_bar_fg: Color::Rgb(169, 177, 214),
            title_bar_fg: Color::Rgb(187, 154, 247),
            search_match_bg: Color::Rgb(224, 175, 104),
            search_match_fg: Color::Rgb(26, 27, 38),
            placeholder_fg: Color::Rgb(86, 95, 137),
            error_fg: Color::Rgb(247, 118, 142),
            modal_bg: Color::Rgb(36, 40, 59),
        }
    }

    /// Downgrade RGB colors to the 256-color palette when the terminal needs it
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        if mode == ColorMode::Rgb {
            return self;
        }
        for color in self.colors_mut() {
            *color = to_indexed(*color);
        }
        self
    }

    /// Apply `[theme]` overrides from config on top of the base theme
    pub fn with_custom_colors(mut self, custom: &CustomThemeConfig, mode: ColorMode) -> Self {
        let resolve = |value: &Option<ColorValue>| {
            value.as_ref().and_then(|v| v.to_color()).map(|c| match mode {
                ColorMode::Rgb => c,
                ColorMode::Indexed256 => to_indexed(c),
            })
        };

        let overrides = [
            (&mut self.background, resolve(&custom.background)),
            (&mut self.foreground, resolve(&custom.foreground)),
            (&mut self.folder_fg, resolve(&custom.folder_fg)),
            (&mut self.bookmark_fg, resolve(&custom.bookmark_fg)),
            (&mut self.url_fg, resolve(&custom.url_fg)),
            (&mut self.border, resolve(&custom.border)),
            (&mut self.selection_bg, resolve(&custom.selection_bg)),
            (&mut self.selection_fg, resolve(&custom.selection_fg)),
            (&mut self.status_bar_bg, resolve(&custom.status_bar_bg)),
            (&mut self.status_bar_fg, resolve(&custom.status_bar_fg)),
            (&mut self.title_bar_fg, resolve(&custom.title_bar_fg)),
            (&mut self.search_match_bg, resolve(&custom.search_match_bg)),
            (&mut self.search_match_fg, resolve(&custom.search_match_fg)),
            (&mut self.error_fg, resolve(&custom.error_fg)),
        ];
        for (slot, value) in overrides {
            if let Some(color) = value {
                *slot = color;
            }
        }
        self
    }

    fn colors_mut(&mut self) -> [&mut Color; 17] {
        [
            &mut self.background,
            &mut self.foreground,
            &mut self.folder_fg,
            &mut self.bookmark_fg,
            &mut self.url_fg,
            &mut self.indicator_fg,
            &mut self.border,
            &mut self.selection_bg,
            &mut self.selection_fg,
            &mut self.status_bar_bg,
            &mut self.status_bar_fg,
            &mut self.title_bar_fg,
            &mut self.search_match_bg,
            &mut self.search_match_fg,
            &mut self.placeholder_fg,
            &mut self.error_fg,
            &mut self.modal_bg,
        ]
    }

    pub fn content_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.status_bar_fg).bg(self.status_bar_bg)
    }

    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.search_match_fg)
            .bg(self.search_match_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.modal_bg)
    }
}

/// Nearest xterm 256-color index for an RGB color
fn to_indexed(color: Color) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };

    // Grayscale ramp (232..=255) fits near-neutral colors better than the cube
    if r.abs_diff(g) < 10 && g.abs_diff(b) < 10 && r.abs_diff(b) < 10 {
        let avg = (r as u16 + g as u16 + b as u16) / 3;
        if avg < 8 {
            return Color::Indexed(16);
        }
        if avg > 238 {
            return Color::Indexed(231);
        }
        return Color::Indexed(232 + ((avg - 8) / 10) as u8);
    }

    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    Color::Indexed(16 + 36 * level(r) + 6 * level(g) + level(b))
}
