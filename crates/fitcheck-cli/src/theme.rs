use fitcheck_core::Role;
use ratatui::style::Color;

/// Terminal palette. `dark` is the fallback for unknown names.
#[derive(Clone)]
pub struct Theme {
    pub name: &'static str,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub warning: Color,
    pub user_color: Color,
    pub assistant_color: Color,
    pub notice_color: Color,
    pub border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::Rgb(214, 218, 224),
            accent: Color::Rgb(94, 176, 201),
            muted: Color::Rgb(112, 118, 128),
            error: Color::Rgb(229, 98, 92),
            warning: Color::Rgb(230, 184, 92),
            user_color: Color::Rgb(130, 190, 240),
            assistant_color: Color::Rgb(150, 212, 150),
            notice_color: Color::Rgb(190, 160, 220),
            border: Color::Rgb(70, 76, 86),
        }
    }

    /// Chalk colors on a slate background.
    pub fn chalkboard() -> Self {
        Self {
            name: "chalkboard",
            fg: Color::Rgb(236, 240, 232),
            accent: Color::Rgb(250, 226, 140),
            muted: Color::Rgb(128, 150, 136),
            error: Color::Rgb(244, 140, 130),
            warning: Color::Rgb(250, 200, 120),
            user_color: Color::Rgb(170, 214, 250),
            assistant_color: Color::Rgb(236, 240, 232),
            notice_color: Color::Rgb(250, 226, 140),
            border: Color::Rgb(60, 92, 74),
        }
    }

    /// For light terminal backgrounds.
    pub fn paper() -> Self {
        Self {
            name: "paper",
            fg: Color::Rgb(40, 42, 46),
            accent: Color::Rgb(0, 102, 153),
            muted: Color::Rgb(128, 128, 120),
            error: Color::Rgb(176, 32, 32),
            warning: Color::Rgb(160, 96, 0),
            user_color: Color::Rgb(24, 78, 160),
            assistant_color: Color::Rgb(22, 110, 60),
            notice_color: Color::Rgb(110, 60, 140),
            border: Color::Rgb(190, 186, 176),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "chalkboard" => Self::chalkboard(),
            "paper" => Self::paper(),
            _ => Self::dark(),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["dark", "chalkboard", "paper"]
    }

    pub fn role_color(&self, role: Role) -> Color {
        match role {
            Role::User => self.user_color,
            Role::Assistant => self.assistant_color,
            Role::System => self.notice_color,
        }
    }
}
