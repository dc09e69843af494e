use crate::foundation::core::Rgba8;

/// Closed set of wallpaper themes.
///
/// Unknown identifiers from storage or query strings resolve to [`ThemeId::default`] through
/// [`ThemeId::from_str_lossy`]; there is no other fallback path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeId {
    /// Deep navy with periwinkle accents.
    #[default]
    Midnight,
    /// True black for OLED panels.
    Amoled,
    /// Dark teal with cyan accents.
    Ocean,
    /// Dark green with emerald accents.
    Forest,
    /// Dark plum with coral accents.
    Sunset,
    /// Dark violet with lavender accents.
    Lavender,
    /// Warm off-white with amber accents.
    Paper,
    /// White with near-black accents.
    Minimal,
}

impl ThemeId {
    /// Every theme, in display order.
    pub const ALL: [ThemeId; 8] = [
        ThemeId::Midnight,
        ThemeId::Amoled,
        ThemeId::Ocean,
        ThemeId::Forest,
        ThemeId::Sunset,
        ThemeId::Lavender,
        ThemeId::Paper,
        ThemeId::Minimal,
    ];

    /// Stable identifier used in settings and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Midnight => "midnight",
            ThemeId::Amoled => "amoled",
            ThemeId::Ocean => "ocean",
            ThemeId::Forest => "forest",
            ThemeId::Sunset => "sunset",
            ThemeId::Lavender => "lavender",
            ThemeId::Paper => "paper",
            ThemeId::Minimal => "minimal",
        }
    }

    /// Case-insensitive lookup; `None` for unknown identifiers.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Lookup that falls back to the default theme.
    pub fn from_str_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Base colors for this theme.
    pub fn palette(self) -> Palette {
        fn c(hex: u32) -> Rgba8 {
            Rgba8::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
        }

        let (bg, card, text_main, text_sub, accent, grid_active, grid_inactive, dark) = match self
        {
            ThemeId::Midnight => (
                0x0B0F1A, 0x151B2B, 0xF5F7FA, 0x8A94A6, 0x6C8CFF, 0x6C8CFF, 0x1C2233, true,
            ),
            ThemeId::Amoled => (
                0x000000, 0x0D0D0D, 0xFFFFFF, 0x7A7A7A, 0xFFFFFF, 0xF2F2F2, 0x161616, true,
            ),
            ThemeId::Ocean => (
                0x06141F, 0x0D2233, 0xE6F4FF, 0x7FA3BF, 0x22D3EE, 0x22D3EE, 0x10283A, true,
            ),
            ThemeId::Forest => (
                0x0A140E, 0x13231A, 0xEAF7EE, 0x86A38F, 0x34D399, 0x34D399, 0x16291D, true,
            ),
            ThemeId::Sunset => (
                0x1A0E12, 0x2A161C, 0xFFF1EC, 0xB58F88, 0xFB923C, 0xFB7185, 0x2E1A20, true,
            ),
            ThemeId::Lavender => (
                0x120F1F, 0x1E1932, 0xF3EFFF, 0x9C92BF, 0xA78BFA, 0xA78BFA, 0x231D3A, true,
            ),
            ThemeId::Paper => (
                0xF7F3EA, 0xFFFFFF, 0x1F1B16, 0x7D7368, 0xD97706, 0xD97706, 0xE8E1D3, false,
            ),
            ThemeId::Minimal => (
                0xFFFFFF, 0xF4F4F5, 0x111113, 0x71717A, 0x18181B, 0x18181B, 0xECECEE, false,
            ),
        };

        Palette {
            background: c(bg),
            card: c(card),
            text_main: c(text_main),
            text_sub: c(text_sub),
            accent: c(accent),
            grid_active: c(grid_active),
            grid_inactive: c(grid_inactive),
            dark,
        }
    }

    /// Heatmap ramp derived from the palette: background blended toward `grid_active`.
    pub fn ramp(self) -> HeatRamp {
        let p = self.palette();
        HeatRamp {
            light: p.background.mix(p.grid_active, 0.35),
            medium: p.background.mix(p.grid_active, 0.55),
            dark: p.background.mix(p.grid_active, 0.78),
            full: p.grid_active,
            glow: p.grid_active.with_alpha(0.45),
        }
    }
}

impl serde::Serialize for ThemeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ThemeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&s))
    }
}

/// Named theme colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Canvas backdrop.
    pub background: Rgba8,
    /// Panel and card fill.
    pub card: Rgba8,
    /// Primary text.
    pub text_main: Rgba8,
    /// Secondary text and labels.
    pub text_sub: Rgba8,
    /// Charts, rings, progress bars.
    pub accent: Rgba8,
    /// Completed grid cells.
    pub grid_active: Rgba8,
    /// Empty or future grid cells.
    pub grid_inactive: Rgba8,
    /// Whether the backdrop gradient fades to black.
    pub dark: bool,
}

/// Completion heatmap colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeatRamp {
    /// `(0, 25]` percent.
    pub light: Rgba8,
    /// `(25, 50]` percent.
    pub medium: Rgba8,
    /// `(50, 75]` percent.
    pub dark: Rgba8,
    /// `(75, 100]` percent, and always the "now" cell.
    pub full: Rgba8,
    /// Translucent bloom color for highlighted cells.
    pub glow: Rgba8,
}

/// Completion bucket a percentage falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatBucket {
    /// Exactly zero (or below).
    Inactive,
    /// `(0, 25]`.
    Light,
    /// `(25, 50]`.
    Medium,
    /// `(50, 75]`.
    Dark,
    /// Above 75.
    Full,
}

impl HeatBucket {
    /// Bucket for a completion percentage; NaN counts as zero.
    pub fn for_percent(percent: f64) -> Self {
        if percent.is_nan() || percent <= 0.0 {
            HeatBucket::Inactive
        } else if percent <= 25.0 {
            HeatBucket::Light
        } else if percent <= 50.0 {
            HeatBucket::Medium
        } else if percent <= 75.0 {
            HeatBucket::Dark
        } else {
            HeatBucket::Full
        }
    }

    /// Resolve against a theme.
    pub fn color(self, palette: &Palette, ramp: &HeatRamp) -> Rgba8 {
        match self {
            HeatBucket::Inactive => palette.grid_inactive,
            HeatBucket::Light => ramp.light,
            HeatBucket::Medium => ramp.medium,
            HeatBucket::Dark => ramp.dark,
            HeatBucket::Full => ramp.full,
        }
    }
}

/// Heatmap color for a completion percentage under `theme`.
pub fn color_for_completion(theme: ThemeId, percent: f64) -> Rgba8 {
    HeatBucket::for_percent(percent).color(&theme.palette(), &theme.ramp())
}

/// Reminder priority dot color (`4` most urgent).
pub fn priority_color(priority: u8) -> Rgba8 {
    match priority {
        4.. => Rgba8::rgb(0xEF, 0x44, 0x44),
        3 => Rgba8::rgb(0xF9, 0x73, 0x16),
        2 => Rgba8::rgb(0xEA, 0xB3, 0x08),
        1 => Rgba8::rgb(0x3B, 0x82, 0xF6),
        0 => Rgba8::rgb(0x6B, 0x72, 0x80),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;
