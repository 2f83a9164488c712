//! Visual encoding of transit legs, independent of any map library.
//!
//! Colors and stroke policy are fixed tables evaluated top to bottom. `mode`
//! is always consulted before `line_name`: bus and walking legs short-circuit
//! before any line lookup.

/// A `#rrggbb` color token.
pub type Color = &'static str;

pub const WALKING_COLOR: Color = "#10B981";
pub const BUS_COLOR: Color = "#DC241F";
pub const DEFAULT_TUBE_COLOR: Color = "#0019A8";
pub const FALLBACK_COLOR: Color = "#6B7280";

/// Person markers and highlights cycle through this palette.
pub const PERSON_PALETTE: [Color; 10] = [
    "#A855F7", // purple
    "#3B82F6", // blue
    "#F97316", // orange
    "#10B981", // emerald
    "#F43F5E", // rose
    "#6366F1", // indigo
    "#84CC16", // lime
    "#06B6D4", // cyan
    "#EC4899", // pink
    "#8B5CF6", // violet
];

/// Line name fragment → official line color. Fragments are lower-case and
/// matched as substrings, so order matters where one could contain another.
static LINE_COLORS: &[(&str, Color)] = &[
    ("bakerloo", "#B36305"),
    ("central", "#E32017"),
    ("circle", "#FFD300"),
    ("district", "#00782A"),
    ("elizabeth", "#6950A1"),
    ("hammersmith", "#F3A9BB"),
    ("jubilee", "#A0A5A9"),
    ("metropolitan", "#9B0056"),
    ("northern", "#000000"),
    ("piccadilly", "#003688"),
    ("victoria", "#0098D4"),
    ("waterloo", "#95CDBA"),
    ("dlr", "#00A4A7"),
    ("overground", "#EE7C0E"),
    ("tram", "#84B817"),
];

/// Modes drawn as rail lines.
static RAIL_MODES: &[&str] = &[
    "tube",
    "underground",
    "dlr",
    "overground",
    "elizabeth-line",
    "national-rail",
    "rail",
    "tram",
    "tflrail",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeClass {
    Walking,
    Bus,
    Rail,
    Other,
}

impl ModeClass {
    pub fn of(mode: &str) -> Self {
        let mode = mode.trim().to_lowercase();
        match mode.as_str() {
            "walking" | "walk" => ModeClass::Walking,
            "bus" | "coach" => ModeClass::Bus,
            m if RAIL_MODES.contains(&m) => ModeClass::Rail,
            _ => ModeClass::Other,
        }
    }
}

/// Stroke parameters for one path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Leaflet-style dash array; `None` draws a solid line.
    pub dash: Option<&'static str>,
    pub weight: f64,
    pub opacity: f64,
}

const WALKING_STYLE: LineStyle = LineStyle {
    dash: Some("2, 8"),
    weight: 3.0,
    opacity: 0.6,
};
const BUS_STYLE: LineStyle = LineStyle {
    dash: Some("10, 6"),
    weight: 4.0,
    opacity: 0.8,
};
const RAIL_STYLE: LineStyle = LineStyle {
    dash: None,
    weight: 6.0,
    opacity: 0.9,
};
const OTHER_STYLE: LineStyle = LineStyle {
    dash: None,
    weight: 4.0,
    opacity: 0.7,
};

/// Style of the straight origin → station line drawn for a journey that has
/// no legs. Thinner and fainter than any routed leg.
pub const FALLBACK_STYLE: LineStyle = LineStyle {
    dash: Some("10, 10"),
    weight: 2.0,
    opacity: 0.5,
};

/// Opacity multiplier for routed legs of people who are not highlighted.
pub const DIM_FACTOR: f64 = 0.2;
/// Opacity multiplier for fallback lines of people who are not highlighted.
pub const FALLBACK_DIM_FACTOR: f64 = 0.1;
const HIGHLIGHT_EXTRA_WEIGHT: f64 = 2.0;

pub fn resolve_color(mode: &str, line_name: Option<&str>) -> Color {
    match ModeClass::of(mode) {
        ModeClass::Walking => WALKING_COLOR,
        ModeClass::Bus => BUS_COLOR,
        ModeClass::Rail => line_name
            .and_then(line_color)
            .or_else(|| line_color(mode))
            .unwrap_or(DEFAULT_TUBE_COLOR),
        ModeClass::Other => FALLBACK_COLOR,
    }
}

pub fn resolve_line_style(mode: &str) -> LineStyle {
    match ModeClass::of(mode) {
        ModeClass::Walking => WALKING_STYLE,
        ModeClass::Bus => BUS_STYLE,
        ModeClass::Rail => RAIL_STYLE,
        ModeClass::Other => OTHER_STYLE,
    }
}

fn line_color(name: &str) -> Option<Color> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    LINE_COLORS
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, color)| *color)
}

pub fn person_color(person_index: usize) -> Color {
    PERSON_PALETTE[person_index % PERSON_PALETTE.len()]
}

impl LineStyle {
    /// Faded version used for everyone except the highlighted person.
    pub fn dimmed(self, factor: f64) -> Self {
        Self {
            opacity: self.opacity * factor,
            ..self
        }
    }

    /// Emphasized version used for the highlighted person.
    pub fn boosted(self) -> Self {
        Self {
            weight: self.weight + HIGHLIGHT_EXTRA_WEIGHT,
            opacity: 1.0,
            ..self
        }
    }
}
