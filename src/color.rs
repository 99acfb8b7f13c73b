//! Min-max normalization of metric values and colour ramps to map them through.

use std::{collections::BTreeMap, f64::consts::PI, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The amount subtracted from the smallest value before normalizing, so the lowest scoring
/// vertices keep a visible colour.
pub const DEFAULT_PADDING: f64 = 0.1;

/// The narrowest range values are normalized over.
const MIN_SPAN: f64 = 1e-9;

/// A colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Creates an opaque colour.
    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Rounds every component to six decimals, hiding floating point noise at the ends of
    /// analytic ramps.
    pub fn with_rounding(self) -> Self {
        let round = |c: f64| (c * 1e6).round() / 1e6;

        Self {
            r: round(self.r),
            g: round(self.g),
            b: round(self.b),
            a: round(self.a),
        }
    }

    fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::opaque(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;

        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Formats the colour as `#rrggbb`, dropping the alpha channel.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;

        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b)
        )
    }
}

// Nine-class sequential schemes from ColorBrewer, lightest first.
const BLUES: [[u8; 3]; 9] = [
    [0xf7, 0xfb, 0xff],
    [0xde, 0xeb, 0xf7],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];
const REDS: [[u8; 3]; 9] = [
    [0xff, 0xf5, 0xf0],
    [0xfe, 0xe0, 0xd2],
    [0xfc, 0xbb, 0xa1],
    [0xfc, 0x92, 0x72],
    [0xfb, 0x6a, 0x4a],
    [0xef, 0x3b, 0x2c],
    [0xcb, 0x18, 0x1d],
    [0xa5, 0x0f, 0x15],
    [0x67, 0x00, 0x0d],
];
const GREENS: [[u8; 3]; 9] = [
    [0xf7, 0xfc, 0xf5],
    [0xe5, 0xf5, 0xe0],
    [0xc7, 0xe9, 0xc0],
    [0xa1, 0xd9, 0x9b],
    [0x74, 0xc4, 0x76],
    [0x41, 0xab, 0x5d],
    [0x23, 0x8b, 0x45],
    [0x00, 0x6d, 0x2c],
    [0x00, 0x44, 0x1b],
];
const PURPLES: [[u8; 3]; 9] = [
    [0xfc, 0xfb, 0xfd],
    [0xef, 0xed, 0xf5],
    [0xda, 0xda, 0xeb],
    [0xbc, 0xbd, 0xdc],
    [0x9e, 0x9a, 0xc8],
    [0x80, 0x7d, 0xba],
    [0x6a, 0x51, 0xa3],
    [0x54, 0x27, 0x8f],
    [0x3f, 0x00, 0x7d],
];

/// A named continuous colour ramp over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blues,
    Reds,
    Greens,
    Purples,
    Rainbow,
}

impl Palette {
    pub const ALL: [Palette; 5] = [
        Palette::Blues,
        Palette::Reds,
        Palette::Greens,
        Palette::Purples,
        Palette::Rainbow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Blues => "blues",
            Palette::Reds => "reds",
            Palette::Greens => "greens",
            Palette::Purples => "purples",
            Palette::Rainbow => "rainbow",
        }
    }

    /// Returns the colour at position `t`, clamped to `[0, 1]`. Non-finite positions map to the
    /// start of the ramp.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::color::{Palette, Rgba};
    ///
    /// assert_eq!(Palette::Rainbow.sample(1.0), Rgba::opaque(1.0, 0.0, 0.0));
    /// assert_eq!(Palette::Blues.sample(0.0).to_string(), "#f7fbff");
    /// ```
    pub fn sample(&self, t: f64) -> Rgba {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        match self {
            Palette::Blues => sequential(&BLUES, t),
            Palette::Reds => sequential(&REDS, t),
            Palette::Greens => sequential(&GREENS, t),
            Palette::Purples => sequential(&PURPLES, t),
            Palette::Rainbow => Rgba::opaque(
                (2.0 * t - 0.5).abs().min(1.0),
                (PI * t).sin().max(0.0),
                (PI * t / 2.0).cos().max(0.0),
            )
            .with_rounding(),
        }
    }
}

fn sequential(stops: &[[u8; 3]], t: f64) -> Rgba {
    let position = t * (stops.len() - 1) as f64;
    let lower = (position.floor() as usize).min(stops.len() - 2);

    Rgba::from_rgb8(stops[lower]).lerp(Rgba::from_rgb8(stops[lower + 1]), position - lower as f64)
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a palette name that doesn't exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette `{0}`")]
pub struct UnknownPalette(pub String);

impl FromStr for Palette {
    type Err = UnknownPalette;

    /// Parses a palette name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|palette| palette.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPalette(s.to_string()))
    }
}

/// Min-max normalization with a downward padding on the minimum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Normalization {
    pub padding: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

impl Normalization {
    /// Creates a normalization with the given padding.
    pub fn with_padding(padding: f64) -> Self {
        Self { padding }
    }

    /// Returns the `(lo, hi)` range values are normalized over, `None` when there are no finite
    /// values.
    ///
    /// `lo` is the minimum less the padding. It always sits strictly below `hi`.
    pub fn range<'a, I>(&self, values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (min, max) = values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<(f64, f64)>, v| match range {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })?;

        let hi = max;
        let mut lo = min - self.padding;
        if lo >= hi {
            lo = hi - (hi.abs() * 4.0 * f64::EPSILON).max(MIN_SPAN);
        }

        Some((lo, hi))
    }

    /// Maps every value into `[0, 1]`. Non-finite values map to `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use sociogram::color::Normalization;
    ///
    /// let values = BTreeMap::from([("a", 0.0), ("b", 0.9)]);
    /// let normalized = Normalization::default().normalize(&values);
    ///
    /// assert!((normalized["a"] - 0.1).abs() < 1e-12);
    /// assert_eq!(normalized["b"], 1.0);
    /// ```
    pub fn normalize<T>(&self, values: &BTreeMap<T, f64>) -> BTreeMap<T, f64>
    where
        T: Clone + Ord,
    {
        let range = self.range(values.values());

        values
            .iter()
            .map(|(id, &value)| {
                let normalized = match range {
                    Some((lo, hi)) if value.is_finite() => {
                        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
                    }
                    _ => 0.0,
                };

                (id.clone(), normalized)
            })
            .collect()
    }
}

/// Normalizes the values and maps them through the palette.
pub fn color_mapping<T>(
    values: &BTreeMap<T, f64>,
    palette: Palette,
    normalization: Normalization,
) -> BTreeMap<T, Rgba>
where
    T: Clone + Ord,
{
    normalization
        .normalize(values)
        .into_iter()
        .map(|(id, t)| (id, palette.sample(t)))
        .collect()
}
