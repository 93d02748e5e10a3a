//! Capture parameters passed to the imaging utility.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

/// Dynamic range compression applied by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrcMode {
    Off,
    #[default]
    Low,
    Med,
    High,
}

impl DrcMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DrcMode::Off => "off",
            DrcMode::Low => "low",
            DrcMode::Med => "med",
            DrcMode::High => "high",
        }
    }
}

impl FromStr for DrcMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(DrcMode::Off),
            "low" => Ok(DrcMode::Low),
            "med" => Ok(DrcMode::Med),
            "high" => Ok(DrcMode::High),
            other => Err(format!("unknown drc mode '{other}'")),
        }
    }
}

impl fmt::Display for DrcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exposure program selected on the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExposureMode {
    #[default]
    Auto,
    Night,
    NightPreview,
    Backlight,
    Spotlight,
    Sports,
    Snow,
    Beach,
    VeryLong,
    FixedFps,
    AntiShake,
    Fireworks,
    Off,
}

impl ExposureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExposureMode::Auto => "auto",
            ExposureMode::Night => "night",
            ExposureMode::NightPreview => "nightpreview",
            ExposureMode::Backlight => "backlight",
            ExposureMode::Spotlight => "spotlight",
            ExposureMode::Sports => "sports",
            ExposureMode::Snow => "snow",
            ExposureMode::Beach => "beach",
            ExposureMode::VeryLong => "verylong",
            ExposureMode::FixedFps => "fixedfps",
            ExposureMode::AntiShake => "antishake",
            ExposureMode::Fireworks => "fireworks",
            ExposureMode::Off => "off",
        }
    }
}

impl FromStr for ExposureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "auto" => ExposureMode::Auto,
            "night" => ExposureMode::Night,
            "nightpreview" => ExposureMode::NightPreview,
            "backlight" => ExposureMode::Backlight,
            "spotlight" => ExposureMode::Spotlight,
            "sports" => ExposureMode::Sports,
            "snow" => ExposureMode::Snow,
            "beach" => ExposureMode::Beach,
            "verylong" => ExposureMode::VeryLong,
            "fixedfps" => ExposureMode::FixedFps,
            "antishake" => ExposureMode::AntiShake,
            "fireworks" => ExposureMode::Fireworks,
            "off" => ExposureMode::Off,
            other => return Err(format!("unknown exposure mode '{other}'")),
        };
        Ok(mode)
    }
}

impl fmt::Display for ExposureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved options for one capture.
///
/// Dimensions are always positive and never taller than 4:3 landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub drc: DrcMode,
    pub exposure: ExposureMode,
    width: u32,
    height: u32,
}

impl CaptureOptions {
    /// Build options from raw, possibly non-positive dimensions.
    ///
    /// A non-positive width becomes [`DEFAULT_WIDTH`]. A non-positive height, or
    /// one for which `width < height * 4 / 3`, is replaced by `width * 3 / 4`
    /// (at least 1).
    pub fn new(drc: DrcMode, exposure: ExposureMode, width: i64, height: i64) -> Self {
        let width = u32::try_from(width)
            .ok()
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_WIDTH);
        let height = u32::try_from(height)
            .ok()
            .filter(|h| *h > 0 && u64::from(width) >= u64::from(*h) * 4 / 3)
            .unwrap_or_else(|| ((u64::from(width) * 3 / 4) as u32).max(1));

        Self {
            drc,
            exposure,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::new(
            DrcMode::default(),
            ExposureMode::default(),
            i64::from(DEFAULT_WIDTH),
            i64::from(DEFAULT_HEIGHT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: i64, height: i64) -> (u32, u32) {
        let opts = CaptureOptions::new(DrcMode::Low, ExposureMode::Auto, width, height);
        (opts.width(), opts.height())
    }

    #[test]
    fn defaults_are_1024_by_768() {
        assert_eq!(dims(1024, 768), (1024, 768));
        let opts = CaptureOptions::default();
        assert_eq!((opts.width(), opts.height()), (1024, 768));
        assert_eq!(opts.drc, DrcMode::Low);
        assert_eq!(opts.exposure, ExposureMode::Auto);
    }

    #[test]
    fn non_positive_width_falls_back_to_default() {
        for width in [0, -1, -4096, i64::MIN] {
            assert_eq!(dims(width, 768), (1024, 768), "width {width}");
            assert_eq!(dims(width, 0), (1024, 768), "width {width}");
        }
    }

    #[test]
    fn non_positive_height_derives_from_width() {
        assert_eq!(dims(640, 0), (640, 480));
        assert_eq!(dims(640, -10), (640, 480));
    }

    #[test]
    fn too_tall_height_is_corrected() {
        for width in [4, 100, 640, 1023, 2592] {
            let (w, h) = dims(width, 100_000);
            assert_eq!(u64::from(w), width as u64);
            assert_eq!(u64::from(h), width as u64 * 3 / 4, "width {width}");
        }
        assert_eq!(dims(1, 5), (1, 1));
    }

    #[test]
    fn wider_aspect_is_kept() {
        assert_eq!(dims(1920, 1080), (1920, 1080));
        assert_eq!(dims(800, 600), (800, 600));
    }

    #[test]
    fn oversized_values_do_not_overflow() {
        let (w, h) = dims(i64::MAX, i64::MAX);
        assert_eq!(w, 1024);
        assert_eq!(h, 768);
    }

    #[test]
    fn modes_parse_their_own_names() {
        for mode in [DrcMode::Off, DrcMode::Low, DrcMode::Med, DrcMode::High] {
            assert_eq!(mode.as_str().parse::<DrcMode>(), Ok(mode));
        }
        assert_eq!("nightpreview".parse::<ExposureMode>(), Ok(ExposureMode::NightPreview));
        assert!("loud".parse::<DrcMode>().is_err());
        assert!("auto; rm -rf /".parse::<ExposureMode>().is_err());
    }
}
