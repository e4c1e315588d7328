/// A color as three channel values in [0, 255]. Channels stay floating point
/// through the pipeline and are only rounded when encoding to hex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue in [0, 360), saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    pub fn to_hsl(self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        // Achromatic: no hue, no saturation.
        if delta == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let mut h = if max == r {
            ((g - b) / delta) % 6.0
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        } * 60.0;

        if h < 0.0 {
            h += 360.0;
        }

        Hsl { h, s, l }
    }

    pub fn to_hex(self) -> String {
        let r = self.r.round().clamp(0.0, 255.0) as u8;
        let g = self.g.round().clamp(0.0, 255.0) as u8;
        let b = self.b.round().clamp(0.0, 255.0) as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// True when `s` is a 6-digit hex color with a leading `#`.
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Append a 2-digit alpha suffix to a 6-digit hex color (leading `#`
/// optional). Anything that is not a 6-digit hex color passes through
/// unchanged.
pub fn hex_with_alpha(hex: &str, alpha: &str) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("{hex}{alpha}")
    } else {
        hex.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn gray_is_achromatic() {
        for v in [0.0, 63.0, 127.5, 200.0, 255.0] {
            let hsl = Rgb::new(v, v, v).to_hsl();
            assert_eq!(hsl.h, 0.0);
            assert_eq!(hsl.s, 0.0);
            assert!(approx_eq(hsl.l, v / 255.0, 1e-9));
        }
    }

    #[test]
    fn primary_hues() {
        let red = Rgb::new(255.0, 0.0, 0.0).to_hsl();
        assert!(approx_eq(red.h, 0.0, 1e-9));
        assert!(approx_eq(red.s, 1.0, 1e-9));
        assert!(approx_eq(red.l, 0.5, 1e-9));

        let green = Rgb::new(0.0, 255.0, 0.0).to_hsl();
        assert!(approx_eq(green.h, 120.0, 1e-9));

        let blue = Rgb::new(0.0, 0.0, 255.0).to_hsl();
        assert!(approx_eq(blue.h, 240.0, 1e-9));
    }

    #[test]
    fn negative_hue_sector_wraps_into_range() {
        // Max channel is red with b > g, so the raw sector is negative.
        let hsl = Rgb::new(255.0, 0.0, 128.0).to_hsl();
        assert!(hsl.h >= 0.0 && hsl.h < 360.0);
        assert!(hsl.h > 300.0, "expected a magenta-ish hue, got {}", hsl.h);
    }

    #[test]
    fn lightness_extremes() {
        assert!(approx_eq(Rgb::new(0.0, 0.0, 0.0).to_hsl().l, 0.0, 1e-9));
        assert!(approx_eq(Rgb::new(255.0, 255.0, 255.0).to_hsl().l, 1.0, 1e-9));
    }

    #[test]
    fn hex_rounds_to_nearest() {
        assert_eq!(Rgb::new(199.6, 39.4, 40.5).to_hex(), "#C82729");
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(Rgb::new(255.0, 255.0, 255.0).to_hex(), "#FFFFFF");
    }

    #[test]
    fn hex_clamps_out_of_range_channels() {
        assert_eq!(Rgb::new(300.0, -4.0, 255.2).to_hex(), "#FF00FF");
    }

    #[test]
    fn hex_with_alpha_appends_suffix() {
        assert_eq!(hex_with_alpha("#336699", "80"), "#33669980");
        assert_eq!(hex_with_alpha("336699", "80"), "33669980");
    }

    #[test]
    fn hex_with_alpha_passes_invalid_through() {
        assert_eq!(hex_with_alpha("not-a-color", "80"), "not-a-color");
        assert_eq!(hex_with_alpha("#12345", "80"), "#12345");
        assert_eq!(hex_with_alpha("#12345G", "80"), "#12345G");
        assert_eq!(hex_with_alpha("", "80"), "");
    }

    #[test]
    fn hex_color_predicate() {
        assert!(is_hex_color("#000000"));
        assert!(is_hex_color("#AbCdEf"));
        assert!(!is_hex_color("000000"));
        assert!(!is_hex_color("#00000"));
        assert!(!is_hex_color("#0000000"));
        assert!(!is_hex_color("#00000g"));
    }
}
