//! Color palettes used by the plot branches.

/// An opaque 8-bit RGB color, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            self.0 as f64 / 255.0,
            self.1 as f64 / 255.0,
            self.2 as f64 / 255.0,
        )
    }

    /// Gray at `level` in [0, 1], 0 being black.
    pub fn gray(level: f64) -> Self {
        Self::from_unit(level, level, level)
    }
}

/// Default categorical palette ("deep").
pub const DEEP: [Rgb; 10] = [
    Rgb(76, 114, 176),
    Rgb(221, 132, 82),
    Rgb(85, 168, 104),
    Rgb(196, 78, 82),
    Rgb(129, 114, 179),
    Rgb(147, 120, 96),
    Rgb(218, 139, 195),
    Rgb(140, 140, 140),
    Rgb(204, 185, 116),
    Rgb(100, 181, 205),
];

/// The "m" color code under the deep palette.
pub const DEEP_MAGENTA: Rgb = DEEP[4];

/// Darkgrid panel background.
pub const DARKGRID_BACKGROUND: Rgb = Rgb(234, 234, 242);

/// First `n` deep colors, cycling when more are requested.
pub fn deep(n: usize) -> Vec<Rgb> {
    (0..n).map(|i| DEEP[i % DEEP.len()]).collect()
}

/// `n` colors evenly sampled along straight RGB segments between `stops`.
pub fn blend(stops: &[Rgb], n: usize) -> Vec<Rgb> {
    match (stops.len(), n) {
        (_, 0) | (0, _) => return Vec::new(),
        (1, _) => return vec![stops[0]; n],
        _ => {}
    }

    let segments = (stops.len() - 1) as f64;
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            let pos = t * segments;
            let seg = (pos.floor() as usize).min(stops.len() - 2);
            let frac = pos - seg as f64;
            let (r0, g0, b0) = stops[seg].to_unit();
            let (r1, g1, b1) = stops[seg + 1].to_unit();
            Rgb::from_unit(
                r0 + (r1 - r0) * frac,
                g0 + (g1 - g0) * frac,
                b0 + (b1 - b0) * frac,
            )
        })
        .collect()
}

/// Sequential palette from a near-white tint of `color` up to `color`.
/// The tint keeps the HUSL hue at lightness 95 and 15% of the saturation.
/// `reverse` runs from `color` down to the tint instead ("light:<c>_r").
pub fn light(color: Rgb, n: usize, reverse: bool) -> Vec<Rgb> {
    let (r, g, b) = color.to_unit();
    let (h, s, _) = rgb_to_husl(r, g, b);
    let (tr, tg, tb) = husl_to_rgb(h, 0.15 * s, 95.0);
    let tint = Rgb::from_unit(tr, tg, tb);

    if reverse {
        blend(&[color, tint], n)
    } else {
        blend(&[tint, color], n)
    }
}

/// Parameters of a cubehelix sequential palette ("ch:<args>").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubehelix {
    pub start: f64,
    pub rot: f64,
    pub gamma: f64,
    pub hue: f64,
    pub light: f64,
    pub dark: f64,
    pub reverse: bool,
}

impl Default for Cubehelix {
    fn default() -> Self {
        Self {
            start: 0.0,
            rot: 0.4,
            gamma: 1.0,
            hue: 0.8,
            light: 0.85,
            dark: 0.15,
            reverse: false,
        }
    }
}

impl Cubehelix {
    pub fn colors(&self, n: usize) -> Vec<Rgb> {
        let channel = |x: f64, p0: f64, p1: f64| {
            let xg = x.powf(self.gamma);
            let a = self.hue * xg * (1.0 - xg) / 2.0;
            let phi = 2.0 * std::f64::consts::PI * (self.start / 3.0 + self.rot * x);
            xg + a * (p0 * phi.cos() + p1 * phi.sin())
        };

        let mut colors: Vec<Rgb> = (0..n)
            .map(|i| {
                let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
                let x = self.light + (self.dark - self.light) * t;
                Rgb::from_unit(
                    channel(x, -0.14861, 1.78277),
                    channel(x, -0.29227, -0.90649),
                    channel(x, 1.97294, 0.0),
                )
            })
            .collect();

        if self.reverse {
            colors.reverse();
        }
        colors
    }
}

// HUSL (human-friendly HSL over CIELUV), sRGB with a D65 white point.
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];
const REF_Y: f64 = 1.0;
const REF_U: f64 = 0.19784;
const REF_V: f64 = 0.46834;
const LAB_E: f64 = 0.008856;
const LAB_K: f64 = 903.3;

fn dot(row: &[f64; 3], v: [f64; 3]) -> f64 {
    row[0] * v[0] + row[1] * v[1] + row[2] * v[2]
}

/// Largest chroma still inside the sRGB gamut at lightness `l`, hue `h` (degrees).
fn max_chroma(l: f64, h: f64) -> f64 {
    let (sin_h, cos_h) = h.to_radians().sin_cos();
    let sub1 = (l + 16.0).powi(3) / 1_560_896.0;
    let sub2 = if sub1 > LAB_E { sub1 } else { l / LAB_K };

    let mut result = f64::INFINITY;
    for [m1, m2, m3] in XYZ_TO_RGB {
        let top = (0.99915 * m1 + 1.05122 * m2 + 1.14460 * m3) * sub2;
        let rbottom = 0.86330 * m3 - 0.17266 * m2;
        let lbottom = 0.12949 * m3 - 0.38848 * m1;
        let bottom = (rbottom * sin_h + lbottom * cos_h) * sub2;
        for t in [0.0, 1.0] {
            let c = l * (top - 1.05122 * t) / (bottom + 0.17266 * sin_h * t);
            if c > 0.0 && c < result {
                result = c;
            }
        }
    }
    result
}

fn to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

fn from_linear(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Unit RGB to (hue degrees, saturation 0-100, lightness 0-100).
fn rgb_to_husl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let linear = [to_linear(r), to_linear(g), to_linear(b)];
    let [x, y, z] = RGB_TO_XYZ.map(|row| dot(&row, linear));

    let denom = x + 15.0 * y + 3.0 * z;
    if denom == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let yr = y / REF_Y;
    let l = if yr > LAB_E { 116.0 * yr.cbrt() - 16.0 } else { yr * LAB_K };
    if l < 1e-8 {
        return (0.0, 0.0, 0.0);
    }
    let u = 13.0 * l * (4.0 * x / denom - REF_U);
    let v = 13.0 * l * (9.0 * y / denom - REF_V);

    let c = u.hypot(v);
    let h = v.atan2(u).to_degrees().rem_euclid(360.0);
    if l > 99.9999999 {
        return (h, 0.0, 100.0);
    }
    (h, c / max_chroma(l, h) * 100.0, l)
}

/// Inverse of `rgb_to_husl`; the result may fall slightly outside [0, 1].
fn husl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if l > 99.9999999 {
        return (1.0, 1.0, 1.0);
    }
    if l < 1e-8 {
        return (0.0, 0.0, 0.0);
    }
    let c = max_chroma(l, h) / 100.0 * s;
    let (sin_h, cos_h) = h.to_radians().sin_cos();
    let (u, v) = (cos_h * c, sin_h * c);

    let var_y = if l > LAB_K * LAB_E {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l / LAB_K
    };
    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;
    let y = var_y * REF_Y;
    let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);

    let [r, g, b] = XYZ_TO_RGB.map(|row| from_linear(dot(&row, [x, y, z])));
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(color: Rgb) -> f64 {
        let (r, g, b) = color.to_unit();
        rgb_to_husl(r, g, b).2
    }

    #[test]
    fn blend_hits_both_ends() {
        let colors = blend(&[Rgb(0, 0, 0), Rgb(255, 255, 255)], 3);
        assert_eq!(colors, vec![Rgb(0, 0, 0), Rgb(128, 128, 128), Rgb(255, 255, 255)]);
    }

    #[test]
    fn reversed_light_palette_starts_at_color() {
        let colors = light(DEEP_MAGENTA, 5, true);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], DEEP_MAGENTA);
        assert!((lightness(colors[4]) - 95.0).abs() < 0.5);
        for pair in colors.windows(2) {
            assert!(lightness(pair[0]) <= lightness(pair[1]));
        }
    }

    #[test]
    fn husl_round_trip() {
        for color in DEEP {
            let (r, g, b) = color.to_unit();
            let (h, s, l) = rgb_to_husl(r, g, b);
            let (r2, g2, b2) = husl_to_rgb(h, s, l);
            assert_eq!(Rgb::from_unit(r2, g2, b2), color);
        }
    }

    #[test]
    fn husl_extremes() {
        assert_eq!(rgb_to_husl(0.0, 0.0, 0.0).2, 0.0);
        assert!((rgb_to_husl(1.0, 1.0, 1.0).2 - 100.0).abs() < 1e-3);
        assert_eq!(husl_to_rgb(120.0, 50.0, 100.0), (1.0, 1.0, 1.0));
    }

    #[test]
    fn light_tint_keeps_hue_family() {
        let tint = light(DEEP_MAGENTA, 2, true)[1];
        let (tr, tg, tb) = tint.to_unit();
        // Blue-violet source: the tint stays bluer than it is green.
        assert!(tb > tg);
        assert!((rgb_to_husl(tr, tg, tb).2 - 95.0).abs() < 0.5);
    }

    #[test]
    fn reversed_cubehelix_runs_dark_to_light() {
        let pal = Cubehelix {
            rot: -0.2,
            dark: 0.3,
            reverse: true,
            ..Default::default()
        };
        let colors = pal.colors(8);
        assert_eq!(colors.len(), 8);
        assert!(lightness(colors[0]) < lightness(colors[7]));
    }

    #[test]
    fn deep_cycles() {
        let colors = deep(12);
        assert_eq!(colors[10], DEEP[0]);
    }
}
