use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidHex(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "invalid hex color: {s:?}"),
        }
    }
}

impl std::error::Error for ColorError {}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let err = || ColorError::InvalidHex(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Components scaled to `[0, 1]`.
    pub fn to_f32(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| c as f32 / 255.0)
    }
}

impl std::str::FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorError, Rgba};

    #[test]
    fn parses_rgb_and_rgba_hex() {
        assert_eq!(Rgba::from_hex("#1a1a2e"), Ok(Rgba::rgb(0x1a, 0x1a, 0x2e)));
        assert_eq!(Rgba::from_hex("#0F0F1EE0"), Ok(Rgba::rgba(15, 15, 30, 224)));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["1a1a2e", "#12345", "#zzzzzz", "#ééé", ""] {
            assert!(matches!(Rgba::from_hex(bad), Err(ColorError::InvalidHex(_))), "{bad}");
        }
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let c = Rgba::rgba(139, 92, 246, 102);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#8b5cf666\"");
        assert_eq!(serde_json::from_str::<Rgba>(&json).unwrap(), c);
        assert!(serde_json::from_str::<Rgba>("\"red\"").is_err());
    }
}
