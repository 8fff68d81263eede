//! Unit types: Dp, Density and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        Self(px / density)
    }
}

impl std::ops::Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl std::ops::Mul<f32> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f32) -> Dp {
        Dp(self.0 * rhs)
    }
}

/// Screen density used to resolve [`Dp`] values into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub density: f32,
}

impl Density {
    pub const fn new(density: f32) -> Self {
        Self { density }
    }

    /// Resolve a dp value to raw pixels.
    pub fn dp_to_px(&self, dp: Dp) -> f32 {
        dp.to_px(self.density)
    }

    pub fn px_to_dp(&self, px: f32) -> Dp {
        Dp::from_px(px, self.density)
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::new(1.0)
    }
}
