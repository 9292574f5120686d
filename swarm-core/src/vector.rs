use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}

/// A 2D vector used for position, velocity and force
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing at `angle` radians from the +x axis.
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self { x: cos, y: sin }
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.magnitude_squared())
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Same direction, length `magnitude`. The zero vector stays zero.
    pub fn set_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    /// Clamp the length to `max`; shorter vectors are returned unchanged.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.set_magnitude(max)
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        assert_eq!(v1 + v2, Vector2D::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2D::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(v2 / 2.0, Vector2D::new(1.5, 2.0));
        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));

        let mut acc = v1;
        acc += v2;
        acc -= v1;
        assert_eq!(acc, v2);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        let zero = Vector2D::zero();
        assert_eq!(zero.normalize(), Vector2D::zero());
        assert_eq!(zero.set_magnitude(10.0), Vector2D::zero());
        assert!(!zero.set_magnitude(10.0).x.is_nan());
    }

    #[test]
    fn test_limit_leaves_short_vectors_alone() {
        let v = Vector2D::new(0.3, 0.4);
        assert_eq!(v.limit(1.0), v);

        let long = Vector2D::new(30.0, 40.0).limit(5.0);
        assert!((long.x - 3.0).abs() < 1e-5);
        assert!((long.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance() {
        let a = Vector2D::new(1.0, 1.0);
        let b = Vector2D::new(4.0, 5.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_from_angle_is_unit() {
        let v = Vector2D::from_angle(1.234);
        assert!((v.magnitude() - 1.0).abs() < 1e-5);
        let right = Vector2D::from_angle(0.0);
        assert_eq!(right, Vector2D::new(1.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_limit_never_exceeds_max(
            x in -1.0e3f32..1.0e3,
            y in -1.0e3f32..1.0e3,
            max in 0.001f32..100.0,
        ) {
            let limited = Vector2D::new(x, y).limit(max);
            prop_assert!(limited.magnitude() <= max * (1.0 + 1e-5));
        }

        #[test]
        fn prop_set_magnitude_hits_target(
            x in -1.0e3f32..1.0e3,
            y in -1.0e3f32..1.0e3,
            target in 0.0f32..50.0,
        ) {
            let v = Vector2D::new(x, y);
            prop_assume!(v.magnitude() > 1e-3);
            let scaled = v.set_magnitude(target);
            prop_assert!((scaled.magnitude() - target).abs() <= 1e-3 * target.max(1.0));
        }
    }
}
